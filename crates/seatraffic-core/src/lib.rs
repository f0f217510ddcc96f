//! Core types and definitions for the SeaTraffic simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! geographic types, ship classes, routes, events, pose snapshots and
//! constants. It has no dependency on any rendering host.

pub mod config;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod geo;
pub mod projection;
pub mod route;
pub mod state;
pub mod types;
