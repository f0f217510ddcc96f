//! Vessel traffic simulation for SeaTraffic.
//!
//! Owns the hecs world of active vessels, promotes and retires them as the
//! observer moves between tiles, advances each one along its route every
//! tick, and produces `TrafficSnapshot`s for the renderer.

pub mod catalog;
pub mod components;
pub mod engine;
pub mod error;
pub mod pool;
pub mod services;
pub mod stock;
pub mod systems;

pub use seatraffic_core as core;
pub use engine::TrafficEngine;
pub use error::TrafficError;
