//! Systems that operate on the active pool.
//!
//! Systems are free functions over the pool's world and the shared route
//! data. They hold no state of their own; vessel state lives in components
//! and scheduling state lives in the engine.

pub mod navigation;
pub mod promotion;
pub mod retirement;
pub mod snapshot;
