// src/engine/mod.rs

//! Watch bindings and dispatch supervision.
//!
//! - [`binding`] couples one configured watch to a live kernel subscription
//!   and the loop that expands and executes commands for its events.
//! - [`supervisor`] owns the collection of bindings, starts one loop per
//!   watch, and keeps the process alive until a termination signal.

pub mod binding;
pub mod supervisor;

pub use binding::{ConfiguredBinding, WatchBinding, WatchSpec};
pub use supervisor::DispatchSupervisor;
