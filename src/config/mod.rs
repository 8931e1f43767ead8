// src/config/mod.rs

//! Configuration loading and validation for watcherd.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a config file from disk, including the default search path
//!   (`loader.rs`).
//! - Validate structural invariants (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_and_validate, load_from_path, resolve_config_path};
pub use model::{ConfigFile, DefaultSection, WatchSection};
pub use validate::validate_config;
