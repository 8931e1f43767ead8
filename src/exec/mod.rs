// src/exec/mod.rs

//! Command expansion and execution.
//!
//! - [`template`] turns an event plus a command template into a fully
//!   shell-quoted command line.
//! - [`command`] owns the execution sink that actually launches it.

pub mod command;
pub mod template;

pub use command::{CommandSink, ShellSink};
pub use template::{expand, shell_quote};
