// src/watch/mod.rs

//! Kernel-level file watching.
//!
//! This module is responsible for:
//! - Resolving human-readable event tokens into inotify interest masks.
//! - Compiling per-watch exclusion patterns.
//! - Owning live inotify subscriptions, including the userspace half of
//!   recursive watching and auto-adding new subdirectories.
//!
//! It does **not** know about command templates or dispatch; it only turns
//! kernel occurrences into [`FileEvent`]s.

pub mod event;
pub mod exclude;
pub mod mask;
pub mod subscription;

pub use event::{describe_mask, EventKind, FileEvent};
pub use exclude::ExcludeFilter;
pub use subscription::Subscription;
