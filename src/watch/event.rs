// src/watch/event.rs

//! Observed filesystem events.
//!
//! A [`FileEvent`] is the transient value a subscription hands to its watch
//! binding for one kernel occurrence. It carries everything the command
//! template can reference: the watched directory, the concrete path, the
//! event kind in both textual and numeric form, and the move-correlation
//! cookie.

use std::path::PathBuf;

use inotify::{EventMask, WatchMask};

/// The primitive event kinds a watch can subscribe to.
///
/// Each kernel event carries exactly one of these (plus auxiliary bits like
/// `ISDIR`), so dispatch is a single match instead of one handler per kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Access,
    AttributeChange,
    CloseWrite,
    CloseNowrite,
    Create,
    Delete,
    DeleteSelf,
    Modify,
    MoveSelf,
    MovedFrom,
    MovedTo,
    Open,
}

impl EventKind {
    /// Extract the primitive kind from a raw event mask.
    ///
    /// Returns `None` for purely administrative events (`IGNORED`,
    /// `Q_OVERFLOW`, `UNMOUNT`) that carry no primitive kind bit.
    pub fn from_mask(mask: EventMask) -> Option<EventKind> {
        if mask.contains(EventMask::ACCESS) {
            Some(EventKind::Access)
        } else if mask.contains(EventMask::ATTRIB) {
            Some(EventKind::AttributeChange)
        } else if mask.contains(EventMask::CLOSE_WRITE) {
            Some(EventKind::CloseWrite)
        } else if mask.contains(EventMask::CLOSE_NOWRITE) {
            Some(EventKind::CloseNowrite)
        } else if mask.contains(EventMask::CREATE) {
            Some(EventKind::Create)
        } else if mask.contains(EventMask::DELETE) {
            Some(EventKind::Delete)
        } else if mask.contains(EventMask::DELETE_SELF) {
            Some(EventKind::DeleteSelf)
        } else if mask.contains(EventMask::MODIFY) {
            Some(EventKind::Modify)
        } else if mask.contains(EventMask::MOVE_SELF) {
            Some(EventKind::MoveSelf)
        } else if mask.contains(EventMask::MOVED_FROM) {
            Some(EventKind::MovedFrom)
        } else if mask.contains(EventMask::MOVED_TO) {
            Some(EventKind::MovedTo)
        } else if mask.contains(EventMask::OPEN) {
            Some(EventKind::Open)
        } else {
            None
        }
    }

    /// The watch-mask bit corresponding to this kind, used to check an
    /// incoming event against a watch's interest mask.
    pub fn watch_mask(self) -> WatchMask {
        match self {
            EventKind::Access => WatchMask::ACCESS,
            EventKind::AttributeChange => WatchMask::ATTRIB,
            EventKind::CloseWrite => WatchMask::CLOSE_WRITE,
            EventKind::CloseNowrite => WatchMask::CLOSE_NOWRITE,
            EventKind::Create => WatchMask::CREATE,
            EventKind::Delete => WatchMask::DELETE,
            EventKind::DeleteSelf => WatchMask::DELETE_SELF,
            EventKind::Modify => WatchMask::MODIFY,
            EventKind::MoveSelf => WatchMask::MOVE_SELF,
            EventKind::MovedFrom => WatchMask::MOVED_FROM,
            EventKind::MovedTo => WatchMask::MOVED_TO,
            EventKind::Open => WatchMask::OPEN,
        }
    }

    /// Human-readable label used in event log lines.
    pub fn label(self) -> &'static str {
        match self {
            EventKind::Access => "Access",
            EventKind::AttributeChange => "Attrib",
            EventKind::CloseWrite => "Close write",
            EventKind::CloseNowrite => "Close nowrite",
            EventKind::Create => "Create",
            EventKind::Delete => "Delete",
            EventKind::DeleteSelf => "Delete self",
            EventKind::Modify => "Modify",
            EventKind::MoveSelf => "Move self",
            EventKind::MovedFrom => "Moved from",
            EventKind::MovedTo => "Moved to",
            EventKind::Open => "Open",
        }
    }
}

/// Textual form of a raw event mask, e.g. `IN_CREATE|IN_ISDIR`.
///
/// This is the `${tflags}` substitution value.
pub fn describe_mask(mask: EventMask) -> String {
    const NAMES: &[(EventMask, &str)] = &[
        (EventMask::ACCESS, "IN_ACCESS"),
        (EventMask::ATTRIB, "IN_ATTRIB"),
        (EventMask::CLOSE_WRITE, "IN_CLOSE_WRITE"),
        (EventMask::CLOSE_NOWRITE, "IN_CLOSE_NOWRITE"),
        (EventMask::CREATE, "IN_CREATE"),
        (EventMask::DELETE, "IN_DELETE"),
        (EventMask::DELETE_SELF, "IN_DELETE_SELF"),
        (EventMask::MODIFY, "IN_MODIFY"),
        (EventMask::MOVE_SELF, "IN_MOVE_SELF"),
        (EventMask::MOVED_FROM, "IN_MOVED_FROM"),
        (EventMask::MOVED_TO, "IN_MOVED_TO"),
        (EventMask::OPEN, "IN_OPEN"),
        (EventMask::IGNORED, "IN_IGNORED"),
        (EventMask::ISDIR, "IN_ISDIR"),
        (EventMask::Q_OVERFLOW, "IN_Q_OVERFLOW"),
        (EventMask::UNMOUNT, "IN_UNMOUNT"),
    ];

    let parts: Vec<&str> = NAMES
        .iter()
        .filter(|(bit, _)| mask.contains(*bit))
        .map(|(_, name)| *name)
        .collect();

    if parts.is_empty() {
        format!("{:#x}", mask.bits())
    } else {
        parts.join("|")
    }
}

/// One kernel-reported occurrence on a watched path.
///
/// Lives only for the duration of a single dispatch.
#[derive(Debug, Clone)]
pub struct FileEvent {
    /// Directory of the watch descriptor the event arrived on.
    pub watched_root: PathBuf,
    /// Absolute path the event concerns.
    pub full_path: PathBuf,
    /// Primitive event kind.
    pub kind: EventKind,
    /// Textual flag form of the raw mask.
    pub kind_name: String,
    /// Raw mask bits as reported by the kernel.
    pub kind_flags: u32,
    /// Correlation id linking a moved-from / moved-to pair; 0 when the
    /// event is not part of a move.
    pub move_cookie: u32,
}
