// src/watch/mask.rs

//! Interest-mask resolution.
//!
//! Config files name event kinds with human-readable tokens
//! (`events = "create,delete,move"`); this module composes them into the
//! single `WatchMask` handed to the kernel. Unrecognized tokens are ignored
//! so that an unknown config value degrades the mask instead of aborting
//! startup.

use inotify::WatchMask;

/// Map a single token to its mask bits.
///
/// Tokens are case-sensitive and expected to be pre-trimmed. The compound
/// tokens `move`, `close` and `all` expand to unions of the primitive kinds.
fn token_mask(token: &str) -> Option<WatchMask> {
    match token {
        "access" => Some(WatchMask::ACCESS),
        "attribute_change" => Some(WatchMask::ATTRIB),
        "write_close" => Some(WatchMask::CLOSE_WRITE),
        "nowrite_close" => Some(WatchMask::CLOSE_NOWRITE),
        "create" => Some(WatchMask::CREATE),
        "delete" => Some(WatchMask::DELETE),
        "self_delete" => Some(WatchMask::DELETE_SELF),
        "modify" => Some(WatchMask::MODIFY),
        "self_move" => Some(WatchMask::MOVE_SELF),
        "move_from" => Some(WatchMask::MOVED_FROM),
        "move_to" => Some(WatchMask::MOVED_TO),
        "open" => Some(WatchMask::OPEN),
        "move" => Some(WatchMask::MOVED_FROM | WatchMask::MOVED_TO),
        "close" => Some(WatchMask::CLOSE_WRITE | WatchMask::CLOSE_NOWRITE),
        "all" => Some(all_events()),
        _ => None,
    }
}

/// Union of all twelve primitive event kinds (the `all` token).
pub fn all_events() -> WatchMask {
    WatchMask::ACCESS
        | WatchMask::ATTRIB
        | WatchMask::CLOSE_WRITE
        | WatchMask::CLOSE_NOWRITE
        | WatchMask::CREATE
        | WatchMask::DELETE
        | WatchMask::DELETE_SELF
        | WatchMask::MODIFY
        | WatchMask::MOVE_SELF
        | WatchMask::MOVED_FROM
        | WatchMask::MOVED_TO
        | WatchMask::OPEN
}

/// Compose the interest mask for a list of event-name tokens.
///
/// Composition is a pure set union: order does not matter and repeated
/// tokens are idempotent. An empty list, or a list with no recognized
/// token, yields `WatchMask::empty()`.
pub fn resolve<I, S>(tokens: I) -> WatchMask
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    tokens
        .into_iter()
        .filter_map(|t| token_mask(t.as_ref().trim()))
        .fold(WatchMask::empty(), |acc, m| acc | m)
}

/// Compose the interest mask from a comma-separated token list, the form
/// used by the `events` config field.
pub fn resolve_list(csv: &str) -> WatchMask {
    resolve(csv.split(','))
}
