// src/exec/template.rs

//! Command template expansion.
//!
//! A watch's `command` is a template with `${...}` placeholders for event
//! metadata. Every substituted value is shell-quoted first, so a file name
//! chosen by someone else can never smuggle extra shell syntax into the
//! command line: the expanded value is always one opaque word.

use crate::errors::TemplateError;
use crate::watch::event::FileEvent;

/// Quote a value for use as a single shell word.
///
/// Wraps the value in single quotes and rewrites every embedded single
/// quote as `'\''` (close quote, escaped literal quote, reopen quote).
pub fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "'\\''"))
}

fn placeholder_value(name: &str, event: &FileEvent) -> Option<String> {
    match name {
        "watched" => Some(event.watched_root.display().to_string()),
        "filename" => Some(event.full_path.display().to_string()),
        "tflags" => Some(event.kind_name.clone()),
        "nflags" => Some(event.kind_flags.to_string()),
        "cookie" => Some(event.move_cookie.to_string()),
        _ => None,
    }
}

/// Expand a command template against an observed event.
///
/// Recognized placeholders: `${watched}`, `${filename}`, `${tflags}`,
/// `${nflags}`, `${cookie}`. Non-move events substitute the literal `0`
/// for `${cookie}`. A `$` not followed by `{` is plain text.
///
/// Referencing any other name, or leaving a `${` unterminated, is a
/// [`TemplateError`]; callers report it per event and keep the watch alive.
pub fn expand(template: &str, event: &FileEvent) -> Result<String, TemplateError> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(pos) = rest.find("${") {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 2..];

        let Some(end) = after.find('}') else {
            return Err(TemplateError::Unterminated);
        };

        let name = &after[..end];
        let value = placeholder_value(name, event)
            .ok_or_else(|| TemplateError::UnknownPlaceholder(name.to_string()))?;

        out.push_str(&shell_quote(&value));
        rest = &after[end + 1..];
    }

    out.push_str(rest);
    Ok(out)
}
