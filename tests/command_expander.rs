use std::path::PathBuf;
use std::process::Command;

use inotify::EventMask;
use proptest::prelude::*;

use watcherd::errors::TemplateError;
use watcherd::exec::template::{expand, shell_quote};
use watcherd::watch::{EventKind, FileEvent};

fn create_event(path: &str) -> FileEvent {
    FileEvent {
        watched_root: PathBuf::from("/tmp/x"),
        full_path: PathBuf::from(path),
        kind: EventKind::Create,
        kind_name: "IN_CREATE".to_string(),
        kind_flags: EventMask::CREATE.bits(),
        move_cookie: 0,
    }
}

/// Run `sh -c <command>` and return its stdout.
fn sh_output(command: &str) -> String {
    let out = Command::new("sh")
        .arg("-c")
        .arg(command)
        .output()
        .expect("failed to run sh");
    String::from_utf8(out.stdout).expect("non-utf8 output")
}

#[test]
fn create_event_expands_to_quoted_command() {
    let event = create_event("/tmp/x/a.txt");
    let command = expand("echo ${filename}", &event).unwrap();
    assert_eq!(command, "echo '/tmp/x/a.txt'");
}

#[test]
fn all_placeholders_substitute() {
    let mut event = create_event("/tmp/x/a.txt");
    event.move_cookie = 42;

    let command = expand(
        "handler ${watched} ${filename} ${tflags} ${nflags} ${cookie}",
        &event,
    )
    .unwrap();

    assert_eq!(
        command,
        format!(
            "handler '/tmp/x' '/tmp/x/a.txt' 'IN_CREATE' '{}' '42'",
            EventMask::CREATE.bits()
        )
    );
}

#[test]
fn missing_cookie_substitutes_literal_zero() {
    let event = create_event("/tmp/x/a.txt");
    let command = expand("echo ${cookie}", &event).unwrap();
    assert_eq!(command, "echo '0'");
}

#[test]
fn unknown_placeholder_is_a_template_error() {
    let event = create_event("/tmp/x/a.txt");
    let err = expand("echo ${bogus}", &event).unwrap_err();
    assert_eq!(err, TemplateError::UnknownPlaceholder("bogus".to_string()));
}

#[test]
fn unterminated_placeholder_is_a_template_error() {
    let event = create_event("/tmp/x/a.txt");
    let err = expand("echo ${filename", &event).unwrap_err();
    assert_eq!(err, TemplateError::Unterminated);
}

#[test]
fn lone_dollar_is_literal_text() {
    let event = create_event("/tmp/x/a.txt");
    let command = expand("echo $HOME ${filename}", &event).unwrap();
    assert_eq!(command, "echo $HOME '/tmp/x/a.txt'");
}

#[test]
fn quoting_escapes_embedded_single_quotes() {
    assert_eq!(shell_quote("a'b"), r"'a'\''b'");
    assert_eq!(shell_quote("plain"), "'plain'");
    assert_eq!(shell_quote(""), "''");
}

#[test]
fn quoted_filename_round_trips_through_the_shell() {
    let evil = "/tmp/x/it's a; rm -rf $(pwd) `file`.txt";
    let event = create_event(evil);

    let command = expand("printf %s ${filename}", &event).unwrap();
    assert_eq!(sh_output(&command), evil);
}

#[test]
fn injected_shell_syntax_stays_a_single_argument() {
    let event = create_event("/tmp/x/a.txt'; echo pwned; '");
    let command = expand("printf %s ${filename}", &event).unwrap();

    let out = sh_output(&command);
    assert_eq!(out, "/tmp/x/a.txt'; echo pwned; '");
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// The shell parses every quoted value back to the original string.
    #[test]
    fn quoting_round_trips_for_arbitrary_names(name in "[^\\x00]{0,40}") {
        let quoted = shell_quote(&name);
        let out = sh_output(&format!("printf %s {quoted}"));
        prop_assert_eq!(out, name);
    }
}
