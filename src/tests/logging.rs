use super::*;

fn logging_opts() -> Options {
    Options {
        logging: true,
        ..Options::default()
    }
}

#[test]
fn log_is_empty_when_disabled() {
    let (_, log) = complete_to_string_with_log(r#"{"a":1"#, &Options::default());
    assert!(log.is_empty());
}

#[test]
fn log_is_empty_for_already_complete_input() {
    let (out, log) = complete_to_string_with_log(r#"{"a":1}"#, &logging_opts());
    assert_eq!(out, r#"{"a":1}"#);
    assert!(log.is_empty());
}

#[test]
fn replaced_value_is_logged_with_context() {
    let (out, log) = complete_to_string_with_log(r#"{"a":1"#, &logging_opts());
    assert_eq!(out, r#"{"a":"~~"}"#);
    assert!(
        log.iter()
            .any(|e| e.message.contains("replaced partial value"))
    );
    assert!(log.iter().any(|e| e.message.contains("closed open containers")));
    let entry = &log[0];
    assert!(entry.context.contains(r#""a":"#));
    assert_eq!(entry.position, 5);
}

#[test]
fn kept_literal_is_logged() {
    let (_, log) = complete_to_string_with_log(r#"{"a":true"#, &logging_opts());
    assert!(log.iter().any(|e| e.message.contains("kept literal")));
}

#[test]
fn unterminated_string_is_logged() {
    let (_, log) = complete_to_string_with_log(r#"{"a":"b"#, &logging_opts());
    assert!(
        log.iter()
            .any(|e| e.message.contains("closed unterminated string"))
    );
}

#[test]
fn context_window_respects_char_boundaries() {
    let mut opts = logging_opts();
    opts.log_context_window = 3;
    // Multi-byte chars right around the patch position must not split.
    let (_, log) = complete_to_string_with_log(r#"{"⚙⚙":"⚙⚙"#, &opts);
    for e in &log {
        // Would have panicked on a non-boundary slice already; check content.
        assert!(!e.context.is_empty());
    }
}
