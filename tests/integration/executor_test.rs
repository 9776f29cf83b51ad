use statusd::data::{BoundedBuf, FieldBuf, FIELD_CAPACITY};
use statusd::utils::command::capture_shell;

#[test]
fn long_output_is_truncated_to_capacity_minus_one() {
    let mut buf = FieldBuf::new();
    capture_shell("printf '%0100d' 0", &mut buf).unwrap();
    assert_eq!(buf.len(), FIELD_CAPACITY - 1);
    assert_eq!(buf.as_bytes(), &[b'0'; FIELD_CAPACITY - 1][..]);
}

#[test]
fn exact_fit_drops_newline_past_capacity() {
    let mut buf = FieldBuf::new();
    capture_shell("printf '%031d\\n' 7", &mut buf).unwrap();
    assert_eq!(buf.len(), 31);
    assert!(!buf.as_bytes().contains(&b'\n'));
}

#[test]
fn trailing_newline_is_stripped() {
    let mut buf = FieldBuf::new();
    capture_shell("date +%Y", &mut buf).unwrap();
    assert_eq!(buf.len(), 4);
    assert!(buf.as_str().chars().all(|c| c.is_ascii_digit()));
}

#[test]
fn endless_writer_does_not_stall_capture() {
    let mut buf = FieldBuf::new();
    capture_shell("yes", &mut buf).unwrap();
    assert_eq!(buf.len(), FIELD_CAPACITY - 1);
    assert_eq!(buf.as_str(), format!("{}y", "y ".repeat(15)));
}

#[test]
fn long_multi_line_output_fills_capacity_on_one_line() {
    let mut buf = FieldBuf::new();
    capture_shell("printf 'ab\\n%0100d' 0", &mut buf).unwrap();
    assert_eq!(buf.len(), FIELD_CAPACITY - 1);
    assert_eq!(buf.as_str(), format!("ab {}", "0".repeat(28)));
    assert!(!buf.as_bytes().contains(&b'\n'));
}

#[test]
fn embedded_newlines_become_spaces() {
    let mut buf = FieldBuf::new();
    capture_shell("printf '1.2\\n3.4\\n'", &mut buf).unwrap();
    assert_eq!(buf.as_str(), "1.2 3.4");
}

#[test]
fn stderr_is_not_captured() {
    let mut buf = FieldBuf::new();
    capture_shell("echo out; echo err >&2", &mut buf).unwrap();
    assert_eq!(buf.as_str(), "out");
}

#[test]
fn failed_attempt_never_leaves_stale_value() {
    let mut buf = FieldBuf::new();
    buf.write(b"previous value");
    capture_shell("statusd-no-such-command-xyz", &mut buf).unwrap();
    assert!(buf.is_empty());

    buf.write(b"previous value");
    capture_shell("printf new; exit 2", &mut buf).unwrap();
    assert_eq!(buf.as_str(), "new");
}

#[test]
fn small_auxiliary_buffer_truncates_too() {
    let mut buf = BoundedBuf::<4>::new();
    capture_shell("echo offline", &mut buf).unwrap();
    assert_eq!(buf.as_str(), "off");
}
