use super::common::{lines, recorder, shell_engine, unique_socket};
use statusd::{Bitmask, Daemon, Outcome, SocketName, StatusError};
use tempfile::TempDir;

#[test]
fn client_message_refreshes_selected_fields() {
    let name = unique_socket();
    let mut engine = shell_engine(&["echo a", "echo b", "echo c"]);
    engine.fields_mut().write(1, b"keep");
    let mut daemon = Daemon::bind(&name, engine, recorder()).unwrap();

    name.send(Bitmask::from_positions([0, 2]).unwrap()).unwrap();
    let outcome = daemon.step().unwrap();

    match outcome {
        Outcome::Dispatched(report) => assert_eq!(report.executed, Bitmask(0b101)),
        other => panic!("unexpected outcome {:?}", other),
    }
    assert_eq!(lines(daemon.sink()), vec!["[a |keep |c]"]);
}

#[test]
fn positions_0_3_7_arrive_as_137() {
    let name = unique_socket();
    let commands = ["echo x"; 8];
    let mut daemon = Daemon::bind(&name, shell_engine(&commands), recorder()).unwrap();

    let mask = Bitmask::from_positions([0, 3, 7]).unwrap();
    assert_eq!(mask.bits(), 137);
    name.send(mask).unwrap();

    match daemon.step().unwrap() {
        Outcome::Dispatched(report) => {
            assert_eq!(report.executed.positions().collect::<Vec<_>>(), vec![0, 3, 7]);
            assert!(report.ignored.is_empty());
        }
        other => panic!("unexpected outcome {:?}", other),
    }
}

#[test]
fn wrong_size_datagrams_are_dropped_without_render() {
    let name = unique_socket();
    let mut engine = shell_engine(&["echo a", "echo b"]);
    engine.fields_mut().write(0, b"before");
    let mut daemon = Daemon::bind(&name, engine, recorder()).unwrap();

    for len in [7usize, 9, 32] {
        name.send_raw(&vec![0xff; len]).unwrap();
        let expected_len = len.min(16);
        assert_eq!(
            daemon.step().unwrap(),
            Outcome::Rejected { len: expected_len }
        );
    }

    assert!(lines(daemon.sink()).is_empty());
    assert_eq!(daemon.engine().render(), "[before |]");
}

#[test]
fn out_of_range_bits_are_ignored_but_valid_bits_run() {
    let name = unique_socket();
    let mut daemon = Daemon::bind(&name, shell_engine(&["echo a", "echo b"]), recorder()).unwrap();

    name.send(Bitmask((1 << 1) | (1 << 5) | (1 << 63))).unwrap();
    match daemon.step().unwrap() {
        Outcome::Dispatched(report) => {
            assert_eq!(report.executed, Bitmask(1 << 1));
            assert_eq!(report.ignored, Bitmask((1 << 5) | (1 << 63)));
        }
        other => panic!("unexpected outcome {:?}", other),
    }
    assert_eq!(lines(daemon.sink()), vec!["[ |b]"]);
}

#[test]
fn empty_datagram_is_fatal() {
    let name = unique_socket();
    let mut daemon = Daemon::bind(&name, shell_engine(&["echo a"]), recorder()).unwrap();

    name.send_raw(&[]).unwrap();
    assert!(matches!(daemon.step(), Err(StatusError::SocketClosed)));
}

#[test]
fn back_to_back_messages_render_in_order() {
    let name = unique_socket();
    let engine = shell_engine(&["sleep 0.2; echo slow", "echo fast"]);
    let mut daemon = Daemon::bind(&name, engine, recorder()).unwrap();

    name.send(Bitmask(0b01)).unwrap();
    name.send(Bitmask(0b10)).unwrap();
    daemon.step().unwrap();
    daemon.step().unwrap();

    assert_eq!(lines(daemon.sink()), vec!["[slow |]", "[slow |fast]"]);
}

#[test]
fn start_runs_everything_and_renders_once() {
    let name = unique_socket();
    let mut daemon = Daemon::bind(&name, shell_engine(&["echo a", "echo b"]), recorder()).unwrap();

    daemon.start();
    assert_eq!(lines(daemon.sink()), vec!["[a |b]"]);
}

#[test]
fn second_bind_on_same_abstract_name_fails() {
    let name = unique_socket();
    let _first = Daemon::bind(&name, shell_engine(&["echo a"]), recorder()).unwrap();
    assert!(Daemon::bind(&name, shell_engine(&["echo a"]), recorder()).is_err());
}

#[test]
fn path_socket_replaces_stale_file() {
    let dir = TempDir::new().unwrap();
    let name = SocketName::Path(dir.path().join("statusd.sock"));

    let first = Daemon::bind(&name, shell_engine(&["echo a"]), recorder()).unwrap();
    drop(first);

    let mut daemon = Daemon::bind(&name, shell_engine(&["echo a"]), recorder()).unwrap();
    name.send(Bitmask(1)).unwrap();
    assert!(matches!(daemon.step().unwrap(), Outcome::Dispatched(_)));
    assert_eq!(lines(daemon.sink()), vec!["[a]"]);
}

#[test]
fn sending_to_missing_daemon_fails() {
    let name = unique_socket();
    assert!(name.send(Bitmask(1)).is_err());
}
