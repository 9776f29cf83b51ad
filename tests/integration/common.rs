use statusd::{Engine, LineSink, Registry, SocketName, Update};
use std::sync::atomic::{AtomicUsize, Ordering};

static NEXT_SOCKET: AtomicUsize = AtomicUsize::new(0);

/// Abstract socket name unique to this test process and call
pub fn unique_socket() -> SocketName {
    let n = NEXT_SOCKET.fetch_add(1, Ordering::Relaxed);
    SocketName::Abstract(format!("statusd-test-{}-{}", std::process::id(), n))
}

/// Engine whose update `i` runs `commands[i]`
pub fn shell_engine(commands: &[&str]) -> Engine {
    let updates = commands
        .iter()
        .enumerate()
        .map(|(i, cmd)| Update::shell(i, *cmd))
        .collect();
    Engine::new(Registry::new(updates).unwrap())
}

pub type Recorder = LineSink<Vec<u8>>;

pub fn recorder() -> Recorder {
    LineSink::new(Vec::new())
}

pub fn lines(sink: &Recorder) -> Vec<String> {
    String::from_utf8(sink.get_ref().clone())
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}
