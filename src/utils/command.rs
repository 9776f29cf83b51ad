//! Command execution utilities

use crate::data::BoundedBuf;
use crate::error::{Result, StatusError};
use log::{debug, warn};
use std::io::{self, ErrorKind, Read};
use std::process::{Child, Command, ExitStatus, Stdio};

/// Shell every command template is handed to
pub const SHELL: &str = "/bin/sh";

/// Owns a spawned child and guarantees it is waited for.
struct Reaper {
    child: Child,
}

impl Reaper {
    fn reap(&mut self) -> io::Result<ExitStatus> {
        // Our end of the pipe goes first so a child still writing gets EPIPE
        drop(self.child.stdout.take());
        self.child.wait()
    }
}

impl Drop for Reaper {
    fn drop(&mut self) {
        if let Err(err) = self.reap() {
            warn!("failed to reap child {}: {}", self.child.id(), err);
        }
    }
}

/// Run `command` through `/bin/sh -c` and capture its stdout into `out`.
///
/// `out` is cleared before anything else happens. At most `CAP - 1` bytes
/// are kept; anything beyond that is discarded without error. If the last
/// byte kept is a newline it is stripped; newlines inside the value become
/// spaces.
/// The child is always reaped before this returns, on every path.
///
/// On a read failure `out` keeps whatever was captured up to that point.
pub fn capture_shell<const CAP: usize>(command: &str, out: &mut BoundedBuf<CAP>) -> Result<()> {
    out.clear();
    if out.capacity() < 2 {
        return Err(StatusError::CapacityTooSmall(out.capacity()));
    }

    let child = Command::new(SHELL)
        .arg("-c")
        .arg(command)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .spawn()
        .map_err(|err| StatusError::command(format!("failed to spawn `{}`: {}", command, err)))?;
    let mut reaper = Reaper { child };

    let stdout = reaper
        .child
        .stdout
        .as_mut()
        .ok_or_else(|| StatusError::command("child stdout was not captured"))?;

    let read = read_bounded(stdout, out);
    out.normalize_newlines();
    let nbytes =
        read.map_err(|err| StatusError::command(format!("read from `{}` failed: {}", command, err)))?;

    match reaper.reap() {
        Ok(status) if !status.success() => {
            debug!("`{}` exited with {} after {} bytes", command, status, nbytes)
        }
        Ok(_) => {}
        Err(err) => warn!("failed to reap `{}`: {}", command, err),
    }

    Ok(())
}

/// Fill the spare room of `out` from `reader` until end-of-stream or until
/// the buffer is full. Interrupted reads are retried.
pub(crate) fn read_bounded<R: Read, const CAP: usize>(
    reader: &mut R,
    out: &mut BoundedBuf<CAP>,
) -> io::Result<usize> {
    let mut total = 0;
    loop {
        let spare = out.spare_mut();
        if spare.is_empty() {
            break;
        }

        match reader.read(spare) {
            Ok(0) => break,
            Ok(n) => {
                out.advance(n);
                total += n;
            }
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) => return Err(err),
        }
    }
    Ok(total)
}

/// Check if a command exists in PATH
pub fn command_exists(program: &str) -> bool {
    use std::env;

    if let Ok(path) = env::var("PATH") {
        for dir in path.split(':') {
            let full_path = std::path::Path::new(dir).join(program);
            if full_path.exists() && full_path.is_file() {
                return true;
            }
        }
    }
    false
}
