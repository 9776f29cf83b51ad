//! File reading utilities

use crate::error::{Result, StatusError};
use std::ffi::CString;
use std::io;
use std::os::fd::{AsRawFd, FromRawFd, OwnedFd};
use std::os::unix::ffi::OsStrExt;
use std::path::{Path, PathBuf};

/// A small kernel interface file that is kept open between reads.
///
/// The descriptor is opened on first use and reused afterwards; each read
/// seeks back to the start. When a read comes back empty or fails, the
/// descriptor is dropped so the next read starts from a fresh `open`.
#[derive(Debug)]
pub struct CachedFile {
    path: PathBuf,
    fd: Option<OwnedFd>,
}

impl CachedFile {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: path.into(),
            fd: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_open(&self) -> bool {
        self.fd.is_some()
    }

    /// Forget the cached descriptor
    pub fn reset(&mut self) {
        self.fd = None;
    }

    /// Read the file from offset 0 into `buf`, returning the byte count.
    ///
    /// A return of `Ok(0)` means the kernel reported end-of-stream straight
    /// away; the descriptor has already been reset in that case.
    pub fn reread(&mut self, buf: &mut [u8]) -> Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }

        let fd = match self.fd.take() {
            Some(fd) => fd,
            None => open_read_only(&self.path)?,
        };

        // Use direct syscalls; this runs on every governor refresh
        let raw = fd.as_raw_fd();
        if unsafe { libc::lseek(raw, 0, libc::SEEK_SET) } < 0 {
            return Err(StatusError::from(io::Error::last_os_error()));
        }

        loop {
            let nbytes =
                unsafe { libc::read(raw, buf.as_mut_ptr() as *mut libc::c_void, buf.len()) };
            if nbytes < 0 {
                let err = io::Error::last_os_error();
                if err.kind() == io::ErrorKind::Interrupted {
                    continue;
                }
                return Err(StatusError::from(err));
            }

            if nbytes == 0 {
                // fd dropped here, next call reopens
                return Ok(0);
            }

            self.fd = Some(fd);
            return Ok(nbytes as usize);
        }
    }
}

fn open_read_only(path: &Path) -> Result<OwnedFd> {
    let path_cstr = CString::new(path.as_os_str().as_bytes())
        .map_err(|_| StatusError::config(format!("invalid path {}", path.display())))?;

    let fd = unsafe { libc::open(path_cstr.as_ptr(), libc::O_RDONLY | libc::O_CLOEXEC) };
    if fd < 0 {
        return Err(StatusError::from(io::Error::last_os_error()));
    }

    Ok(unsafe { OwnedFd::from_raw_fd(fd) })
}
