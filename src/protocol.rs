//! Wire format between the trigger client and the daemon.
//!
//! A message is exactly eight bytes: a `u64` in native byte order where bit
//! `i` asks for update `i` to run. Both ends live on the same host, so the
//! encoding is not meant to be portable.

use crate::error::{Result, StatusError};
use log::debug;
use std::fmt;
use std::fs;
use std::os::linux::net::SocketAddrExt;
use std::os::unix::fs::FileTypeExt;
use std::os::unix::net::{SocketAddr, UnixDatagram};
use std::path::PathBuf;
use std::str::FromStr;

/// Size of a well-formed message
pub const MESSAGE_LEN: usize = std::mem::size_of::<u64>();

/// Set of update positions carried by one message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Bitmask(pub u64);

impl Bitmask {
    pub const EMPTY: Bitmask = Bitmask(0);

    /// OR `1 << p` together for every position. Positions must be below 64.
    pub fn from_positions<I: IntoIterator<Item = u8>>(positions: I) -> Result<Self> {
        let mut bits = 0u64;
        for pos in positions {
            if usize::from(pos) >= u64::BITS as usize {
                return Err(StatusError::PositionOutOfRange(pos));
            }
            bits |= 1u64 << pos;
        }
        Ok(Self(bits))
    }

    /// Decode a received datagram; anything but exactly 8 bytes is malformed
    pub fn from_datagram(bytes: &[u8]) -> Result<Self> {
        let raw: [u8; MESSAGE_LEN] = bytes
            .try_into()
            .map_err(|_| StatusError::MalformedDatagram { len: bytes.len() })?;
        Ok(Self(u64::from_ne_bytes(raw)))
    }

    pub fn to_bytes(self) -> [u8; MESSAGE_LEN] {
        self.0.to_ne_bytes()
    }

    pub fn bits(self) -> u64 {
        self.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn contains(self, pos: usize) -> bool {
        pos < u64::BITS as usize && self.0 & (1u64 << pos) != 0
    }

    pub fn insert(&mut self, pos: usize) {
        if pos < u64::BITS as usize {
            self.0 |= 1u64 << pos;
        }
    }

    /// Set positions in ascending order
    pub fn positions(self) -> impl Iterator<Item = usize> {
        (0..u64::BITS as usize).filter(move |&pos| self.contains(pos))
    }

    /// Split into the bits below `count` and the bits at or above it
    pub fn split(self, count: usize) -> (Bitmask, Bitmask) {
        let valid = if count >= u64::BITS as usize {
            u64::MAX
        } else {
            (1u64 << count) - 1
        };
        (Bitmask(self.0 & valid), Bitmask(self.0 & !valid))
    }
}

impl fmt::Display for Bitmask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#018x}", self.0)
    }
}

/// Where the daemon listens.
///
/// Written `@name` for a Linux abstract-namespace socket, otherwise a
/// filesystem path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SocketName {
    Abstract(String),
    Path(PathBuf),
}

impl FromStr for SocketName {
    type Err = StatusError;

    fn from_str(s: &str) -> Result<Self> {
        match s.strip_prefix('@') {
            Some("") => Err(StatusError::config("abstract socket name is empty")),
            Some(name) => Ok(SocketName::Abstract(name.to_string())),
            None if s.is_empty() => Err(StatusError::config("socket name is empty")),
            None => Ok(SocketName::Path(PathBuf::from(s))),
        }
    }
}

impl fmt::Display for SocketName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SocketName::Abstract(name) => write!(f, "@{}", name),
            SocketName::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

impl SocketName {
    pub fn to_addr(&self) -> Result<SocketAddr> {
        let addr = match self {
            SocketName::Abstract(name) => SocketAddr::from_abstract_name(name.as_bytes())?,
            SocketName::Path(path) => SocketAddr::from_pathname(path)?,
        };
        Ok(addr)
    }

    /// Bind the daemon's receive socket. A stale socket file left behind by
    /// a previous daemon is removed first.
    pub fn bind(&self) -> Result<UnixDatagram> {
        if let SocketName::Path(path) = self {
            if let Ok(meta) = fs::symlink_metadata(path) {
                if meta.file_type().is_socket() {
                    debug!("removing stale socket {}", path.display());
                    fs::remove_file(path)?;
                }
            }
        }

        Ok(UnixDatagram::bind_addr(&self.to_addr()?)?)
    }

    /// Send one bitmask message from a fresh unbound socket
    pub fn send(&self, mask: Bitmask) -> Result<()> {
        self.send_raw(&mask.to_bytes())
    }

    /// Send arbitrary bytes as one datagram
    pub fn send_raw(&self, bytes: &[u8]) -> Result<()> {
        let socket = UnixDatagram::unbound()?;
        let sent = socket.send_to_addr(bytes, &self.to_addr()?)?;
        if sent != bytes.len() {
            return Err(StatusError::command(format!(
                "short send to {}: {} of {} bytes",
                self,
                sent,
                bytes.len()
            )));
        }
        Ok(())
    }
}
