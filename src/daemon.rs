//! Receive loop: decode trigger messages, run the selected updates, render.
//!
//! Everything runs on one thread. An update (including its child process)
//! finishes before the next one starts, and a message is fully dispatched and
//! rendered before the next message is read.

use crate::data::FieldStore;
use crate::display::{render, DisplaySink};
use crate::error::{Result, StatusError};
use crate::protocol::{Bitmask, SocketName};
use crate::registry::Registry;
use log::{debug, info, warn};
use std::io;
use std::os::unix::net::UnixDatagram;

/// Larger than a message so oversized datagrams show up with their excess
const RECV_BUF_LEN: usize = 16;

/// What one dispatch did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DispatchReport {
    /// Updates that ran, successfully or not
    pub executed: Bitmask,
    /// Subset of `executed` that reported a failure
    pub failed: Bitmask,
    /// Requested positions with no matching update
    pub ignored: Bitmask,
}

/// Field state plus the updates that write it
#[derive(Debug)]
pub struct Engine {
    registry: Registry,
    fields: FieldStore,
}

impl Engine {
    pub fn new(registry: Registry) -> Self {
        let fields = FieldStore::new(registry.len());
        Self { registry, fields }
    }

    pub fn fields(&self) -> &FieldStore {
        &self.fields
    }

    pub fn fields_mut(&mut self) -> &mut FieldStore {
        &mut self.fields
    }

    /// Run every update once, in order
    pub fn refresh_all(&mut self) -> DispatchReport {
        let (all, _) = Bitmask(u64::MAX).split(self.registry.len());
        self.dispatch(all)
    }

    /// Run the updates whose bit is set, lowest bit first.
    ///
    /// Bits with no matching update are reported and logged once, and never
    /// stop the valid bits from running.
    pub fn dispatch(&mut self, mask: Bitmask) -> DispatchReport {
        let (valid, ignored) = mask.split(self.registry.len());
        let mut report = DispatchReport {
            ignored,
            ..Default::default()
        };

        for index in valid.positions() {
            report.executed.insert(index);
            if !self.registry.run_logged(index, &mut self.fields) {
                report.failed.insert(index);
            }
        }

        if !ignored.is_empty() {
            warn!("ignoring out of bounds bit positions {}", ignored);
        }

        report
    }

    pub fn render(&self) -> String {
        render(&self.fields)
    }
}

/// Result of handling one datagram
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Dispatched(DispatchReport),
    /// Wrong-size datagram, dropped without touching any field
    Rejected { len: usize },
}

pub struct Daemon<S: DisplaySink> {
    socket: UnixDatagram,
    engine: Engine,
    sink: S,
}

impl<S: DisplaySink> Daemon<S> {
    pub fn new(socket: UnixDatagram, engine: Engine, sink: S) -> Self {
        Self {
            socket,
            engine,
            sink,
        }
    }

    /// Bind `name` and wrap it. Bind failure is fatal to the caller.
    pub fn bind(name: &SocketName, engine: Engine, sink: S) -> Result<Self> {
        let socket = name.bind()?;
        info!("listening on {}", name);
        Ok(Self::new(socket, engine, sink))
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Render the current fields and hand the line to the sink
    pub fn refresh(&mut self) {
        let line = self.engine.render();
        if let Err(err) = self.sink.show(&line) {
            warn!("failed to update display: {}", err);
        }
    }

    /// Run every update and render once
    pub fn start(&mut self) {
        let report = self.engine.refresh_all();
        debug!("startup refresh: {:?}", report);
        self.refresh();
    }

    /// Block for one datagram and handle it.
    ///
    /// Errors are fatal: a receive error, or a zero-length read, which this
    /// protocol treats as the socket having been closed.
    pub fn step(&mut self) -> Result<Outcome> {
        let mut buf = [0u8; RECV_BUF_LEN];
        let nbytes = loop {
            match self.socket.recv(&mut buf) {
                Ok(n) => break n,
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => return Err(StatusError::from(err)),
            }
        };

        if nbytes == 0 {
            return Err(StatusError::SocketClosed);
        }

        Ok(self.handle_datagram(&buf[..nbytes]))
    }

    /// Decode and dispatch one message, then render. Malformed messages
    /// are dropped without rendering.
    pub fn handle_datagram(&mut self, bytes: &[u8]) -> Outcome {
        let mask = match Bitmask::from_datagram(bytes) {
            Ok(mask) => mask,
            Err(err) => {
                warn!("{}, datagram discarded", err);
                return Outcome::Rejected { len: bytes.len() };
            }
        };

        debug!("dispatching {}", mask);
        let report = self.engine.dispatch(mask);
        self.refresh();
        Outcome::Dispatched(report)
    }

    /// Startup refresh, then serve until a fatal error
    pub fn run(mut self) -> Result<()> {
        self.start();
        loop {
            self.step()?;
        }
    }
}
