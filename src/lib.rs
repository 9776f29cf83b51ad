//! statusd library
//!
//! A small daemon that keeps a handful of host metrics (clock, load,
//! temperature, volume, memory, CPU governor, date) in fixed-size field
//! buffers, refreshes a chosen subset whenever a trigger client sends it a
//! bitmask over a local datagram socket, and renders all fields as one line.

pub mod error;
pub mod data;
pub mod collectors;
pub mod utils;
pub mod config;
pub mod registry;
pub mod protocol;
pub mod display;
pub mod daemon;

pub use config::{Config, SinkKind};
pub use daemon::{Daemon, DispatchReport, Engine, Outcome};
pub use data::{Field, FieldStore};
pub use display::{DisplaySink, LineSink, RootWindowSink, StdoutSink};
pub use error::{Result, StatusError};
pub use protocol::{Bitmask, SocketName};
pub use registry::{Registry, Update};
