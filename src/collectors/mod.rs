//! Updates computed inside the daemon rather than by a single shell command

pub mod governor;
pub mod memory;
pub mod volume;

use crate::data::FieldBuf;
use crate::error::Result;

pub use governor::GovernorReader;
pub use memory::MemoryProbe;
pub use volume::VolumeProbe;

/// A parameterless computation that writes straight into its field.
///
/// The registry clears the field before calling `refresh`. Implementations
/// keep their I/O bounded and report failures instead of panicking; the
/// caller logs them and moves on.
pub trait InternalUpdate {
    fn name(&self) -> &str;

    fn refresh(&mut self, out: &mut FieldBuf) -> Result<()>;
}
