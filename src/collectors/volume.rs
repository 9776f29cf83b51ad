//! Master volume with a mute marker

use super::InternalUpdate;
use crate::data::{BoundedBuf, FieldBuf};
use crate::error::Result;
use crate::utils::command::capture_shell;

pub const DEFAULT_LEVEL_CMD: &str = r"amixer get Master | grep -o '[0-9]*%' | head -n1";
pub const DEFAULT_MUTE_CMD: &str =
    r"amixer get Master | grep -o '\[o[nf]*\]' | head -n1 | tr -d '[]'";

/// Appended to the level when the mixer reports the switch as `off`
pub const MUTE_MARKER: &str = "M";

/// Scratch space for the mute switch state (`on` / `off`)
type MuteBuf = BoundedBuf<8>;

/// Runs the level command into the field, then the mute command into a
/// scratch buffer.
#[derive(Debug, Clone)]
pub struct VolumeProbe {
    level_cmd: String,
    mute_cmd: String,
}

impl VolumeProbe {
    pub fn new<L: Into<String>, M: Into<String>>(level_cmd: L, mute_cmd: M) -> Self {
        Self {
            level_cmd: level_cmd.into(),
            mute_cmd: mute_cmd.into(),
        }
    }
}

impl Default for VolumeProbe {
    fn default() -> Self {
        Self::new(DEFAULT_LEVEL_CMD, DEFAULT_MUTE_CMD)
    }
}

impl InternalUpdate for VolumeProbe {
    fn name(&self) -> &str {
        "volume"
    }

    fn refresh(&mut self, out: &mut FieldBuf) -> Result<()> {
        capture_shell(&self.level_cmd, out)?;

        let mut mute = MuteBuf::new();
        capture_shell(&self.mute_cmd, &mut mute)?;
        if mute.as_bytes() == b"off" {
            out.push_str(MUTE_MARKER);
        }
        Ok(())
    }
}
