//! CPU frequency governor, read from cpufreq sysfs

use super::InternalUpdate;
use crate::data::FieldBuf;
use crate::error::Result;
use crate::utils::file::CachedFile;
use crate::utils::parsing::{governor_code, UNKNOWN_GOVERNOR};
use log::warn;
use std::path::PathBuf;

pub const DEFAULT_GOVERNOR_PATH: &str = "/sys/devices/system/cpu/cpu0/cpufreq/scaling_governor";

/// Longest governor name we care about is 12 bytes plus newline
const READ_SIZE: usize = 32;

/// Reports the active governor as a one-letter code.
///
/// The sysfs descriptor stays open between refreshes.
#[derive(Debug)]
pub struct GovernorReader {
    file: CachedFile,
}

impl GovernorReader {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            file: CachedFile::new(path),
        }
    }

    pub fn is_open(&self) -> bool {
        self.file.is_open()
    }
}

impl Default for GovernorReader {
    fn default() -> Self {
        Self::new(DEFAULT_GOVERNOR_PATH)
    }
}

impl InternalUpdate for GovernorReader {
    fn name(&self) -> &str {
        "governor"
    }

    fn refresh(&mut self, out: &mut FieldBuf) -> Result<()> {
        let mut raw = [0u8; READ_SIZE];
        let code = match self.file.reread(&mut raw) {
            Ok(0) => {
                warn!(
                    "{} returned no data, reopening on next refresh",
                    self.file.path().display()
                );
                UNKNOWN_GOVERNOR
            }
            Ok(n) => governor_code(&String::from_utf8_lossy(&raw[..n])),
            Err(err) => {
                out.write(UNKNOWN_GOVERNOR.as_bytes());
                return Err(err);
            }
        };

        out.write(code.as_bytes());
        Ok(())
    }
}
