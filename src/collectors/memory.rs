//! Memory usage from /proc/meminfo

use super::InternalUpdate;
use crate::data::FieldBuf;
use crate::error::{Result, StatusError};
use crate::utils::parsing::{format_memory, parse_meminfo};
use std::fs;
use std::path::PathBuf;

pub const DEFAULT_MEMINFO_PATH: &str = "/proc/meminfo";

#[derive(Debug, Clone)]
pub struct MemoryProbe {
    path: PathBuf,
}

impl MemoryProbe {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }
}

impl Default for MemoryProbe {
    fn default() -> Self {
        Self::new(DEFAULT_MEMINFO_PATH)
    }
}

impl InternalUpdate for MemoryProbe {
    fn name(&self) -> &str {
        "memory"
    }

    fn refresh(&mut self, out: &mut FieldBuf) -> Result<()> {
        let meminfo = fs::read_to_string(&self.path)?;
        let (total, available) = parse_meminfo(&meminfo).ok_or_else(|| {
            StatusError::parse(format!(
                "MemTotal/MemAvailable not found in {}",
                self.path.display()
            ))
        })?;

        out.write(format_memory(total, available).as_bytes());
        Ok(())
    }
}
