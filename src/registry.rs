//! The update table: one update per field, addressed by bit position

use crate::collectors::{GovernorReader, InternalUpdate, MemoryProbe, VolumeProbe};
use crate::config::Config;
use crate::data::{Field, FieldStore};
use crate::error::{Result, StatusError};
use crate::utils::command::capture_shell;
use log::{debug, warn};
use std::fmt;

pub const TIME_CMD: &str = "date +%H:%M:%S";
pub const LOAD_CMD: &str =
    r#"uptime | grep -wo "average: .*," | cut --delimiter=' ' -f2 | head -c4"#;
pub const TEMP_CMD: &str = r#"sensors | grep -F "Core 0" | awk '{print $3}' | cut -c2-5"#;
pub const DATE_CMD: &str = "date +'%a %d %b'";

/// A bitmask message can address at most this many updates
pub const MAX_UPDATES: usize = 64;

/// How an update refreshes its field
pub enum Action {
    /// Run the template through the shell and store its trimmed output
    Shell(String),
    Internal(Box<dyn InternalUpdate>),
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Shell(cmd) => f.debug_tuple("Shell").field(cmd).finish(),
            Action::Internal(update) => f.debug_tuple("Internal").field(&update.name()).finish(),
        }
    }
}

#[derive(Debug)]
pub struct Update {
    field: usize,
    action: Action,
}

impl Update {
    pub fn shell<S: Into<String>>(field: usize, command: S) -> Self {
        Self {
            field,
            action: Action::Shell(command.into()),
        }
    }

    pub fn internal<U: InternalUpdate + 'static>(field: usize, update: U) -> Self {
        Self {
            field,
            action: Action::Internal(Box::new(update)),
        }
    }

    pub fn field(&self) -> usize {
        self.field
    }

    pub fn action(&self) -> &Action {
        &self.action
    }

    fn describe(&self) -> &str {
        match &self.action {
            Action::Shell(cmd) => cmd,
            Action::Internal(update) => update.name(),
        }
    }
}

/// Ordered, fixed set of updates. Built once at startup and never resized.
#[derive(Debug)]
pub struct Registry {
    updates: Vec<Update>,
}

impl Registry {
    /// Build a registry, checking that every field is owned by exactly one
    /// update and that the table fits in a 64-bit mask.
    pub fn new(updates: Vec<Update>) -> Result<Self> {
        if updates.is_empty() || updates.len() > MAX_UPDATES {
            return Err(StatusError::registry(format!(
                "expected 1..={} updates, got {}",
                MAX_UPDATES,
                updates.len()
            )));
        }

        let mut owned = vec![false; updates.len()];
        for (index, update) in updates.iter().enumerate() {
            match owned.get_mut(update.field) {
                Some(slot) if !*slot => *slot = true,
                Some(_) => {
                    return Err(StatusError::registry(format!(
                        "update {} targets field {} which already has an update",
                        index, update.field
                    )))
                }
                None => {
                    return Err(StatusError::registry(format!(
                        "update {} targets field {} but only {} fields exist",
                        index,
                        update.field,
                        updates.len()
                    )))
                }
            }
        }

        Ok(Self { updates })
    }

    /// The built-in table, with command templates and paths from `config`
    pub fn standard(config: &Config) -> Self {
        Self {
            updates: standard_updates(config),
        }
    }

    pub fn len(&self) -> usize {
        self.updates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.updates.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Update> {
        self.updates.get(index)
    }

    /// Run update `index`. The target field is cleared first, whatever the outcome.
    pub fn run(&mut self, index: usize, fields: &mut FieldStore) -> Result<()> {
        let update = self
            .updates
            .get_mut(index)
            .ok_or_else(|| StatusError::registry(format!("no update at index {}", index)))?;
        let out = fields.get_mut(update.field).ok_or_else(|| {
            StatusError::registry(format!("field {} is not in the store", update.field))
        })?;

        out.clear();
        match &mut update.action {
            Action::Shell(cmd) => capture_shell(cmd, out),
            Action::Internal(internal) => internal.refresh(out),
        }
    }

    /// Run update `index`, logging instead of returning a failure
    pub fn run_logged(&mut self, index: usize, fields: &mut FieldStore) -> bool {
        match self.run(index, fields) {
            Ok(()) => {
                debug!("update {} refreshed", index);
                true
            }
            Err(err) => {
                let what = self.get(index).map(Update::describe).unwrap_or("?");
                warn!("update {} ({}) failed: {}", index, what, err);
                false
            }
        }
    }
}

fn standard_updates(config: &Config) -> Vec<Update> {
    let commands = &config.commands;
    Field::ALL
        .iter()
        .map(|&field| {
            let index = field.index();
            debug!("field {} ({}) registered", index, field.name());
            match field {
                Field::Time => Update::shell(index, commands.time.as_str()),
                Field::Load => Update::shell(index, commands.load.as_str()),
                Field::Temp => Update::shell(index, commands.temp.as_str()),
                Field::Volume => Update::internal(
                    index,
                    VolumeProbe::new(
                        commands.volume_level.as_str(),
                        commands.volume_mute.as_str(),
                    ),
                ),
                Field::Memory => Update::internal(index, MemoryProbe::new(&config.meminfo_path)),
                Field::Governor => {
                    Update::internal(index, GovernorReader::new(&config.governor_path))
                }
                Field::Date => Update::shell(index, commands.date.as_str()),
            }
        })
        .collect()
}
