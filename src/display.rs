use crate::data::FieldStore;
use crate::error::{Result, StatusError};
use crate::utils::command::command_exists;
use std::{
    env,
    io::{self, Write},
    process::{Command, Stdio},
};

const OPEN: &str = "[";
const SEPARATOR: &str = " |";
const CLOSE: &str = "]";

/// Program used to set the X root window name
pub const XSETROOT: &str = "xsetroot";

/// Format every field, in order, as `[a |b |c]`. Empty fields stay empty slots.
pub fn render(fields: &FieldStore) -> String {
    let mut line = String::with_capacity(fields.len() * (crate::data::FIELD_CAPACITY + 2) + 2);
    line.push_str(OPEN);
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            line.push_str(SEPARATOR);
        }
        line.push_str(&field.as_str());
    }
    line.push_str(CLOSE);
    line
}

/// Receives one rendered line per refresh
pub trait DisplaySink {
    fn show(&mut self, line: &str) -> Result<()>;
}

impl<S: DisplaySink + ?Sized> DisplaySink for Box<S> {
    fn show(&mut self, line: &str) -> Result<()> {
        (**self).show(line)
    }
}

/// Writes each line followed by a newline, flushing every time
#[derive(Debug)]
pub struct LineSink<W: Write> {
    writer: W,
}

pub type StdoutSink = LineSink<io::Stdout>;

impl<W: Write> LineSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl StdoutSink {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> DisplaySink for LineSink<W> {
    fn show(&mut self, line: &str) -> Result<()> {
        writeln!(self.writer, "{}", line)?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Sets the root window name, which dwm-style window managers draw as the
/// status bar text.
#[derive(Debug)]
pub struct RootWindowSink {
    program: String,
}

impl RootWindowSink {
    /// Fails when there is no X display to talk to
    pub fn connect() -> Result<Self> {
        match env::var_os("DISPLAY") {
            Some(display) if !display.is_empty() => {}
            _ => return Err(StatusError::display("DISPLAY is not set")),
        }

        if !command_exists(XSETROOT) {
            return Err(StatusError::display(format!("{} not found in PATH", XSETROOT)));
        }

        Ok(Self {
            program: XSETROOT.to_string(),
        })
    }
}

impl DisplaySink for RootWindowSink {
    fn show(&mut self, line: &str) -> Result<()> {
        let status = Command::new(&self.program)
            .arg("-name")
            .arg(line)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .status()?;

        if !status.success() {
            return Err(StatusError::display(format!(
                "{} exited with {}",
                self.program, status
            )));
        }
        Ok(())
    }
}
