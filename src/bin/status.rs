use clap::Parser;
use statusd::{Bitmask, Config, Result, SocketName};
use std::process::ExitCode;

/// Ask statusd to refresh some of its fields
#[derive(Parser, Debug)]
#[command(name = "status")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file used to look up the daemon socket
    #[arg(short, long, value_name = "PATH")]
    config: Option<String>,

    /// Daemon socket, `@name` for the abstract namespace (overrides the config)
    #[arg(short, long, value_name = "NAME")]
    socket: Option<String>,

    /// Field positions to refresh: 0 time, 1 load, 2 temp, 3 volume, 4 memory, 5 governor, 6 date
    #[arg(required = true, value_name = "POSITION", value_parser = clap::value_parser!(u8).range(0..64))]
    positions: Vec<u8>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match send(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("status: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn send(cli: &Cli) -> Result<()> {
    let mask = Bitmask::from_positions(cli.positions.iter().copied())?;
    let socket: SocketName = match &cli.socket {
        Some(name) => name.parse()?,
        None => Config::load(cli.config.as_deref())?.socket_name()?,
    };
    socket.send(mask)
}
