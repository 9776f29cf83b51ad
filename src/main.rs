use clap::Parser;
use log::error;
use statusd::{
    Config, Daemon, DisplaySink, Engine, Registry, Result, RootWindowSink, SinkKind, StdoutSink,
};
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "statusd")]
#[command(author, version, about = "Status line daemon", long_about = None)]
struct Cli {
    /// Configuration file (default: ~/.config/statusd/config.toml)
    #[arg(short, long, value_name = "PATH")]
    config: Option<String>,

    /// Print the status line on stdout instead of setting the root window name
    #[arg(long)]
    stdout: bool,

    /// Run every update, show the line once and exit without binding the socket
    #[arg(long)]
    once: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("statusd: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn open_sink(config: &Config, force_stdout: bool) -> Result<Box<dyn DisplaySink>> {
    if force_stdout || config.sink == SinkKind::Stdout {
        return Ok(Box::new(StdoutSink::stdout()));
    }
    Ok(Box::new(RootWindowSink::connect()?))
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref())?;
    let mut engine = Engine::new(Registry::standard(&config));

    if cli.once {
        let mut sink = open_sink(&config, cli.stdout)?;
        engine.refresh_all();
        return sink.show(&engine.render());
    }

    let socket = config.socket_name()?;
    let sink = open_sink(&config, cli.stdout)?;
    Daemon::bind(&socket, engine, sink)?.run()
}
