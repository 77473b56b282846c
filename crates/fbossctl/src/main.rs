mod color;
mod error;
mod families;
mod logging;
mod out;
mod util;

use std::{
    io::{stderr, stdout, IsTerminal as _, Write},
    process::ExitCode,
    time::Duration,
};

use clap::Parser as _;
use fboss_config::Config;
use fboss_core::neighbor::FlushType;
use fboss_sdk::ConnectionBuilder;
use fbossctl_commands::command::{Cli, Families};
use futures::{stream::BoxStream, StreamExt as _};

use crate::{
    error::{CtlError, CtlResult},
    families::neighbor::NeighborTable,
    out::CommandOutput,
    util::CommandFamily,
};

impl CommandFamily for Families {
    fn run(self, agent: ConnectionBuilder) -> BoxStream<'static, CtlResult<CommandOutput>> {
        match self {
            Families::Flush(cmd) => cmd.run(agent),
            Families::Arp(command) => NeighborTable {
                flush_type: FlushType::Arp,
                command,
            }
            .run(agent),
            Families::Ndp(command) => NeighborTable {
                flush_type: FlushType::Ndp,
                command,
            }
            .run(agent),
            Families::Config(cmd) => cmd.run(agent),
            Families::Verbosity(cmd) => cmd.run(agent),
        }
    }
}

/// Command-line options win over the config file, which wins over the built-in defaults.
fn connection_builder(cli: &Cli, config: &Config) -> ConnectionBuilder {
    let mut builder = ConnectionBuilder::new();

    if let Some(host) = cli.host.as_ref().or(config.host.as_ref()) {
        builder = builder.host(host.as_str());
    }
    if let Some(port) = cli.port.or(config.port) {
        builder = builder.port(port);
    }
    // A timeout of 0 means no timeout, also when it overrides a configured one.
    let timeout = match cli.timeout {
        Some(ms) => (ms > 0).then(|| Duration::from_millis(ms)),
        None => config.timeout(),
    };
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }

    builder
}

async fn run(cli: Cli) -> CtlResult<()> {
    let config = Config::load(cli.config_file.as_ref())?;
    logging::init(cli.log_level.unwrap_or(config.log_level));

    let agent = connection_builder(&cli, &config);
    tracing::debug!(?agent, "Resolved agent connection settings");

    let Cli { command, json, .. } = cli;

    let is_tty = stdout().is_terminal();
    let mut stdout = stdout().lock();

    let theme = is_tty.then(color::Theme::default);

    let mut output_stream = command.run(agent);

    while let Some(output) = output_stream.next().await {
        let command_output = output?;

        if json {
            command_output.write_json(&mut stdout, is_tty)?;
        } else {
            command_output.write(&mut stdout, theme.as_ref(), is_tty)?;
        }
    }

    match stdout.flush() {
        Err(e) if e.kind() != std::io::ErrorKind::BrokenPipe => Err(e.into()),
        _ => Ok(()),
    }
}

/// Prints `error` and returns the exit code for it. Errors the agent reported go to stdout like
/// any other command result; everything else is a diagnostic on stderr.
fn report(error: CtlError, stdout: &mut dyn Write, stderr: &mut dyn Write) -> u8 {
    let code = error.exit_code();
    let written = if let CtlError::Agent(_) = &error {
        writeln!(stdout, "{error}")
    } else {
        writeln!(stderr, "{:?}", miette::Report::new(error))
    };
    // Nowhere left to report a failed write to.
    written.ok();

    code
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => ExitCode::from(report(error, &mut stdout(), &mut stderr())),
    }
}
