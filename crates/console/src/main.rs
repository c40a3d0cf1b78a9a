use std::path::PathBuf;
use std::process::ExitCode;
use std::rc::Rc;

use clap::Parser;
use omni_widget::{HostBindings, ReqwestTransport, TracingDiagnostics, mount};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::LocalSet;
use tracing_subscriber::EnvFilter;

mod command;
mod runtime;
mod settings;
mod surface;

use command::ConsoleCommand;
use runtime::TokioRuntime;
use settings::ConsoleSettings;
use surface::TerminalSurface;

/// Terminal host for the Omni chat widget.
#[derive(Debug, Parser)]
#[command(name = "omni-widget-console", version)]
struct Cli {
    /// Settings file (defaults to the user config directory).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Open the chat window right after mounting.
    #[arg(long)]
    open: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let path = cli
        .config
        .unwrap_or_else(ConsoleSettings::default_config_path);

    let settings = match ConsoleSettings::load(&path) {
        Ok(settings) => settings,
        Err(error) => {
            tracing::error!(error = %error, "failed to load console settings");
            return ExitCode::FAILURE;
        }
    };

    LocalSet::new().run_until(run(settings, cli.open)).await
}

async fn run(settings: ConsoleSettings, open: bool) -> ExitCode {
    let host = HostBindings {
        surface: Box::new(TerminalSurface::stdout()),
        transport: Rc::new(ReqwestTransport::new()),
        runtime: Rc::new(TokioRuntime),
        diagnostics: Rc::new(TracingDiagnostics),
    };

    // Rejections are logged by the diagnostics sink.
    let Ok(handle) = mount(&settings, host) else {
        return ExitCode::FAILURE;
    };
    if open {
        handle.toggle();
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => match ConsoleCommand::parse(&line) {
                ConsoleCommand::Toggle => {
                    handle.toggle();
                }
                ConsoleCommand::Quit => break,
                // Awaited in place: stdin is the only input, so turns never overlap.
                ConsoleCommand::Submit(input) => {
                    let outcome = handle.submit(&input).await;
                    tracing::debug!(?outcome, "turn finished");
                }
            },
            Ok(None) => break,
            Err(error) => {
                tracing::error!(error = %error, "failed to read stdin");
                break;
            }
        }
    }

    ExitCode::SUCCESS
}
