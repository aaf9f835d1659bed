use anyhow::Result;
use clap::Parser;
use conveyor_client::api::{format_api_error, ConveyorClient, Session};
use conveyor_client::cli::{Cli, LogLevel};
use conveyor_client::commands::{self, Context};
use conveyor_client::config::Config;
use conveyor_client::output;
use conveyor_client::ConveyorError;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::fmt::writer::MakeWriterExt;

fn setup_logging(level: LogLevel) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let tracing_level = level.to_tracing_level()?;

    let log_path = get_log_path();

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let file = match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    {
        Ok(file) => file,
        Err(e) => {
            output::print_warning(&format!("Logging disabled: cannot open {:?}: {}", log_path, e));
            return None;
        }
    };

    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    tracing_subscriber::fmt()
        .with_max_level(tracing_level)
        .with_writer(non_blocking.with_max_level(tracing_level))
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("conveyor started with log level: {:?}", level);
    tracing::info!("Log file: {:?}", log_path);

    Some(guard)
}

fn get_log_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        return config_dir.join("conveyor").join("conveyor.log");
    }
    if let Some(home) = dirs::home_dir() {
        return home.join(".conveyor").join("conveyor.log");
    }
    PathBuf::from("conveyor.log")
}

/// User-facing line for a failed command
fn error_message(err: &anyhow::Error) -> String {
    match err.downcast_ref::<ConveyorError>() {
        Some(e) => format_api_error(e),
        None => format!("{:#}", err),
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load();

    let endpoint = config.effective_endpoint(cli.os_url.as_deref());
    let session = Session::new(
        config.effective_token(cli.os_token.as_deref()),
        config.effective_project_id(cli.os_project_id.as_deref()),
    );
    tracing::info!("Using endpoint: {}", endpoint);

    let ctx = Context {
        client: ConveyorClient::new(&endpoint, session)?,
        format: config.effective_output(cli.output),
        poll_interval: config.poll_interval(),
    };

    commands::run(cli.command, &ctx).await
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let _log_guard = setup_logging(cli.log_level);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("Command failed: {:#}", err);
            output::print_error(&error_message(&err));
            ExitCode::FAILURE
        }
    }
}
