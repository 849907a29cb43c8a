mod calculator;
mod cli;
mod config;
mod repl;
mod server;

use std::net::SocketAddr;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use calculator::{ERROR_MARKER, EvaluationResult, evaluate_expression};
use cli::{Cli, Commands};
use config::Config;

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn eval(expression: &[String]) -> Result<()> {
    let expression = expression.join(" ");

    match evaluate_expression(&expression) {
        None => {}
        Some(EvaluationResult::Error(err)) => anyhow::bail!("{}: {}", ERROR_MARKER, err),
        Some(result) => println!("{}", result.display()),
    }
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load(cli.config.as_deref())?;

    match cli.command.unwrap_or(Commands::Repl) {
        Commands::Repl => repl::run(config.calculator.error_clear_delay()).await,
        Commands::Eval { expression } => eval(&expression),
        Commands::Serve { host, port, root } => {
            let server = config.server;
            let addr = SocketAddr::new(host.unwrap_or(server.host), port.unwrap_or(server.port));
            server::serve(addr, root.unwrap_or(server.root)).await
        }
    }
}
