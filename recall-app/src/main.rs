mod api;
mod cli;
mod tui;

use anyhow::Result;
use clap::Parser; // needed for Cli::parse()
use std::io;
use std::sync::Arc;
use tokio::runtime::Runtime;
use tracing::error;
use tracing_subscriber::EnvFilter;

use cli::commands::{open_store, run_cli};
use cli::opts::{Cli, Command};
use tui::app::TuiApp;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    let args = Cli::parse();
    let res = match &args.cmd {
        // Run TUI on its own thread/runtime (no nested Tokio)
        Command::Tui => {
            let rt = Arc::new(Runtime::new()?);
            let store = rt.block_on(open_store(&args))?;
            let mut app = TuiApp::new(store, args.unit.into(), rt);
            app.run()
        }
        // Everything else uses a single runtime here
        _ => {
            let rt = Runtime::new()?;
            rt.block_on(run_cli(args))
        }
    };
    if let Err(e) = res {
        error!("{e:#}");
        std::process::exit(1);
    }
    Ok(())
}
