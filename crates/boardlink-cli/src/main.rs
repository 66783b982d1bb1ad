//! CLI entry point.
//!
//! Parses arguments, composes the context, spawns the background
//! template bootstrap for the interactive commands, and dispatches to
//! the handlers.

use clap::Parser;

use boardlink_cli::{Cli, Commands, bootstrap, handlers};
use boardlink_core::spawn_background;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging; --verbose opts into debug-level output unless
    // RUST_LOG says otherwise.
    let default_filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .init();

    let ctx = bootstrap()?;

    // The interactive commands get the template bootstrap fire-and-forget;
    // the foreground `bootstrap` command runs it itself instead.
    let background = if matches!(cli.command, Some(Commands::Bootstrap) | None) {
        None
    } else {
        tracing::debug!("Spawning template bootstrap in the background");
        Some(spawn_background(ctx.installer.clone(), ctx.shutdown.clone()))
    };

    let Some(command) = cli.command else {
        // No command provided - show help
        use clap::CommandFactory;
        Cli::command().print_help()?;
        return Ok(());
    };

    let result = match command {
        Commands::Devices => handlers::devices::execute(&ctx).await,
        Commands::Target { device } => handlers::target::execute(&ctx, device).await,
        Commands::Bootstrap => handlers::templates::execute(&ctx).await,
    };

    // Host shutdown: stop waiting on any in-flight install promptly.
    ctx.shutdown.cancel();
    if let Some(handle) = background {
        let _ = handle.await;
    }

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(e.exit_code());
    }
    Ok(())
}
