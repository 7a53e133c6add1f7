//! # Dotforge
//!
//! Export embedded display source code from a Dotforge project document.

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use dotforge_cli::CliArgs;

/// Initialize structured tracing on stderr, keeping stdout free for
/// generated source.
///
/// Set `RUST_LOG` to control log levels (default:
/// `info,dotforge_core=debug,dotforge_codegen=debug`).
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,dotforge_core=debug,dotforge_codegen=debug"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let args = CliArgs::parse();

    if args.list_platforms {
        print!("{}", dotforge_cli::platform_table());
        return Ok(());
    }

    let Some(project) = args.project else {
        anyhow::bail!("a project file is required (see --help)");
    };
    let source = dotforge_cli::export_project(&project, args.platform.as_deref())?;

    match args.output {
        Some(path) => {
            std::fs::write(&path, &source)
                .with_context(|| format!("writing {}", path.display()))?;
            tracing::info!("Wrote {} bytes to {}", source.len(), path.display());
        }
        None => print!("{source}"),
    }
    Ok(())
}
