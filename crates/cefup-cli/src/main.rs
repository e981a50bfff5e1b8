//! cefup - fetch, patch, and compile the ExaequOS CEF application.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cefup_core::{pipeline, BuildProfile, PipelineError, Platform, ReleaseConfig, Workspace};

mod output;

use output::Console;

/// Fetch the prebuilt Chromium Embedded Framework, rebrand its bundled
/// example, compile it, and install the artifacts into a delivery folder.
#[derive(Parser)]
#[command(name = "cefup", version, about)]
struct Cli {
    /// CMake build type for the CEF example target
    #[arg(long, default_value_t = BuildProfile::Release)]
    target: BuildProfile,

    /// CEF version to download (as listed on the Spotify CDN index)
    #[arg(long)]
    cef_version: Option<String>,

    /// Default URL baked into the patched application
    #[arg(long)]
    url: Option<String>,

    /// Product name replacing `cefsimple` in sources and build files
    #[arg(long)]
    app_name: Option<String>,

    /// Parallel job count for the native build (defaults to logical CPUs)
    #[arg(short, long)]
    jobs: Option<usize>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let console = Console::new();

    if let Err(err) = run(cli, &console).await {
        let code = err.exit_code();
        console.fatal(&err.to_string());
        std::process::exit(code);
    }
}

async fn run(cli: Cli, console: &Console) -> Result<(), PipelineError> {
    let mut config = ReleaseConfig {
        profile: cli.target,
        ..ReleaseConfig::default()
    };
    if let Some(version) = cli.cef_version {
        config.cef_version = version;
    }
    if let Some(url) = cli.url {
        config.default_url = url;
    }
    if let Some(app_name) = cli.app_name {
        config.app_name = app_name;
    }
    if let Some(jobs) = cli.jobs {
        config.jobs = jobs;
    }

    let platform = Platform::current()?;
    let root = std::env::current_dir()?;
    let workspace = Workspace::new(root, &config.app_name);

    pipeline::run(&config, &workspace, platform, console).await
}
