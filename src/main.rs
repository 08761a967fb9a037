mod commands;
mod libs;
mod logger;
mod schemas;

use clap::Parser;
use colored::Colorize;
use commands::install;
use libs::utilities::assets::UreqTransport;
use schemas::config::InstallerConfig;
use schemas::release::Outcome;

#[derive(Parser)]
#[command(name = "getgo")]
#[command(about = "Install the latest Go release into ~/opt/go and point ~/opt/go/.path at it", long_about = None)]
struct Cli {
    /// Turn debugging information on
    #[arg(short, long, global = true)]
    debug: bool,

    /// Directory holding the per-version installs (default: ~/opt/go)
    #[arg(long, env = "GETGO_INSTALL_ROOT")]
    install_root: Option<String>,

    /// Downloads page to scan for release archives
    #[arg(long, env = "GETGO_LISTING_URL")]
    listing_url: Option<String>,
}

fn main() {
    let cli = Cli::parse();
    logger::init(cli.debug);

    let result = InstallerConfig::resolve(cli.install_root.as_deref(), cli.listing_url.as_deref())
        .and_then(|config| install::run(&config, &UreqTransport::new()));

    match result {
        Ok(Outcome::Installed { version, path }) => {
            log_info!(
                "Go {} installed at {}",
                version.bold().green(),
                path.display().to_string().cyan()
            );
        }
        Ok(Outcome::AlreadyInstalled { version, path }) => {
            log_debug!("Go {} already present at {}", version, path.display());
        }
        Ok(Outcome::NoMatchingRelease { suffix }) => {
            log_warn!("No release archive ending in {} was listed", suffix.yellow());
        }
        Err(e) => {
            log_error!("{} ({:?} error)", e, e.kind());
            std::process::exit(1);
        }
    }
}
