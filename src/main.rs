use std::path::PathBuf;
use std::sync::Arc;
use bouncer::{config::Config, init, logging, moderation::SnapshotFileCore, run};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "bouncer", about = "Live viewer roster for a moderated channel")]
struct Args {
    /// Configuration file (TOML)
    #[arg(short, long, default_value = "bouncer.toml")]
    config: PathBuf,

    /// JSON snapshot written by the moderation core; overrides the config file
    #[arg(short, long)]
    snapshot: Option<PathBuf>,

    /// Exit after this many polling ticks
    #[arg(long)]
    ticks: Option<usize>,

    /// Print the effective configuration and exit
    #[arg(long)]
    print_config: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let args = Args::parse();
    let mut config = Config::load(&args.config)?;
    if let Some(snapshot) = args.snapshot {
        config.snapshot_path = Some(snapshot);
    }

    if args.print_config {
        print!("{}", config.to_toml_string()?);
        return Ok(());
    }

    logging::init(config.log_level)?;

    let snapshot_path = config
        .snapshot_path
        .clone()
        .ok_or("No snapshot file configured; pass --snapshot or set snapshot_path")?;
    let core = Arc::new(SnapshotFileCore::new(snapshot_path));
    let dashboard = init(&config, core)?;

    run(dashboard, args.ticks).await?;

    Ok(())
}
