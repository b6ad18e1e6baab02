use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use script_engine::ScriptLines;
use script_engine_runtime::{load_font, run_winit, FileAssetStore, RuntimeApp, RuntimeConfig};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Play a script in a window")]
struct Args {
    /// Script file (`.json` or one command per line).
    script: PathBuf,
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Font file, overriding `font_path` from the config.
    #[arg(long)]
    font: Option<PathBuf>,
    /// Asset directory, overriding `asset_root` from the config.
    #[arg(long)]
    assets: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let mut config = match &args.config {
        Some(path) => RuntimeConfig::load(path)
            .with_context(|| format!("load config {}", path.display()))?,
        None => RuntimeConfig::default(),
    };
    if args.font.is_some() {
        config.font_path = args.font;
    }
    if args.assets.is_some() {
        config.asset_root = args.assets;
    }

    let script = ScriptLines::load(&args.script)
        .with_context(|| format!("load script {}", args.script.display()))?;
    let store = FileAssetStore::new(config.asset_root_for(&args.script));
    let text = config
        .font_path
        .as_deref()
        .map(|path| load_font(path, config.engine.text.font_size as f32))
        .transpose()?;

    let app = RuntimeApp::new(script, &config, store, text).context("initialize engine")?;
    run_winit(app, &config.window)?;
    Ok(())
}
