use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use script_engine::{
    run_headless, validate_script, Command as _, EngineConfig, FrameTrace, HeadlessGraphics,
    HeadlessRun, LineDiagnostic, ScriptEngine, ScriptLines, ScriptSource,
};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Script engine tooling")]
struct Cli {
    /// TOML engine configuration.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Report every line the interpreter would drop.
    Validate {
        script: PathBuf,
        /// Check image paths against this directory instead of assuming they load.
        #[arg(long)]
        assets: Option<PathBuf>,
        /// Exit with an error if any diagnostic is reported.
        #[arg(long, default_value_t = false)]
        strict: bool,
        /// Print the report as JSON.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Run a script headless and write the state changes as YAML.
    Trace {
        script: PathBuf,
        #[arg(long, default_value_t = 600)]
        frames: u32,
        /// Click every N frames; 0 disables clicking.
        #[arg(long, default_value_t = 2)]
        click_every: u32,
        /// Choice index to pick when a choice is offered.
        #[arg(long, default_value_t = 0)]
        choose: usize,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Serialize)]
struct ValidationEnvelope<'a> {
    script: String,
    lines: usize,
    labels: Vec<(String, usize)>,
    images: Vec<(String, String)>,
    diagnostics: &'a [LineDiagnostic],
}

#[derive(Serialize)]
struct TraceEnvelope {
    trace_format_version: u16,
    script: String,
    trace: FrameTrace,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;
    match cli.command {
        Command::Validate {
            script,
            assets,
            strict,
            json,
        } => validate(&script, assets, &config, strict, json),
        Command::Trace {
            script,
            frames,
            click_every,
            choose,
            output,
        } => trace(&script, &config, frames, click_every, choose, output.as_deref()),
    }
}

fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    match path {
        Some(path) => {
            EngineConfig::load(path).with_context(|| format!("load config {}", path.display()))
        }
        None => Ok(EngineConfig::default()),
    }
}

fn load_script(path: &Path) -> Result<ScriptLines> {
    ScriptLines::load(path).with_context(|| format!("load script {}", path.display()))
}

fn validate(
    path: &Path,
    assets: Option<PathBuf>,
    config: &EngineConfig,
    strict: bool,
    json: bool,
) -> Result<()> {
    let script = load_script(path)?;
    let mut graphics = match assets {
        Some(root) => HeadlessGraphics::default().with_asset_root(root),
        None => HeadlessGraphics::default(),
    };
    let report = validate_script(&script, &mut graphics, config);

    let envelope = ValidationEnvelope {
        script: path.display().to_string(),
        lines: script.line_count(),
        labels: report
            .labels
            .iter()
            .map(|label| (label.name().to_string(), label.line_number()))
            .collect(),
        images: report
            .images
            .iter()
            .map(|image| (image.label().to_string(), image.path().to_string()))
            .collect(),
        diagnostics: &report.diagnostics,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&envelope)?);
    } else {
        print_report(&envelope);
    }

    if strict && !report.is_clean() {
        anyhow::bail!("{} diagnostic(s) reported", report.diagnostics.len());
    }
    Ok(())
}

fn print_report(envelope: &ValidationEnvelope<'_>) {
    println!("{}: {} line(s)", envelope.script, envelope.lines);
    println!("labels:");
    for (name, line) in &envelope.labels {
        println!("  {name} -> {line}");
    }
    println!("images:");
    for (label, path) in &envelope.images {
        println!("  {label} -> {path}");
    }
    if envelope.diagnostics.is_empty() {
        println!("no problems found");
        return;
    }
    println!("diagnostics:");
    for diagnostic in envelope.diagnostics {
        match diagnostic.line {
            Some(line) => println!("  line {line}: {}", diagnostic.reason),
            None => println!("  script: {}", diagnostic.reason),
        }
    }
}

fn trace(
    path: &Path,
    config: &EngineConfig,
    frames: u32,
    click_every: u32,
    choose: usize,
    output: Option<&Path>,
) -> Result<()> {
    let script = load_script(path)?;
    let mut graphics = HeadlessGraphics::default();
    let mut engine = ScriptEngine::initialize(script, &mut graphics, config.clone())
        .context("initialize engine")?;

    let run = HeadlessRun {
        frames,
        click_every: (click_every > 0).then_some(click_every),
        choose: Some(choose),
        stop_at_end: true,
    };
    let envelope = TraceEnvelope {
        trace_format_version: 1,
        script: path.display().to_string(),
        trace: run_headless(&mut engine, run),
    };
    let yaml = serde_yaml::to_string(&envelope)?;

    match output {
        Some(output) => {
            if let Some(parent) = output.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(output, yaml).with_context(|| format!("write {}", output.display()))?;
        }
        None => print!("{yaml}"),
    }
    Ok(())
}
