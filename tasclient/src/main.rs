use std::fs;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use tasclient::{load_config, preprocess, Args, Config, Runner};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let cfg = match &args.config {
        Some(path) => load_config(path)?,
        None => Config::default(),
    };
    info!(?cfg, "Config loaded");

    let text = fs::read_to_string(&args.script)
        .with_context(|| format!("reading script {}", args.script.display()))?;
    let lines = preprocess(&text)?;
    if args.preprocess_only {
        for line in &lines {
            println!("{line}");
        }
        return Ok(());
    }

    let extra_ticks = args.ticks.unwrap_or(cfg.run.max_ticks);
    let mut runner = Runner::new(cfg);
    let mut commands = runner.run_script(&lines)?;
    commands.extend(runner.run_ticks(extra_ticks));

    if args.emit_commands {
        for cmd in &commands {
            println!("{cmd:?}");
        }
    }
    runner.summary();
    Ok(())
}
