use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(name = "tasclient")]
#[command(about = "Runs a TAS script through the strafe optimizer", long_about = None)]
pub struct Args {
    /// TOML config with [movement], [body] and [run] tables
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Script to run
    #[arg(long)]
    pub script: PathBuf,
    /// Ticks to run after the script ends (overrides run.max_ticks)
    #[arg(long)]
    pub ticks: Option<u32>,
    /// Print every outgoing movement command
    #[arg(long, default_value_t = false)]
    pub emit_commands: bool,
    /// Print the preprocessed script and exit
    #[arg(long, default_value_t = false)]
    pub preprocess_only: bool,
}
