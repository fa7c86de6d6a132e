use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Default)]
#[command(
    version,
    about = "Hand-gesture particle visualizer: finger combinations steer a field of 800 tiny particles.",
)]
pub struct Cli {
    /// Path to a TOML configuration file with [field] and [display] tables
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Number of particles in the pool
    #[arg(short = 'n', long, value_name = "NUM")]
    pub particles: Option<usize>,

    /// Seed the particle RNG for a repeatable run
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Frame width in pixels
    #[arg(long, value_name = "PX")]
    pub width: Option<u32>,

    /// Frame height in pixels
    #[arg(long, value_name = "PX")]
    pub height: Option<u32>,

    /// Let a scripted hand cycle through every gesture instead of the mouse
    #[arg(long)]
    pub demo: bool,

    /// Do not draw the hand skeleton
    #[arg(long)]
    pub no_skeleton: bool,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all log output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a file in addition to stderr
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}
