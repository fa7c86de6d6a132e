//! gesture_particles — interactive entry point.

use clap::Parser;
use gesture_particles::app::run;
use gesture_particles::cli::Cli;
use gesture_particles::config::AppConfig;
use gesture_particles::error::Result;
use gesture_particles::logging::setup_logging;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = start(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn start(cli: Cli) -> Result<()> {
    setup_logging(cli.verbose, cli.quiet, cli.log_file.as_deref())?;
    let cfg = AppConfig::resolve(&cli)?;

    if !cli.quiet {
        let (width, height) = cfg.window_size();
        println!();
        println!("╔══════════════════════════════════════════════════════════════╗");
        println!("║           Hand Gesture Particles — finger force fields       ║");
        println!("╚══════════════════════════════════════════════════════════════╝");
        println!();
        if cli.demo {
            println!("  Mode: Scripted demo (every finger combination in turn)");
        } else {
            println!("  Mode: Mouse + keyboard simulation");
            println!("  Keys: mouse=wrist  1-5=fingers  F=fist  O=open  H=hide  N=second hand  Q=quit");
        }
        println!("  Field: {}×{}  particles: {}", width, height, cfg.field.particle_count);
        println!();
        println!("  Opening visualizer window…");
        println!();
    }

    run(cfg, cli.demo)
}
