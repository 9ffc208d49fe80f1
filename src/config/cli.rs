use std::path::PathBuf;

use clap::Parser;

use super::Config;

/// Command-line arguments for the simulator.
///
/// Anything given here wins over `config.ron`.
#[derive(Parser, Debug)]
#[command(name = "simulator", about = "Interactive solar system orrery")]
pub struct CliArgs {
    /// Path to the config file.
    #[arg(long, default_value = "config.ron")]
    pub config: PathBuf,

    /// Window width.
    #[arg(long)]
    pub width: Option<u32>,

    /// Window height.
    #[arg(long)]
    pub height: Option<u32>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Directory holding `<body>.png` textures.
    #[arg(long)]
    pub texture_dir: Option<PathBuf>,

    /// Initial rotation phase.
    #[arg(long, allow_negative_numbers = true)]
    pub phase: Option<f64>,

    /// Initial rotation speed.
    #[arg(long, allow_negative_numbers = true)]
    pub speed: Option<f64>,

    /// Write the effective config back to `--config` before starting.
    #[arg(long)]
    pub save_config: bool,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(w) = args.width {
            self.window.width = w;
        }
        if let Some(h) = args.height {
            self.window.height = h;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
        if let Some(ref dir) = args.texture_dir {
            self.assets.texture_dir = dir.clone();
        }
        if let Some(phase) = args.phase {
            self.simulation.phase = phase;
        }
        if let Some(speed) = args.speed {
            self.simulation.speed = speed;
        }
    }
}
