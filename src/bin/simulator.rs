use clap::Parser;
use kiss3d::window::Window;
use tracing::{error, info};

use solar_system::gui::{star_light, Simulation};
use solar_system::logging::{init_logging, DEFAULT_FILTER};
use solar_system::model::catalog;
use solar_system::{CliArgs, Config, Error};

fn main() {
    let args = CliArgs::parse();

    let (mut config, origin) = match Config::load(&args.config) {
        Ok(loaded) => loaded,
        Err(err) => {
            // No config means no configured level either
            init_logging(DEFAULT_FILTER);
            error!("{}", err);
            std::process::exit(1);
        }
    };
    config.apply_cli_overrides(&args);
    init_logging(&config.debug.log_level);
    info!("Config {}", origin);

    if let Err(err) = run(&args, config) {
        error!("{}", err);
        std::process::exit(1);
    }
}

fn run(args: &CliArgs, config: Config) -> Result<(), Error> {
    if args.save_config {
        config.save(&args.config)?;
    }

    let system = catalog::solar_system()?;
    info!("Built a system of {} bodies", system.len());

    let mut window = Window::new_with_size(
        &config.window.title,
        config.window.width,
        config.window.height,
    );
    window.set_light(star_light());
    window.set_background_color(0.0, 0.0, 0.0);
    if config.window.framerate_limit > 0 {
        window.set_framerate_limit(Some(config.window.framerate_limit));
    }

    let simulation = Simulation::new(system, &config, &mut window);
    window.render_loop(simulation);
    Ok(())
}
