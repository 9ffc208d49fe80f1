use clap::Parser;

use solar_system::model::catalog;
use solar_system::model::clock::wall_clock_seconds;
use solar_system::model::{resolve_transforms, RotationKnobs};

#[derive(Debug, Parser)]
struct Args {
    /// Body to describe, e.g. "earth". Leave out to list every body.
    name: Option<String>,

    /// Seconds since the Unix epoch. Defaults to now.
    #[arg(long)]
    time: Option<f64>,

    #[arg(long, allow_negative_numbers = true)]
    phase: Option<f64>,

    #[arg(long, allow_negative_numbers = true)]
    speed: Option<f64>,
}

fn main() {
    let args = Args::parse();

    let system = match catalog::solar_system() {
        Ok(system) => system,
        Err(err) => {
            eprintln!("Bad catalog: {}", err);
            std::process::exit(1);
        }
    };

    let defaults = RotationKnobs::default();
    let knobs = RotationKnobs::new(
        args.phase.unwrap_or(defaults.phase),
        args.speed.unwrap_or(defaults.speed),
    );
    let now = args.time.unwrap_or_else(wall_clock_seconds);
    let frames = resolve_transforms(&system, &knobs, now);

    let mut found = false;
    for body in system.bodies() {
        if let Some(ref name) = args.name {
            if body.info.name.to_lowercase() != name.to_lowercase() {
                continue;
            }
        }
        found = true;

        let frame = frames.get(body.id);
        println!("Characteristics of {}", body.info.name);
        println!("- Radius: {} (drawn as {:.4})", body.info.radius, body.display_radius());
        println!("- Axial tilt: {}", body.info.tilt);
        println!("- Spin period: {}", body.info.period);
        if let Some(orbit) = body.orbit() {
            let parent = body
                .parent_id()
                .map(|id| system.get_body(id).info.name.as_str())
                .unwrap_or("?");
            println!("- Orbiting: {}", parent);
            println!(
                "- Orbit radius: {} (drawn as {:.4})",
                orbit.info.radius,
                orbit.display_radius()
            );
            println!("- Orbit inclination: {}", orbit.info.inclination);
            println!("- Orbital period: {}", orbit.info.period);
            println!("- Azimuth: {:.3}", frame.azimuth);
        }
        let position = frame.position();
        println!(
            "- Position at t = {}: ({:.4}, {:.4}, {:.4})",
            now, position.x, position.y, position.z
        );
        println!("- Spin: {:.3}", frame.spin);
        println!();
    }

    if !found {
        if let Some(name) = args.name {
            eprintln!("No body named {}", name);
            std::process::exit(1);
        }
    }
}
