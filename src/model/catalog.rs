use std::path::{Path, PathBuf};

use nalgebra::Point3;

use super::body::{BodyID, BodyInfo, CatalogError, OrbitInfo, SolarSystem};

// Radii are in Earth radii, orbit radii in AU, periods in days, angles in degrees.
// A few values are deliberately off from reality so that they look good on screen.

pub const SUN_RADIUS_SCALE: f64 = 0.1;
pub const MOON_ORBIT_RADIUS_SCALE: f64 = 60.0;

pub const BACKGROUND_TEXTURE: &str = "milky_way";

struct Entry {
    name: &'static str,
    radius: f64,
    tilt: f64,
    period: f64,
    color: u32,
    // (inclination, radius, period)
    orbit: (f64, f64, f64),
    satellites: &'static [Entry],
}

const SUN: Entry = Entry {
    name: "sun",
    radius: 109.0 * SUN_RADIUS_SCALE,
    tilt: 0.0,
    period: 50.05,
    color: 0xFFD23F,
    orbit: (0.0, 0.0, 0.0),
    satellites: &[],
};

const PLANETS: [Entry; 8] = [
    Entry {
        name: "mercury",
        radius: 0.3829,
        tilt: 0.034,
        period: 58.646,
        color: 0x9C9C9C,
        orbit: (7.005, 0.387098, 87.9691),
        satellites: &[],
    },
    Entry {
        name: "venus",
        radius: 0.9499,
        tilt: 2.64,
        period: 243.025,
        color: 0xE3BB76,
        orbit: (3.39458, 0.723332, 224.701),
        satellites: &[],
    },
    Entry {
        name: "earth",
        radius: 1.0,
        tilt: 23.4392811,
        period: 1.0 * 40.0,
        color: 0x2F6FD0,
        orbit: (0.00005, 1.0, 365.256363004),
        satellites: &[MOON],
    },
    Entry {
        name: "mars",
        radius: 0.5320,
        tilt: 1.025957,
        period: 25.19 / 24.0 * 10.0,
        color: 0xC1440E,
        orbit: (1.850, 1.523679, 686.971),
        satellites: &[],
    },
    Entry {
        name: "jupiter",
        radius: 10.97,
        tilt: 9.925 / 24.0 * 2.0,
        period: 3.13,
        color: 0xD8CA9D,
        orbit: (1.303, 5.20260, 4332.59),
        satellites: &[],
    },
    Entry {
        name: "saturn",
        radius: 9.140,
        tilt: 10.55 / 24.0 * 2.0,
        period: 26.73,
        color: 0xEAD6B8,
        orbit: (2.485240, 9.554909, 10759.22),
        satellites: &[],
    },
    Entry {
        name: "uranus",
        radius: 3.981,
        tilt: 0.71833,
        period: 17.0 / 24.0 * 2.0,
        color: 0xD1E7E7,
        orbit: (0.773, 19.2184, 30688.5),
        satellites: &[],
    },
    Entry {
        name: "neptune",
        radius: 3.865,
        tilt: 0.6713,
        period: 16.0 / 24.0 * 2.0,
        color: 0x5B5DDF,
        orbit: (1.767975, 30.110387, 60182.0),
        satellites: &[],
    },
];

const MOON: Entry = Entry {
    name: "moon",
    radius: 0.273,
    tilt: 27.321661 * 4.0,
    period: 6.687,
    color: 0xCFCFCF,
    orbit: (5.145, 0.00257 * MOON_ORBIT_RADIUS_SCALE, 27.321661),
    satellites: &[],
};

impl Entry {
    fn info(&self) -> BodyInfo {
        BodyInfo {
            name: self.name.to_owned(),
            radius: self.radius,
            tilt: self.tilt,
            period: self.period,
            color: unpack_color(self.color),
        }
    }

    fn orbit(&self) -> OrbitInfo {
        let (inclination, radius, period) = self.orbit;
        OrbitInfo {
            inclination,
            radius,
            period,
        }
    }
}

/// Builds the sun, the eight planets, and our moon.
pub fn solar_system() -> Result<SolarSystem, CatalogError> {
    let mut system = SolarSystem::new();
    let sun = system.add_fixed_body(SUN.info())?;
    add_orbiting(&mut system, &PLANETS, sun)?;
    Ok(system)
}

fn add_orbiting(
    system: &mut SolarSystem,
    entries: &[Entry],
    parent_id: BodyID,
) -> Result<(), CatalogError> {
    for entry in entries {
        let id = system.add_body(entry.info(), entry.orbit(), parent_id)?;
        add_orbiting(system, entry.satellites, id)?;
    }
    Ok(())
}

/// Where the texture for a body with the given name lives.
pub fn texture_path(texture_dir: &Path, name: &str) -> PathBuf {
    texture_dir.join(format!("{}.png", name))
}

fn unpack_color(rgb: u32) -> Point3<f32> {
    let channel = |shift: u32| ((rgb >> shift) & 0xFF) as f32 / 255.0;
    Point3::new(channel(16), channel(8), channel(0))
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn test_catalog_shape() {
        let system = solar_system().unwrap();
        assert_eq!(system.len(), 10);

        let sun = system.root().unwrap();
        assert_eq!(sun.info.name, "sun");
        assert!(sun.orbit().is_none());

        let planet_names: Vec<_> = system
            .child_bodies(sun.id)
            .map(|b| b.info.name.as_str())
            .collect();
        assert_eq!(
            planet_names,
            vec!["mercury", "venus", "earth", "mars", "jupiter", "saturn", "uranus", "neptune"]
        );

        let moon = system.find_by_name("moon").unwrap();
        let earth = system.find_by_name("earth").unwrap();
        assert_eq!(moon.parent_id(), Some(earth.id));
        assert_eq!(earth.children(), &[moon.id]);
    }

    #[test]
    fn test_catalog_shaping() {
        let system = solar_system().unwrap();

        let sun = system.find_by_name("sun").unwrap();
        assert_relative_eq!(sun.display_radius(), 10.9f64.sqrt().sqrt());

        let moon = system.find_by_name("moon").unwrap();
        assert_relative_eq!(moon.display_radius(), 0.273);
        assert_relative_eq!(moon.orbit().unwrap().display_radius(), 0.00257 * 60.0 * 10.0);

        let neptune = system.find_by_name("neptune").unwrap();
        assert_relative_eq!(
            neptune.orbit().unwrap().display_radius(),
            30.110387f64.sqrt() * 10.0
        );
    }

    #[test]
    fn test_texture_path() {
        assert_eq!(
            texture_path(Path::new("texture"), "earth"),
            PathBuf::from("texture/earth.png")
        );
    }

    #[test]
    fn test_unpack_color() {
        assert_eq!(unpack_color(0xFF0000), Point3::new(1.0, 0.0, 0.0));
        assert_eq!(unpack_color(0x00FF00), Point3::new(0.0, 1.0, 0.0));
        assert_eq!(unpack_color(0x0000FF), Point3::new(0.0, 0.0, 1.0));
    }
}
