use approx::{assert_abs_diff_eq, assert_relative_eq};
use nalgebra::{Point3, Vector3};
use solar_system::math::rotation::{axis_rotation, orthonormality};
use solar_system::model::body::{shape_orbit_radius, BodyInfo, OrbitInfo, SolarSystem};
use solar_system::model::catalog;
use solar_system::model::{resolve_transforms, RotationKnobs};

fn info(name: &str) -> BodyInfo {
    BodyInfo {
        name: name.to_owned(),
        radius: 2.0,
        tilt: 10.0,
        period: 3.0,
        color: Point3::new(1.0, 1.0, 1.0),
    }
}

/// Star, planet on an inclined orbit, moon on an inclined orbit around the
/// planet. Compare the moon's position to one worked out by hand.
#[test]
fn test_depth_two_moon_position() {
    let mut system = SolarSystem::new();
    let star = system.add_fixed_body(info("star")).unwrap();
    let planet = system
        .add_body(
            info("planet"),
            OrbitInfo {
                inclination: 30.0,
                radius: 9.0,
                period: 12.0,
            },
            star,
        )
        .unwrap();
    let moon = system
        .add_body(
            info("moon"),
            OrbitInfo {
                inclination: 45.0,
                radius: 0.2,
                period: 4.0,
            },
            planet,
        )
        .unwrap();

    let knobs = RotationKnobs::new(0.5, 2.0);
    let now = 1001.0;
    let frames = resolve_transforms(&system, &knobs, now);

    // Angles straight from the clock formula
    let planet_angle = ((1001.0 % 12.0) * 2.0 + 0.5) / 12.0 * 360.0 * 20.0;
    let moon_angle = ((1001.0 % 4.0) * 2.0 + 0.5) / 4.0 * 360.0 * 20.0;
    assert_relative_eq!(frames.get(planet).azimuth, planet_angle, epsilon = 1e-9);
    assert_relative_eq!(frames.get(moon).azimuth, moon_angle, epsilon = 1e-9);

    let planet_r = shape_orbit_radius(9.0);
    let moon_r = shape_orbit_radius(0.2);
    assert_relative_eq!(planet_r, 30.0);
    assert_relative_eq!(moon_r, 2.0);

    // Ry(-i) R_z(a) (r, 0, 0), one level at a time
    let in_plane = |incl: f64, angle: f64, r: f64| {
        let rotation = axis_rotation(incl, &-Vector3::y_axis())
            * axis_rotation(angle, &Vector3::z_axis());
        rotation.transform_vector(&Vector3::new(r, 0.0, 0.0))
    };
    let planet_rotation = axis_rotation(30.0, &-Vector3::y_axis())
        * axis_rotation(planet_angle, &Vector3::z_axis());
    let planet_pos = in_plane(30.0, planet_angle, planet_r);
    let moon_pos = planet_pos + planet_rotation.transform_vector(&in_plane(45.0, moon_angle, moon_r));

    assert_abs_diff_eq!(frames.get(planet).position().coords, planet_pos, epsilon = 1e-9);
    assert_abs_diff_eq!(frames.get(moon).position().coords, moon_pos, epsilon = 1e-9);

    // The moon stays on its orbit no matter what
    let distance = (frames.get(moon).position() - frames.get(planet).position()).norm();
    assert_relative_eq!(distance, moon_r, epsilon = 1e-9);
}

#[test]
fn test_catalog_orientations_over_a_day() {
    let system = catalog::solar_system().unwrap();
    let knobs = RotationKnobs::new(-3.7, 5.2);

    for hour in 0..24 {
        let now = 1_600_000_000.0 + 3600.0 * hour as f64;
        let frames = resolve_transforms(&system, &knobs, now);
        for (id, body) in frames.iter() {
            for matrix in [&body.accumulated_orientation, &body.body_transform] {
                let (deviation, det) = orthonormality(matrix);
                assert!(deviation < 1e-9, "{:?} drifted by {}", id, deviation);
                assert_relative_eq!(det, 1.0, epsilon = 1e-9);
            }
        }
    }
}

#[test]
fn test_shaping_is_stable_across_frames() {
    let system = catalog::solar_system().unwrap();
    let knobs = RotationKnobs::default();
    let before: Vec<_> = system
        .bodies()
        .map(|body| (body.display_radius(), body.orbit().map(|o| o.display_radius())))
        .collect();

    for i in 0..50 {
        let frames = resolve_transforms(&system, &knobs, 7.0 * i as f64);
        // Every orbiting body sits exactly one shaped radius from its parent
        for body in system.bodies() {
            if let (Some(orbit), Some(parent)) = (body.orbit(), body.parent_id()) {
                let offset = frames.get(body.id).position() - frames.get(parent).position();
                assert_relative_eq!(offset.norm(), orbit.display_radius(), epsilon = 1e-9);
            }
        }
    }

    let after: Vec<_> = system
        .bodies()
        .map(|body| (body.display_radius(), body.orbit().map(|o| o.display_radius())))
        .collect();
    assert_eq!(before, after);
}
