use nalgebra::{Matrix4, Point3, Unit, Vector3};

use super::body::{Body, BodyID, SolarSystem};
use super::clock::{current_angle, RotationKnobs};
use crate::math::rotation::{axis_rotation, transform_vector};

/// Thickness of the tube drawn for every orbit.
pub const ORBIT_TUBE_RADIUS: f64 = 0.02;

/// Where a single body is during one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedBody {
    /// Parent placement tilted into the orbital plane. Orbit rings are drawn
    /// in the xy plane of this frame. The root uses its own placement.
    pub orbit_frame: Matrix4<f64>,
    /// Center of the body, with the orbital plane and the azimuth applied
    /// but not the body's own spin. Children hang off of this.
    pub placement: Matrix4<f64>,
    /// Inverse of every orbital azimuth rotation from the root down to this
    /// body. Used to keep spin axes from turning with the orbit.
    pub accumulated_orientation: Matrix4<f64>,
    /// The placement, plus axial tilt and spin. Only used to draw the body.
    pub body_transform: Matrix4<f64>,
    /// Orbital azimuth, in degrees
    pub azimuth: f64,
    /// Spin around the body's own axis, in degrees
    pub spin: f64,
}

impl ResolvedBody {
    pub fn position(&self) -> Point3<f64> {
        self.placement.transform_point(&Point3::origin())
    }
}

/// Every body's transform for a single frame, indexed by `BodyID`.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedFrames {
    now: f64,
    bodies: Vec<ResolvedBody>,
}

impl ResolvedFrames {
    pub fn get(&self, id: BodyID) -> &ResolvedBody {
        &self.bodies[id.0]
    }

    pub fn time(&self) -> f64 {
        self.now
    }

    pub fn iter(&self) -> impl Iterator<Item = (BodyID, &ResolvedBody)> {
        self.bodies
            .iter()
            .enumerate()
            .map(|(idx, body)| (BodyID(idx), body))
    }
}

/// Computes where everything is at wall-clock time `now`.
///
/// Nothing is carried over from previous frames: every transform is built
/// from the catalog, the knobs, and `now`, so repeated calls with the same
/// inputs give the same answer.
pub fn resolve_transforms(system: &SolarSystem, knobs: &RotationKnobs, now: f64) -> ResolvedFrames {
    let mut resolved: Vec<Option<ResolvedBody>> = vec![None; system.len()];

    if let Some(root) = system.root() {
        let identity = Matrix4::identity();
        let root_frame = with_spin(root, identity, identity, identity, 0.0, knobs, now);
        resolve_children(system, root, &root_frame, knobs, now, &mut resolved);
        resolved[root.id.0] = Some(root_frame);
    }

    let bodies = resolved
        .into_iter()
        .enumerate()
        .map(|(idx, body)| {
            body.unwrap_or_else(|| panic!("Body {:?} is not reachable from the root", BodyID(idx)))
        })
        .collect();

    ResolvedFrames { now, bodies }
}

fn resolve_children(
    system: &SolarSystem,
    parent: &Body,
    parent_frame: &ResolvedBody,
    knobs: &RotationKnobs,
    now: f64,
    resolved: &mut Vec<Option<ResolvedBody>>,
) {
    for child in system.child_bodies(parent.id) {
        let orbit = match child.orbit() {
            Some(orbit) => orbit,
            None => continue,
        };

        // Tilt into the orbital plane, then go around the orbit
        let inclination = axis_rotation(orbit.info.inclination, &-Vector3::y_axis());
        let orbit_frame = parent_frame.placement * inclination;

        let azimuth = current_angle(orbit.info.period, knobs, now);
        let placement = orbit_frame
            * axis_rotation(azimuth, &Vector3::z_axis())
            * Matrix4::new_translation(&Vector3::new(orbit.display_radius(), 0.0, 0.0));

        let accumulated_orientation =
            axis_rotation(azimuth, &-Vector3::z_axis()) * parent_frame.accumulated_orientation;

        let child_frame = with_spin(
            child,
            orbit_frame,
            placement,
            accumulated_orientation,
            azimuth,
            knobs,
            now,
        );
        resolve_children(system, child, &child_frame, knobs, now, resolved);
        resolved[child.id.0] = Some(child_frame);
    }
}

fn with_spin(
    body: &Body,
    orbit_frame: Matrix4<f64>,
    placement: Matrix4<f64>,
    accumulated_orientation: Matrix4<f64>,
    azimuth: f64,
    knobs: &RotationKnobs,
    now: f64,
) -> ResolvedBody {
    // Pull "up" back through the orbital rotations, so the spin axis doesn't
    // swing around as the body goes around its parent.
    let tilt_axis = Unit::new_normalize(transform_vector(&Vector3::y(), &accumulated_orientation));
    let spin = current_angle(body.info.period, knobs, now);

    let body_transform = placement
        * axis_rotation(body.info.tilt, &tilt_axis)
        * axis_rotation(spin, &Vector3::z_axis());

    ResolvedBody {
        orbit_frame,
        placement,
        accumulated_orientation,
        body_transform,
        azimuth,
        spin,
    }
}

/// Things that can draw a solar system. Every transform passed in is a
/// complete model transform; nothing leaks between calls.
pub trait SystemRenderer {
    fn draw_sphere(&mut self, id: BodyID, transform: &Matrix4<f64>, radius: f64);

    /// Draws a ring in the local xy plane, centered on the origin. `ring_radius`
    /// is the distance to the middle of the tube.
    fn draw_ring(&mut self, id: BodyID, transform: &Matrix4<f64>, tube_radius: f64, ring_radius: f64);
}

/// Hands every body and every orbit to `renderer`, depth-first in catalog order.
pub fn draw_system<R: SystemRenderer + ?Sized>(
    system: &SolarSystem,
    frames: &ResolvedFrames,
    renderer: &mut R,
) {
    if let Some(root) = system.root() {
        draw_body(system, root, frames, renderer);
    }
}

fn draw_body<R: SystemRenderer + ?Sized>(
    system: &SolarSystem,
    body: &Body,
    frames: &ResolvedFrames,
    renderer: &mut R,
) {
    let frame = frames.get(body.id);
    renderer.draw_sphere(body.id, &frame.body_transform, body.display_radius());

    for child in system.child_bodies(body.id) {
        if let Some(orbit) = child.orbit() {
            renderer.draw_ring(
                child.id,
                &frames.get(child.id).orbit_frame,
                ORBIT_TUBE_RADIUS,
                orbit.display_radius(),
            );
        }
        draw_body(system, child, frames, renderer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::{assert_abs_diff_eq, assert_relative_eq};

    use crate::math::rotation::orthonormality;
    use crate::model::body::{BodyInfo, OrbitInfo};
    use crate::model::catalog;

    fn info(name: &str, tilt: f64, period: f64) -> BodyInfo {
        BodyInfo {
            name: name.to_owned(),
            radius: 1.0,
            tilt,
            period,
            color: Point3::new(1.0, 1.0, 1.0),
        }
    }

    // star -> planet (orbit radius 20, period 10) -> moon (orbit radius 5, period 5)
    fn three_body_system(planet_inclination: f64) -> (SolarSystem, [BodyID; 3]) {
        let mut system = SolarSystem::new();
        let star = system.add_fixed_body(info("star", 0.0, 0.0)).unwrap();
        let planet = system
            .add_body(
                info("planet", 0.0, 0.0),
                OrbitInfo {
                    inclination: planet_inclination,
                    radius: 4.0,
                    period: 10.0,
                },
                star,
            )
            .unwrap();
        let moon = system
            .add_body(
                info("moon", 0.0, 0.0),
                OrbitInfo {
                    inclination: 0.0,
                    radius: 0.5,
                    period: 5.0,
                },
                planet,
            )
            .unwrap();
        (system, [star, planet, moon])
    }

    #[test]
    fn test_root_is_identity() {
        let (system, [star, _, _]) = three_body_system(0.0);
        let frames = resolve_transforms(&system, &RotationKnobs::default(), 1234.5);
        let root = frames.get(star);
        assert_eq!(root.placement, Matrix4::identity());
        assert_eq!(root.accumulated_orientation, Matrix4::identity());
        assert_eq!(root.azimuth, 0.0);
        // zero period, zero tilt: doesn't spin either
        assert_relative_eq!(root.body_transform, Matrix4::identity());
    }

    #[test]
    fn test_moon_position_in_plane() {
        let (system, [_, planet, moon]) = three_body_system(0.0);
        let knobs = RotationKnobs::new(0.0, 1.0);

        // At t = 0.125, the planet is a quarter way around (90 degrees, after
        // scaling), and the moon is halfway around (180 degrees).
        let frames = resolve_transforms(&system, &knobs, 0.125);
        assert_relative_eq!(frames.get(planet).azimuth, 90.0, epsilon = 1e-9);
        assert_relative_eq!(frames.get(moon).azimuth, 180.0, epsilon = 1e-9);

        // planet at R(90) * (20, 0, 0); moon offset is R(90) * R(180) * (5, 0, 0)
        assert_abs_diff_eq!(
            frames.get(planet).position(),
            Point3::new(0.0, 20.0, 0.0),
            epsilon = 1e-9
        );
        assert_abs_diff_eq!(
            frames.get(moon).position(),
            Point3::new(0.0, 15.0, 0.0),
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_inclination_tilts_orbit_plane() {
        let (system, [_, planet, moon]) = three_body_system(90.0);
        let knobs = RotationKnobs::new(0.0, 1.0);
        let frames = resolve_transforms(&system, &knobs, 0.0);

        // Rotating 90 degrees about -y sends x to z
        assert_abs_diff_eq!(
            frames.get(planet).position(),
            Point3::new(0.0, 0.0, 20.0),
            epsilon = 1e-9
        );
        // The moon's orbit is in the planet's (tilted) frame
        assert_abs_diff_eq!(
            frames.get(moon).position(),
            Point3::new(0.0, 0.0, 25.0),
            epsilon = 1e-9
        );
        // ... and so is the ring the moon's orbit gets drawn on
        let ring_normal = transform_vector(&Vector3::z(), &frames.get(moon).orbit_frame);
        assert_abs_diff_eq!(ring_normal, -Vector3::x(), epsilon = 1e-9);
    }

    #[test]
    fn test_accumulated_orientation_composes() {
        let (system, [_, planet, moon]) = three_body_system(0.0);
        let knobs = RotationKnobs::new(0.0, 1.0);
        let frames = resolve_transforms(&system, &knobs, 0.125);

        // planet went 90, moon went another 180; undo all 270
        let expected = axis_rotation(-270.0, &Vector3::z_axis());
        assert_abs_diff_eq!(
            frames.get(moon).accumulated_orientation,
            expected,
            epsilon = 1e-9
        );
        assert_abs_diff_eq!(
            frames.get(planet).accumulated_orientation,
            axis_rotation(-90.0, &Vector3::z_axis()),
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_spin_axis_stays_put() {
        let mut system = SolarSystem::new();
        let star = system.add_fixed_body(info("star", 0.0, 0.0)).unwrap();
        let planet = system
            .add_body(
                info("planet", 30.0, 0.0),
                OrbitInfo {
                    inclination: 0.0,
                    radius: 1.0,
                    period: 7.0,
                },
                star,
            )
            .unwrap();

        // Without spin, the planet's pole should point the same way in world
        // space no matter where it is on its orbit.
        let knobs = RotationKnobs::new(0.0, 1.0);
        let pole = |now: f64| {
            let frames = resolve_transforms(&system, &knobs, now);
            transform_vector(&Vector3::z(), &frames.get(planet).body_transform)
        };
        let first = pole(0.0);
        assert_relative_eq!(first.z, 30f64.to_radians().cos(), epsilon = 1e-9);
        for i in 1..20 {
            assert_abs_diff_eq!(pole(0.37 * i as f64), first, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_all_orientations_orthonormal() {
        let system = catalog::solar_system().unwrap();
        let knobs = RotationKnobs::default();
        for i in 0..100 {
            let now = 1_700_000_000.0 + 13.7 * i as f64;
            let frames = resolve_transforms(&system, &knobs, now);
            for (_, body) in frames.iter() {
                for m in [
                    &body.orbit_frame,
                    &body.placement,
                    &body.accumulated_orientation,
                    &body.body_transform,
                ] {
                    let (deviation, det) = orthonormality(m);
                    assert_abs_diff_eq!(deviation, 0.0, epsilon = 1e-9);
                    assert_relative_eq!(det, 1.0, epsilon = 1e-9);
                }
            }
        }
    }

    #[test]
    fn test_frames_are_recomputed_not_accumulated() {
        let system = catalog::solar_system().unwrap();
        let knobs = RotationKnobs::default();
        let first = resolve_transforms(&system, &knobs, 5000.0);
        for i in 0..10 {
            resolve_transforms(&system, &knobs, 5000.0 + i as f64);
        }
        assert_eq!(resolve_transforms(&system, &knobs, 5000.0), first);
        assert_eq!(first.time(), 5000.0);
    }

    #[derive(Debug, PartialEq)]
    enum Call {
        Sphere(BodyID, f64),
        Ring(BodyID, f64, f64),
    }

    #[derive(Default)]
    struct Recorder(Vec<Call>);

    impl SystemRenderer for Recorder {
        fn draw_sphere(&mut self, id: BodyID, _: &Matrix4<f64>, radius: f64) {
            self.0.push(Call::Sphere(id, radius));
        }

        fn draw_ring(&mut self, id: BodyID, _: &Matrix4<f64>, tube_radius: f64, ring_radius: f64) {
            self.0.push(Call::Ring(id, tube_radius, ring_radius));
        }
    }

    #[test]
    fn test_draw_order() {
        let (system, [star, planet, moon]) = three_body_system(0.0);
        let frames = resolve_transforms(&system, &RotationKnobs::default(), 0.0);

        let mut recorder = Recorder::default();
        draw_system(&system, &frames, &mut recorder);
        assert_eq!(
            recorder.0,
            vec![
                Call::Sphere(star, 1.0),
                Call::Ring(planet, ORBIT_TUBE_RADIUS, 20.0),
                Call::Sphere(planet, 1.0),
                Call::Ring(moon, ORBIT_TUBE_RADIUS, 5.0),
                Call::Sphere(moon, 1.0),
            ]
        );
    }
}
