use std::collections::HashMap;
use std::path::Path;

use kiss3d::camera::Camera;
use kiss3d::planar_camera::PlanarCamera;
use kiss3d::post_processing::PostProcessingEffect;
use kiss3d::renderer::Renderer;
use kiss3d::scene::SceneNode;
use kiss3d::text::Font;
use kiss3d::window::Window;
use nalgebra::{Isometry3, Matrix4, Point2, Point3, Translation3, UnitQuaternion, Vector3};
use tracing::{debug, warn};

use super::camera::FreeCamera;
use super::renderers::RingRenderer;
use crate::config::Config;
use crate::math::rotation::to_isometry;
use crate::model::catalog::texture_path;
use crate::model::{draw_system, Body, BodyID, ResolvedFrames, SimulationState, SolarSystem, SystemRenderer};

// Leave a little room before the far clipping plane
const SKY_RADIUS_FRACTION: f32 = 0.9;
const SKY_COLOR: (f32, f32, f32) = (0.02, 0.02, 0.05);

/// Owns everything that ends up on screen.
pub struct View {
    body_spheres: HashMap<BodyID, SceneNode>,
    ring_colors: HashMap<BodyID, Point3<f32>>,
    sky: SceneNode,
    // Meshes come out of kiss3d with their poles on y; ours spin about z
    pole_correction: UnitQuaternion<f32>,
    show_hud: bool,
    // Camera
    camera: FreeCamera,
    // Misc
    renderer: RingRenderer,
}

impl View {
    pub fn new(system: &SolarSystem, config: &Config, window: &mut Window) -> Self {
        let texture_dir = config.assets.texture_dir.as_path();

        let mut body_spheres = HashMap::new();
        let mut ring_colors = HashMap::new();
        for body in system.bodies() {
            let sphere = Self::create_body_object(window, body, texture_dir);
            body_spheres.insert(body.id, sphere);

            // Dim the body color, so the orbit doesn't outshine the body
            let color = &body.info.color;
            ring_colors.insert(body.id, Point3::from(color.coords * 0.5));
        }

        let camera = FreeCamera::new(&config.camera, config.window.width, config.window.height);
        let sky = Self::create_sky_object(
            window,
            camera.zfar() * SKY_RADIUS_FRACTION,
            texture_dir,
            &config.assets.background,
        );

        View {
            body_spheres,
            ring_colors,
            sky,
            pole_correction: UnitQuaternion::from_axis_angle(
                &Vector3::x_axis(),
                std::f32::consts::FRAC_PI_2,
            ),
            show_hud: config.debug.show_hud,
            camera,
            renderer: RingRenderer::new(),
        }
    }

    fn create_body_object(window: &mut Window, body: &Body, texture_dir: &Path) -> SceneNode {
        // Make the sphere that represents the body
        let mut sphere = window.add_sphere(body.display_radius() as f32);
        if !apply_texture(&mut sphere, texture_dir, &body.info.name) {
            let color = &body.info.color;
            sphere.set_color(color.x, color.y, color.z);
        }
        sphere
    }

    fn create_sky_object(
        window: &mut Window,
        radius: f32,
        texture_dir: &Path,
        name: &str,
    ) -> SceneNode {
        // We're always inside this one, so it has to show its back faces
        let mut sky = window.add_sphere(radius);
        sky.enable_backface_culling(false);
        if !apply_texture(&mut sky, texture_dir, name) {
            sky.set_color(SKY_COLOR.0, SKY_COLOR.1, SKY_COLOR.2);
        }
        sky
    }

    /// Moves everything into place for this frame.
    pub fn render(
        &mut self,
        window: &mut Window,
        system: &SolarSystem,
        frames: &ResolvedFrames,
        state: &SimulationState,
        fps: f64,
    ) {
        self.camera.sync(&state.camera);

        // The sky follows the camera, so it never gets any closer
        let eye: Point3<f32> = nalgebra::convert(state.camera.eye());
        self.sky
            .set_local_translation(Translation3::from(eye.coords));

        draw_system(system, frames, self);

        if self.show_hud {
            window.draw_text(
                &hud_text(state, fps),
                &Point2::origin(),
                48.0,
                &Font::default(),
                &Point3::new(1.0, 1.0, 1.0),
            );
        }
    }

    pub fn cameras_and_effect_and_renderer(
        &mut self,
    ) -> (
        Option<&mut dyn Camera>,
        Option<&mut dyn PlanarCamera>,
        Option<&mut dyn Renderer>,
        Option<&mut dyn PostProcessingEffect>,
    ) {
        (Some(&mut self.camera), None, Some(&mut self.renderer), None)
    }
}

impl SystemRenderer for View {
    fn draw_sphere(&mut self, id: BodyID, transform: &Matrix4<f64>, _radius: f64) {
        // Spheres were sized when they were created
        if let Some(sphere) = self.body_spheres.get_mut(&id) {
            let isometry: Isometry3<f32> = to_isometry(transform) * self.pole_correction;
            sphere.set_local_transformation(isometry);
        }
    }

    fn draw_ring(&mut self, id: BodyID, transform: &Matrix4<f64>, tube_radius: f64, ring_radius: f64) {
        let color = self
            .ring_colors
            .get(&id)
            .copied()
            .unwrap_or_else(|| Point3::new(0.5, 0.5, 0.5));
        self.renderer.add_ring(
            to_isometry(transform),
            tube_radius as f32,
            ring_radius as f32,
            color,
        );
    }
}

/// Loads `<texture_dir>/<name>.png` onto `node`. Returns false, after saying
/// so, if there's no such file.
fn apply_texture(node: &mut SceneNode, texture_dir: &Path, name: &str) -> bool {
    let path = texture_path(texture_dir, name);
    if path.is_file() {
        debug!("Loading texture {}", path.display());
        node.set_texture_from_file(&path, name);
        true
    } else {
        warn!("Missing texture {}, falling back to a flat color", path.display());
        false
    }
}

fn hud_text(state: &SimulationState, fps: f64) -> String {
    format!(
        "Phase: {:.1}
Speed: {:.1}
FPS: {:.0}",
        state.knobs.phase, state.knobs.speed, fps,
    )
}
