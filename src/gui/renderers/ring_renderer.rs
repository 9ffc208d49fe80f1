use kiss3d::camera::Camera;
use kiss3d::renderer::{LineRenderer, Renderer};
use nalgebra::{Isometry3, Point3};

use super::utils::{draw_polyline, sample_parametric};

const RING_SEGMENTS: usize = 180;

struct RingData {
    // From the ring's own space (xy plane, centered on the origin) to world space
    transform: Isometry3<f32>,
    tube_radius: f32,
    ring_radius: f32,
    color: Point3<f32>,
}

/// Draws orbit rings as line loops.
///
/// A ring is queued with [`RingRenderer::add_ring`], drawn on the next render
/// pass, and then forgotten; rings have to be re-added every frame.
pub struct RingRenderer {
    line_renderer: LineRenderer,
    rings: Vec<RingData>,
}

impl RingRenderer {
    pub fn new() -> Self {
        RingRenderer {
            line_renderer: LineRenderer::new(),
            rings: vec![],
        }
    }

    pub fn add_ring(
        &mut self,
        transform: Isometry3<f32>,
        tube_radius: f32,
        ring_radius: f32,
        color: Point3<f32>,
    ) {
        self.rings.push(RingData {
            transform,
            tube_radius,
            ring_radius,
            color,
        });
    }

    fn load_ring_into_renderer(line_renderer: &mut LineRenderer, ring: &RingData) {
        // The tube is too thin to bother meshing; its inner and outer edges will do
        for radius in [
            ring.ring_radius - ring.tube_radius,
            ring.ring_radius + ring.tube_radius,
        ] {
            let points = circle_points(radius, RING_SEGMENTS).map(|pt| ring.transform * pt);
            draw_polyline(line_renderer, points, &ring.color);
        }
    }
}

impl Renderer for RingRenderer {
    fn render(&mut self, pass: usize, camera: &mut dyn Camera) {
        for ring in self.rings.iter() {
            RingRenderer::load_ring_into_renderer(&mut self.line_renderer, ring);
        }
        self.line_renderer.render(pass, camera);
        self.rings.clear();
    }
}

/// A closed loop of points around the origin in the xy plane. The first and
/// last points coincide.
pub fn circle_points(radius: f32, num_segments: usize) -> impl Iterator<Item = Point3<f32>> {
    let f = move |theta: f32| Point3::new(radius * theta.cos(), radius * theta.sin(), 0.0);
    sample_parametric(f, 0.0, std::f32::consts::TAU, num_segments)
}
