use kiss3d::renderer::LineRenderer;
use nalgebra::{Point3, RealField};
use simba::scalar::SupersetOf;

/// Samples `f` at `num_segments + 1` evenly spaced parameters from `start`
/// to `end`, both ends included.
pub fn sample_parametric<F, S>(
    f: F,
    start: S,
    end: S,
    num_segments: usize,
) -> impl Iterator<Item = Point3<f32>>
where
    F: Fn(S) -> Point3<f32>,
    S: RealField + SupersetOf<usize> + Copy,
{
    let num_segments = num_segments.max(1);
    let step = (end - start) / nalgebra::convert::<usize, S>(num_segments);
    (0..=num_segments).map(move |i| f(start + step * nalgebra::convert::<usize, S>(i)))
}

/// Joins consecutive points with line segments.
pub fn draw_polyline<I>(line_renderer: &mut LineRenderer, points: I, color: &Point3<f32>)
where
    I: IntoIterator<Item = Point3<f32>>,
{
    let mut points = points.into_iter();
    let mut prev = match points.next() {
        Some(pt) => pt,
        None => return,
    };
    for pt in points {
        line_renderer.draw_line(prev, pt, *color);
        prev = pt;
    }
}
