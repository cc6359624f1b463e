use std::f32::consts::TAU;

use super::VertexBuffer;

/// Fewer steps are raised to this.
pub const MIN_CIRCLE_STEPS: u32 = 8;

/// Vertices produced for `steps`: the centre plus `steps + 1` rim points.
pub fn circle_vertex_count(steps: u32) -> u32 {
    steps.max(MIN_CIRCLE_STEPS) + 2
}

fn rim_angles(steps: u32) -> impl Iterator<Item = f32> {
    let steps = steps.max(MIN_CIRCLE_STEPS);
    let step = TAU / steps as f32;
    // The last angle repeats the first so the fan closes exactly.
    (0..=steps).map(move |i| if i == steps { 0.0 } else { i as f32 * step })
}

/// A triangle fan approximating a circle.
///
/// Vertex 0 is the centre; vertices `1..=steps+1` walk the rim, the last
/// repeating the first.
pub fn circle_fan(cx: f32, cy: f32, radius: f32, steps: u32) -> VertexBuffer {
    let mut vb = VertexBuffer::with_capacity(2, circle_vertex_count(steps) as usize);
    vb.push(&[cx, cy]);
    for theta in rim_angles(steps) {
        vb.push(&[cx + radius * theta.cos(), cy + radius * theta.sin()]);
    }
    vb
}

/// Texture coordinates matching [`circle_fan`] vertex for vertex.
pub fn circle_tex_coords(steps: u32) -> VertexBuffer {
    let mut vb = VertexBuffer::with_capacity(2, circle_vertex_count(steps) as usize);
    vb.push(&[0.5, 0.5]);
    for theta in rim_angles(steps) {
        vb.push(&[(theta.cos() + 1.0) / 2.0, (theta.sin() + 1.0) / 2.0]);
    }
    vb
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fan_closes_on_first_rim_point() {
        for steps in [8, 9, 32, 100] {
            let vb = circle_fan(10.0, 20.0, 5.0, steps);
            assert_eq!(vb.vertex_count(), steps + 2);
            assert_eq!(vb.vertex(1), vb.vertex(steps as usize + 1));
        }
    }

    #[test]
    fn centre_comes_first() {
        let vb = circle_fan(3.0, 4.0, 1.0, 16);
        assert_eq!(vb.vertex(0), Some(&[3.0, 4.0][..]));
        assert_eq!(vb.vertex(1), Some(&[4.0, 4.0][..]));
    }

    #[test]
    fn small_step_counts_are_clamped() {
        for steps in [0, 1, 7] {
            assert_eq!(circle_fan(0.0, 0.0, 1.0, steps), circle_fan(0.0, 0.0, 1.0, 8));
        }
        assert_eq!(circle_vertex_count(3), 10);
    }

    #[test]
    fn rim_points_lie_on_circle() {
        let vb = circle_fan(1.0, -2.0, 7.0, 24);
        for i in 1..vb.vertex_count() as usize {
            let v = vb.vertex(i).unwrap();
            let r = ((v[0] - 1.0).powi(2) + (v[1] + 2.0).powi(2)).sqrt();
            assert!((r - 7.0).abs() < 1e-4, "vertex {i} at radius {r}");
        }
    }

    #[test]
    fn tex_coords_line_up_with_positions() {
        let steps = 12;
        let pos = circle_fan(0.0, 0.0, 1.0, steps);
        let uv = circle_tex_coords(steps);
        assert_eq!(uv.vertex_count(), pos.vertex_count());
        assert_eq!(uv.vertex(0), Some(&[0.5, 0.5][..]));
        for i in 1..pos.vertex_count() as usize {
            let p = pos.vertex(i).unwrap();
            let t = uv.vertex(i).unwrap();
            assert!(((p[0] + 1.0) / 2.0 - t[0]).abs() < 1e-6);
            assert!(((p[1] + 1.0) / 2.0 - t[1]).abs() < 1e-6);
            assert!((0.0..=1.0).contains(&t[0]) && (0.0..=1.0).contains(&t[1]));
        }
    }
}
