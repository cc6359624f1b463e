use glam::Vec3;

use super::VertexBuffer;

// Corner indices: bit 0 = x, bit 1 = y, bit 2 = z (set = max).
const FACES: [[usize; 4]; 6] = [
    [0, 2, 3, 1], // -z
    [4, 5, 7, 6], // +z
    [0, 1, 5, 4], // -y
    [2, 6, 7, 3], // +y
    [0, 4, 6, 2], // -x
    [1, 3, 7, 5], // +x
];

/// An axis-aligned box as 12 triangles (36 vertices, 3 components).
///
/// Faces wind counter-clockwise seen from outside in a right-handed frame,
/// in the order -z, +z, -y, +y, -x, +x.
pub fn cuboid(min: Vec3, max: Vec3) -> VertexBuffer {
    let corner = |i: usize| {
        Vec3::new(
            if i & 1 == 0 { min.x } else { max.x },
            if i & 2 == 0 { min.y } else { max.y },
            if i & 4 == 0 { min.z } else { max.z },
        )
    };

    let mut vb = VertexBuffer::with_capacity(3, 36);
    for [a, b, c, d] in FACES {
        for i in [a, b, c, a, c, d] {
            vb.push(&corner(i).to_array());
        }
    }
    vb
}

/// One flat RGBA colour per face, expanded to match [`cuboid`].
pub fn cuboid_face_colors(colors: [[f32; 4]; 6]) -> VertexBuffer {
    let mut vb = VertexBuffer::with_capacity(4, 36);
    for color in colors {
        for _ in 0..6 {
            vb.push(&color);
        }
    }
    vb
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v3(vb: &VertexBuffer, i: usize) -> Vec3 {
        Vec3::from_slice(vb.vertex(i).unwrap())
    }

    #[test]
    fn thirty_six_vertices() {
        let vb = cuboid(Vec3::ZERO, Vec3::ONE);
        assert_eq!(vb.vertex_count(), 36);
        assert_eq!(vb.components(), 3);
    }

    #[test]
    fn faces_point_outward() {
        let (min, max) = (Vec3::new(-1.0, -2.0, -3.0), Vec3::new(1.0, 2.0, 3.0));
        let vb = cuboid(min, max);
        let centre = (min + max) / 2.0;
        for tri in 0..12 {
            let (a, b, c) = (v3(&vb, tri * 3), v3(&vb, tri * 3 + 1), v3(&vb, tri * 3 + 2));
            let normal = (b - a).cross(c - a);
            let outward = (a + b + c) / 3.0 - centre;
            assert!(normal.dot(outward) > 0.0, "triangle {tri} faces inward");
        }
    }

    #[test]
    fn vertices_stay_on_box() {
        let vb = cuboid(Vec3::splat(2.0), Vec3::splat(4.0));
        for i in 0..36 {
            let v = v3(&vb, i);
            assert!(v.cmpge(Vec3::splat(2.0)).all() && v.cmple(Vec3::splat(4.0)).all());
        }
    }

    #[test]
    fn face_colors_match_cuboid() {
        let colors = [[1.0, 0.0, 0.0, 1.0]; 6];
        let vb = cuboid_face_colors(colors);
        assert_eq!(vb.vertex_count(), 36);
        assert_eq!(vb.components(), 4);
    }
}
