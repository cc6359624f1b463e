use glam::{Mat3, Mat4, Vec3};

/// Pixel coordinates (origin top-left, +Y down) to clip space.
pub fn pixel_projection(width: f32, height: f32) -> Mat3 {
    Mat3::from_cols(
        Vec3::new(2.0 / width, 0.0, 0.0),
        Vec3::new(0.0, -2.0 / height, 0.0),
        Vec3::new(-1.0, 1.0, 1.0),
    )
}

/// Orthographic projection over a `width x height` pixel area, +Y down,
/// `z` in `[-depth, depth]` mapped to clip depth `[0, 1]`.
pub fn orthographic_pixels(width: f32, height: f32, depth: f32) -> Mat4 {
    Mat4::orthographic_rh(0.0, width, height, 0.0, -depth, depth)
}

pub fn perspective(fov_y_radians: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
    Mat4::perspective_rh(fov_y_radians, aspect, near, far)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn close2(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn pixel_corners_hit_clip_corners() {
        let m = pixel_projection(800.0, 600.0);
        assert!(close2(m.transform_point2(Vec2::ZERO), Vec2::new(-1.0, 1.0)));
        assert!(close2(m.transform_point2(Vec2::new(800.0, 600.0)), Vec2::new(1.0, -1.0)));
        assert!(close2(m.transform_point2(Vec2::new(400.0, 300.0)), Vec2::ZERO));
    }

    #[test]
    fn orthographic_corners_and_depth() {
        let m = orthographic_pixels(400.0, 200.0, 400.0);
        let tl = m.project_point3(Vec3::new(0.0, 0.0, 0.0));
        let br = m.project_point3(Vec3::new(400.0, 200.0, 0.0));
        assert!((tl.x + 1.0).abs() < 1e-5 && (tl.y - 1.0).abs() < 1e-5);
        assert!((br.x - 1.0).abs() < 1e-5 && (br.y + 1.0).abs() < 1e-5);

        let near = m.project_point3(Vec3::new(0.0, 0.0, 400.0)).z;
        let far = m.project_point3(Vec3::new(0.0, 0.0, -400.0)).z;
        assert!(near.abs() < 1e-5 && (far - 1.0).abs() < 1e-5);
    }

    #[test]
    fn perspective_maps_near_plane_to_zero() {
        let m = perspective(1.0, 1.5, 1.0, 100.0);
        let z = m.project_point3(Vec3::new(0.0, 0.0, -1.0)).z;
        assert!(z.abs() < 1e-5);
    }
}
