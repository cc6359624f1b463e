use glam::{Mat3, Vec2};

use super::{pixel_projection, to_radians};
use crate::coords::Viewport;

/// Translation, rotation (radians) and scale of a 2D shape.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform2D {
    pub translation: Vec2,
    pub rotation: f32,
    pub scale: Vec2,
}

impl Default for Transform2D {
    fn default() -> Self {
        Self {
            translation: Vec2::ZERO,
            rotation: 0.0,
            scale: Vec2::ONE,
        }
    }
}

impl Transform2D {
    pub fn new(translation: Vec2, rotation: f32, scale: Vec2) -> Self {
        Self {
            translation,
            rotation,
            scale,
        }
    }

    pub fn with_translation(self, translation: Vec2) -> Self {
        Self { translation, ..self }
    }

    pub fn with_rotation(self, radians: f32) -> Self {
        Self {
            rotation: radians,
            ..self
        }
    }

    pub fn with_rotation_degrees(self, degrees: f32) -> Self {
        self.with_rotation(to_radians(degrees))
    }

    pub fn with_scale(self, scale: Vec2) -> Self {
        Self { scale, ..self }
    }

    /// `T · R · S`: points are scaled, then rotated, then translated.
    pub fn compose(&self) -> Mat3 {
        Mat3::from_translation(self.translation) * Mat3::from_angle(self.rotation) * Mat3::from_scale(self.scale)
    }

    /// `compose()` followed by the pixel-to-clip projection for `viewport`.
    pub fn compose_in(&self, viewport: Viewport) -> Mat3 {
        pixel_projection(viewport.width, viewport.height) * self.compose()
    }

    pub fn apply(&self, point: Vec2) -> Vec2 {
        self.compose().transform_point2(point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn close(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn identity_by_default() {
        assert_eq!(Transform2D::default().compose(), Mat3::IDENTITY);
    }

    #[test]
    fn pure_translation() {
        let t = Transform2D::default().with_translation(Vec2::new(5.0, 0.0));
        assert!(close(t.apply(Vec2::ZERO), Vec2::new(5.0, 0.0)));
    }

    #[test]
    fn scale_doubles_points() {
        let t = Transform2D::default().with_scale(Vec2::splat(2.0));
        for p in [Vec2::new(1.0, 2.0), Vec2::new(-3.0, 0.5), Vec2::ZERO] {
            assert!(close(t.apply(p), p * 2.0));
        }
    }

    #[test]
    fn scale_then_rotate_then_translate() {
        let t = Transform2D::new(Vec2::new(10.0, 0.0), FRAC_PI_2, Vec2::new(2.0, 1.0));
        // (1,0) -> scale (2,0) -> rotate (0,2) -> translate (10,2)
        assert!(close(t.apply(Vec2::X), Vec2::new(10.0, 2.0)));
    }

    #[test]
    fn degrees_setter() {
        let t = Transform2D::default().with_rotation_degrees(90.0);
        assert!((t.rotation - FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn compose_in_maps_to_clip() {
        let vp = Viewport::new(200.0, 100.0);
        let m = Transform2D::default().with_translation(Vec2::new(100.0, 50.0)).compose_in(vp);
        assert!(close(m.transform_point2(Vec2::ZERO), Vec2::ZERO));
    }
}
