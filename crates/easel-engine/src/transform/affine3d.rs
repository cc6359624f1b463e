use glam::{Mat4, Vec3};

/// Translation, per-axis rotation (radians) and scale of a 3D object.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform3D {
    pub translation: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for Transform3D {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Transform3D {
    pub fn with_translation(self, translation: Vec3) -> Self {
        Self { translation, ..self }
    }

    pub fn with_rotation(self, radians: Vec3) -> Self {
        Self {
            rotation: radians,
            ..self
        }
    }

    pub fn with_scale(self, scale: Vec3) -> Self {
        Self { scale, ..self }
    }

    /// `T · Rx · Ry · Rz · S`.
    pub fn compose(&self) -> Mat4 {
        Mat4::from_translation(self.translation)
            * Mat4::from_rotation_x(self.rotation.x)
            * Mat4::from_rotation_y(self.rotation.y)
            * Mat4::from_rotation_z(self.rotation.z)
            * Mat4::from_scale(self.scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn close(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn identity_by_default() {
        assert_eq!(Transform3D::default().compose(), Mat4::IDENTITY);
    }

    #[test]
    fn translation_and_scale() {
        let t = Transform3D::default()
            .with_translation(Vec3::new(1.0, 2.0, 3.0))
            .with_scale(Vec3::splat(2.0));
        assert!(close(t.compose().transform_point3(Vec3::ONE), Vec3::new(3.0, 4.0, 5.0)));
    }

    #[test]
    fn z_rotation_applies_before_x() {
        let t = Transform3D::default().with_rotation(Vec3::new(FRAC_PI_2, 0.0, FRAC_PI_2));
        // Rz: X -> Y, then Rx: Y -> Z
        assert!(close(t.compose().transform_point3(Vec3::X), Vec3::Z));
    }
}
