use glam::{Mat3, Mat4, Vec2, Vec3, Vec4};

use crate::coords::Color;

/// A value for a uniform buffer slot.
///
/// Byte layout follows WGSL uniform rules: `mat3x3<f32>` is three padded
/// columns (48 bytes), everything else is tightly packed.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum UniformValue {
    Float(f32),
    Int(i32),
    Vec2(Vec2),
    Vec3(Vec3),
    Vec4(Vec4),
    Mat3(Mat3),
    Mat4(Mat4),
}

impl UniformValue {
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            Self::Float(v) => bytemuck::bytes_of(v).to_vec(),
            Self::Int(v) => bytemuck::bytes_of(v).to_vec(),
            Self::Vec2(v) => bytemuck::cast_slice(&v.to_array()).to_vec(),
            Self::Vec3(v) => bytemuck::cast_slice(&v.to_array()).to_vec(),
            Self::Vec4(v) => bytemuck::cast_slice(&v.to_array()).to_vec(),
            Self::Mat3(m) => {
                let padded: [[f32; 4]; 3] = [
                    m.x_axis.extend(0.0).to_array(),
                    m.y_axis.extend(0.0).to_array(),
                    m.z_axis.extend(0.0).to_array(),
                ];
                bytemuck::cast_slice(&padded).to_vec()
            }
            Self::Mat4(m) => bytemuck::cast_slice(&m.to_cols_array()).to_vec(),
        }
    }
}

impl From<f32> for UniformValue {
    fn from(v: f32) -> Self {
        Self::Float(v)
    }
}

impl From<i32> for UniformValue {
    fn from(v: i32) -> Self {
        Self::Int(v)
    }
}

impl From<Vec2> for UniformValue {
    fn from(v: Vec2) -> Self {
        Self::Vec2(v)
    }
}

impl From<Vec3> for UniformValue {
    fn from(v: Vec3) -> Self {
        Self::Vec3(v)
    }
}

impl From<Vec4> for UniformValue {
    fn from(v: Vec4) -> Self {
        Self::Vec4(v)
    }
}

impl From<Color> for UniformValue {
    fn from(c: Color) -> Self {
        Self::Vec4(Vec4::from_array(c.to_array()))
    }
}

impl From<Mat3> for UniformValue {
    fn from(m: Mat3) -> Self {
        Self::Mat3(m)
    }
}

impl From<Mat4> for UniformValue {
    fn from(m: Mat4) -> Self {
        Self::Mat4(m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn floats(bytes: &[u8]) -> Vec<f32> {
        bytes
            .chunks_exact(4)
            .map(|c| f32::from_ne_bytes([c[0], c[1], c[2], c[3]]))
            .collect()
    }

    #[test]
    fn mat3_is_column_padded() {
        let m = Mat3::from_cols(Vec3::new(1.0, 2.0, 3.0), Vec3::new(4.0, 5.0, 6.0), Vec3::new(7.0, 8.0, 9.0));
        let bytes = UniformValue::from(m).to_bytes();
        assert_eq!(bytes.len(), 48);
        assert_eq!(floats(&bytes), vec![1.0, 2.0, 3.0, 0.0, 4.0, 5.0, 6.0, 0.0, 7.0, 8.0, 9.0, 0.0]);
    }

    #[test]
    fn packed_sizes() {
        assert_eq!(UniformValue::Float(1.0).to_bytes().len(), 4);
        assert_eq!(UniformValue::Int(-1).to_bytes().len(), 4);
        assert_eq!(UniformValue::Vec2(Vec2::ONE).to_bytes().len(), 8);
        assert_eq!(UniformValue::Vec3(Vec3::ONE).to_bytes().len(), 12);
        assert_eq!(UniformValue::Mat4(Mat4::IDENTITY).to_bytes().len(), 64);
    }

    #[test]
    fn color_becomes_vec4() {
        let v = UniformValue::from(Color::new(0.1, 0.2, 0.3, 1.0));
        assert_eq!(v, UniformValue::Vec4(Vec4::new(0.1, 0.2, 0.3, 1.0)));
    }
}
