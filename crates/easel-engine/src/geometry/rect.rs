use super::VertexBuffer;

/// Four corners of an axis-aligned rectangle in triangle-strip order:
/// `(x, y), (x, y+h), (x+w, y), (x+w, y+h)`.
pub fn rectangle(x: f32, y: f32, width: f32, height: f32) -> VertexBuffer {
    let (x2, y2) = (x + width, y + height);
    VertexBuffer::new(2, vec![x, y, x, y2, x2, y, x2, y2])
}

/// The same rectangle as two independent triangles (six vertices).
pub fn rectangle_triangles(x: f32, y: f32, width: f32, height: f32) -> VertexBuffer {
    let (x2, y2) = (x + width, y + height);
    VertexBuffer::new(
        2,
        vec![
            x, y, x2, y, x, y2, //
            x, y2, x2, y, x2, y2,
        ],
    )
}

/// Texture coordinates matching [`rectangle`] vertex for vertex.
pub fn rectangle_tex_coords() -> VertexBuffer {
    VertexBuffer::new(2, vec![0.0, 0.0, 0.0, 1.0, 1.0, 0.0, 1.0, 1.0])
}
