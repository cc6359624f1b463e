/// Flat vertex data: `components` floats per vertex, in draw order.
#[derive(Debug, Clone, PartialEq)]
pub struct VertexBuffer {
    components: u32,
    data: Vec<f32>,
}

impl VertexBuffer {
    /// `data.len()` must be a multiple of `components` (1..=4).
    pub fn new(components: u32, data: Vec<f32>) -> Self {
        debug_assert!((1..=4).contains(&components), "components must be 1..=4");
        debug_assert_eq!(data.len() % components as usize, 0, "partial vertex in buffer");
        Self { components, data }
    }

    pub fn with_capacity(components: u32, vertices: usize) -> Self {
        Self::new(components, Vec::with_capacity(vertices * components as usize))
    }

    pub fn components(&self) -> u32 {
        self.components
    }

    pub fn data(&self) -> &[f32] {
        &self.data
    }

    pub fn vertex_count(&self) -> u32 {
        (self.data.len() / self.components as usize) as u32
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Vertex `i` as a slice of `components` floats.
    pub fn vertex(&self, i: usize) -> Option<&[f32]> {
        let n = self.components as usize;
        self.data.get(i * n..(i + 1) * n)
    }

    pub fn push(&mut self, vertex: &[f32]) {
        debug_assert_eq!(vertex.len(), self.components as usize);
        self.data.extend_from_slice(vertex);
    }

    /// Appends every vertex of `other`; returns the index of its first vertex.
    pub fn append(&mut self, other: &VertexBuffer) -> u32 {
        debug_assert_eq!(self.components, other.components);
        let first = self.vertex_count();
        self.data.extend_from_slice(&other.data);
        first
    }

    /// `count` copies of one vertex (e.g. a flat colour per shape).
    pub fn repeated(vertex: &[f32], count: u32) -> Self {
        Self::new(vertex.len() as u32, vertex.repeat(count as usize))
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.data)
    }
}
