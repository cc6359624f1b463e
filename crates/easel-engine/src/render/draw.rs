/// Primitive assembly mode of a draw.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Topology {
    Points,
    Lines,
    LineStrip,
    Triangles,
    TriangleStrip,
    /// Drawn as an indexed triangle list (see [`fan_indices`]).
    TriangleFan,
}

impl Topology {
    pub(crate) fn to_wgpu(self) -> wgpu::PrimitiveTopology {
        match self {
            Self::Points => wgpu::PrimitiveTopology::PointList,
            Self::Lines => wgpu::PrimitiveTopology::LineList,
            Self::LineStrip => wgpu::PrimitiveTopology::LineStrip,
            Self::Triangles | Self::TriangleFan => wgpu::PrimitiveTopology::TriangleList,
            Self::TriangleStrip => wgpu::PrimitiveTopology::TriangleStrip,
        }
    }

    /// Fewest vertices that produce at least one primitive.
    pub fn min_vertices(self) -> u32 {
        match self {
            Self::Points => 1,
            Self::Lines | Self::LineStrip => 2,
            Self::Triangles | Self::TriangleStrip | Self::TriangleFan => 3,
        }
    }
}

/// One draw: `count` vertices starting at `first`.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct DrawCall {
    pub topology: Topology,
    pub count: u32,
    pub first: u32,
}

impl DrawCall {
    pub fn new(topology: Topology, count: u32) -> Self {
        Self {
            topology,
            count,
            first: 0,
        }
    }

    pub fn starting_at(mut self, first: u32) -> Self {
        self.first = first;
        self
    }

    /// One past the last vertex read.
    pub fn end(&self) -> u64 {
        self.first as u64 + self.count as u64
    }
}

/// Triangle-list indices equivalent to a fan over `count` vertices at `first`.
///
/// Vertex `first` is the hub; triangle `i` is `(first, first + i, first + i + 1)`.
pub fn fan_indices(first: u32, count: u32) -> Vec<u32> {
    if count < 3 {
        return Vec::new();
    }
    (1..count - 1)
        .flat_map(|i| [first, first + i, first + i + 1])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fan_indices_share_hub() {
        assert_eq!(fan_indices(0, 4), vec![0, 1, 2, 0, 2, 3]);
        assert_eq!(fan_indices(10, 3), vec![10, 11, 12]);
        assert!(fan_indices(0, 2).is_empty());
    }

    #[test]
    fn fan_index_count() {
        // A circle with 8 steps has 10 vertices and 8 triangles.
        assert_eq!(fan_indices(0, 10).len(), 8 * 3);
    }

    #[test]
    fn topology_mapping() {
        assert_eq!(Topology::TriangleFan.to_wgpu(), wgpu::PrimitiveTopology::TriangleList);
        assert_eq!(Topology::TriangleStrip.to_wgpu(), wgpu::PrimitiveTopology::TriangleStrip);
        assert_eq!(Topology::Points.to_wgpu(), wgpu::PrimitiveTopology::PointList);
        assert_eq!(Topology::Triangles.min_vertices(), 3);
    }

    #[test]
    fn draw_call_range() {
        let call = DrawCall::new(Topology::Triangles, 6).starting_at(4);
        assert_eq!(call.end(), 10);
    }
}
