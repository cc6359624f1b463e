use std::fmt;
use std::path::Path;

/// Source language of a shader stage.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ShaderLanguage {
    Wgsl,
    /// GLSL as accepted by naga's front end (uniforms must live in blocks).
    Glsl,
}

impl ShaderLanguage {
    /// Guesses the language from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "wgsl" => Some(Self::Wgsl),
            "vert" | "frag" | "glsl" => Some(Self::Glsl),
            _ => None,
        }
    }
}

/// Pipeline stage of a shader.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    pub(crate) fn to_naga(self) -> naga::ShaderStage {
        match self {
            Self::Vertex => naga::ShaderStage::Vertex,
            Self::Fragment => naga::ShaderStage::Fragment,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Vertex => "vertex",
            Self::Fragment => "fragment",
        })
    }
}

/// A vertex/fragment source pair. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderSource {
    pub language: ShaderLanguage,
    pub vertex: String,
    pub fragment: String,
}

impl ShaderSource {
    pub fn new(language: ShaderLanguage, vertex: impl Into<String>, fragment: impl Into<String>) -> Self {
        Self {
            language,
            vertex: vertex.into(),
            fragment: fragment.into(),
        }
    }

    pub fn wgsl(vertex: impl Into<String>, fragment: impl Into<String>) -> Self {
        Self::new(ShaderLanguage::Wgsl, vertex, fragment)
    }

    pub fn glsl(vertex: impl Into<String>, fragment: impl Into<String>) -> Self {
        Self::new(ShaderLanguage::Glsl, vertex, fragment)
    }

    /// Text of one stage.
    pub fn stage(&self, stage: ShaderStage) -> &str {
        match stage {
            ShaderStage::Vertex => &self.vertex,
            ShaderStage::Fragment => &self.fragment,
        }
    }
}
