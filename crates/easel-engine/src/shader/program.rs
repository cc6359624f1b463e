use std::collections::HashMap;

use super::link::link;
use super::reflect::{Location, UniformSlot};
use super::stage::compile_stage;
use super::{ShaderError, ShaderLanguage, ShaderSource, ShaderStage};

/// A linked, validated shader program.
///
/// Holds both stage modules plus the cached name tables. Only constructed by
/// a successful link, so every instance is usable for pipeline creation.
#[derive(Debug, Clone)]
pub struct CompiledProgram {
    vertex: naga::Module,
    fragment: naga::Module,
    vertex_entry: String,
    fragment_entry: String,
    attributes: HashMap<String, u32>,
    attribute_components: HashMap<String, u32>,
    uniforms: HashMap<String, UniformSlot>,
}

/// Compiles and links a vertex/fragment source pair.
///
/// The vertex stage is compiled first; if it fails the fragment stage is never
/// compiled and linking is not attempted. Intermediate stage modules are
/// released on every path.
pub fn compile(language: ShaderLanguage, vertex_src: &str, fragment_src: &str) -> Result<CompiledProgram, ShaderError> {
    let vertex = compile_stage(ShaderStage::Vertex, language, vertex_src)?;
    let fragment = compile_stage(ShaderStage::Fragment, language, fragment_src)?;
    link(vertex, fragment)
}

impl CompiledProgram {
    pub(super) fn new(
        vertex: naga::Module,
        fragment: naga::Module,
        vertex_entry: String,
        fragment_entry: String,
        attributes: HashMap<String, u32>,
        attribute_components: HashMap<String, u32>,
        uniforms: HashMap<String, UniformSlot>,
    ) -> Self {
        Self {
            vertex,
            fragment,
            vertex_entry,
            fragment_entry,
            attributes,
            attribute_components,
            uniforms,
        }
    }

    pub fn from_source(source: &ShaderSource) -> Result<Self, ShaderError> {
        compile(source.language, &source.vertex, &source.fragment)
    }

    /// Resolves a shader-visible name. Attributes are searched first.
    ///
    /// Unknown names produce `Location::NotFound` and a warning; that is the
    /// only diagnostic for a misspelled name.
    pub fn resolve(&self, name: &str) -> Location {
        if let Some(&loc) = self.attributes.get(name) {
            return Location::Attribute(loc);
        }
        if let Some(&slot) = self.uniforms.get(name) {
            return Location::Uniform(slot);
        }
        log::warn!("shader program has no active attribute or uniform named `{name}`");
        Location::NotFound
    }

    pub fn attribute_location(&self, name: &str) -> Option<u32> {
        self.attributes.get(name).copied()
    }

    /// Scalar count of a scalar or vector attribute (`vec3<f32>` is 3).
    pub fn attribute_components(&self, name: &str) -> Option<u32> {
        self.attribute_components.get(name).copied()
    }

    pub fn uniform_slot(&self, name: &str) -> Option<UniformSlot> {
        self.uniforms.get(name).copied()
    }

    /// A name-to-location lookup bound to this program.
    pub fn resolver(&self) -> impl Fn(&str) -> Location + '_ {
        move |name| self.resolve(name)
    }

    /// Active attributes, ordered by location.
    pub fn attributes(&self) -> Vec<(&str, u32)> {
        let mut out: Vec<_> = self.attributes.iter().map(|(n, &l)| (n.as_str(), l)).collect();
        out.sort_by_key(|&(_, l)| l);
        out
    }

    /// Active uniforms, ordered by (group, binding).
    pub fn uniforms(&self) -> Vec<(&str, UniformSlot)> {
        let mut out: Vec<_> = self.uniforms.iter().map(|(n, &s)| (n.as_str(), s)).collect();
        out.sort_by_key(|(_, s)| s.key());
        out
    }

    pub fn vertex_module(&self) -> &naga::Module {
        &self.vertex
    }

    pub fn fragment_module(&self) -> &naga::Module {
        &self.fragment
    }

    pub fn vertex_entry(&self) -> &str {
        &self.vertex_entry
    }

    pub fn fragment_entry(&self) -> &str {
        &self.fragment_entry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shader::UniformKind;

    const VS: &str = r#"
struct VsOut {
    @builtin(position) pos: vec4<f32>,
    @location(0) color: vec4<f32>,
};

@group(0) @binding(0) var<uniform> u_matrix: mat3x3<f32>;
@group(0) @binding(1) var<uniform> u_unused: vec4<f32>;

@vertex
fn vs_main(@location(0) a_position: vec2<f32>, @location(1) a_color: vec4<f32>) -> VsOut {
    var out: VsOut;
    let p = u_matrix * vec3<f32>(a_position, 1.0);
    out.pos = vec4<f32>(p.xy, 0.0, 1.0);
    out.color = a_color;
    return out;
}
"#;

    const FS: &str = r#"
@group(0) @binding(2) var<uniform> u_tint: vec4<f32>;

@fragment
fn fs_main(@location(0) color: vec4<f32>) -> @location(0) vec4<f32> {
    return color * u_tint;
}
"#;

    #[test]
    fn compiles_and_reflects() {
        let program = compile(ShaderLanguage::Wgsl, VS, FS).unwrap();

        assert_eq!(program.resolve("a_position"), Location::Attribute(0));
        assert_eq!(program.resolve("a_color"), Location::Attribute(1));
        assert_eq!(
            program.resolve("u_matrix"),
            Location::Uniform(UniformSlot {
                group: 0,
                binding: 0,
                kind: UniformKind::Buffer { size: 48 },
            })
        );
        assert_eq!(program.uniform_slot("u_tint").map(|s| s.binding), Some(2));
        assert_eq!(program.vertex_entry(), "vs_main");
        assert_eq!(program.fragment_entry(), "fs_main");
        assert_eq!(program.attributes(), vec![("a_position", 0), ("a_color", 1)]);
        assert_eq!(program.attribute_components("a_position"), Some(2));
        assert_eq!(program.attribute_components("a_color"), Some(4));
        assert_eq!(program.attribute_components("u_matrix"), None);
    }

    #[test]
    fn unknown_and_inactive_names_are_not_found() {
        let program = compile(ShaderLanguage::Wgsl, VS, FS).unwrap();
        assert_eq!(program.resolve("a_positon"), Location::NotFound);
        // Declared but never read by the entry point.
        assert_eq!(program.resolve("u_unused"), Location::NotFound);
        assert_eq!(program.attribute_location("u_matrix"), None);

        let resolve = program.resolver();
        assert_eq!(resolve("a_color"), Location::Attribute(1));
    }

    #[test]
    fn vertex_error_stops_before_fragment() {
        // The fragment source would also fail, but only the vertex error is reported.
        let err = compile(ShaderLanguage::Wgsl, "@vertex fn vs_main( {", "not wgsl at all").unwrap_err();
        assert_eq!(err.stage(), Some(ShaderStage::Vertex));
    }

    #[test]
    fn fragment_error_is_reported_as_fragment() {
        let err = compile(ShaderLanguage::Wgsl, VS, "@fragment fn fs_main() -> @location(0) vec4<f32> { return }")
            .unwrap_err();
        assert_eq!(err.stage(), Some(ShaderStage::Fragment));
    }

    #[test]
    fn mismatched_varying_fails_to_link() {
        let fs = r#"
@fragment
fn fs_main(@location(0) color: vec3<f32>) -> @location(0) vec4<f32> {
    return vec4<f32>(color, 1.0);
}
"#;
        let err = compile(ShaderLanguage::Wgsl, VS, fs).unwrap_err();
        assert!(matches!(err, ShaderError::Link { .. }));
        assert!(err.log().contains("does not match"));
    }

    #[test]
    fn unwritten_varying_fails_to_link() {
        let fs = r#"
@fragment
fn fs_main(@location(3) uv: vec2<f32>) -> @location(0) vec4<f32> {
    return vec4<f32>(uv, 0.0, 1.0);
}
"#;
        let err = compile(ShaderLanguage::Wgsl, VS, fs).unwrap_err();
        assert!(err.log().contains("not written by the vertex stage"));
    }

    #[test]
    fn missing_entry_points_are_all_reported() {
        let err = compile(ShaderLanguage::Wgsl, "fn helper() {}", "fn other() {}").unwrap_err();
        let log = err.log();
        assert!(log.contains("no vertex entry point"));
        assert!(log.contains("no fragment entry point"));
    }

    #[test]
    fn vertex_without_position_fails_to_link() {
        let vs = r#"
@vertex
fn vs_main(@location(0) p: vec2<f32>) -> @location(0) vec4<f32> {
    return vec4<f32>(p, 0.0, 1.0);
}
"#;
        let fs = "@fragment fn fs_main() -> @location(0) vec4<f32> { return vec4<f32>(1.0); }";
        let err = compile(ShaderLanguage::Wgsl, vs, fs).unwrap_err();
        assert!(err.log().contains("@builtin(position)"));
    }

    #[test]
    fn conflicting_bindings_fail_to_link() {
        let fs = r#"
@group(0) @binding(0) var<uniform> u_other: vec4<f32>;
@fragment
fn fs_main(@location(0) color: vec4<f32>) -> @location(0) vec4<f32> {
    return color * u_other;
}
"#;
        let err = compile(ShaderLanguage::Wgsl, VS, fs).unwrap_err();
        assert!(err.log().contains("@group(0) @binding(0)"));
    }

    #[test]
    fn glsl_pair_compiles() {
        let vs = r#"#version 450
layout(location = 0) in vec2 a_position;
layout(location = 0) out vec2 v_uv;
layout(set = 0, binding = 0) uniform Locals { mat4 u_matrix; };
void main() {
    v_uv = a_position;
    gl_Position = u_matrix * vec4(a_position, 0.0, 1.0);
}
"#;
        let fs = r#"#version 450
layout(location = 0) in vec2 v_uv;
layout(location = 0) out vec4 o_color;
void main() {
    o_color = vec4(v_uv, 0.0, 1.0);
}
"#;
        let program = compile(ShaderLanguage::Glsl, vs, fs).unwrap();
        assert_eq!(program.attribute_location("a_position"), Some(0));
        assert_eq!(program.vertex_entry(), "main");
    }

    #[test]
    fn from_source_uses_language() {
        let src = ShaderSource::wgsl(VS, FS);
        assert!(CompiledProgram::from_source(&src).is_ok());
        let glsl = ShaderSource::glsl(VS, FS);
        assert!(CompiledProgram::from_source(&glsl).is_err());
    }
}
