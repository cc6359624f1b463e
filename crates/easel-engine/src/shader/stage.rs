use naga::valid::{Capabilities, ModuleInfo, ValidationFlags, Validator};

use super::{ShaderError, ShaderLanguage, ShaderStage};

/// One parsed and validated shader stage.
#[derive(Debug)]
pub(crate) struct StageModule {
    pub stage: ShaderStage,
    pub module: naga::Module,
    pub info: ModuleInfo,
}

impl StageModule {
    /// Index of the first entry point for this module's stage.
    pub fn entry_index(&self) -> Option<usize> {
        let stage = self.stage.to_naga();
        self.module.entry_points.iter().position(|ep| ep.stage == stage)
    }
}

/// Parses and validates `source` as `stage`.
///
/// On failure the error carries the front end's (or validator's) diagnostic text.
pub(crate) fn compile_stage(
    stage: ShaderStage,
    language: ShaderLanguage,
    source: &str,
) -> Result<StageModule, ShaderError> {
    let module = parse(stage, language, source)?;

    let info = Validator::new(ValidationFlags::all(), Capabilities::all())
        .validate(&module)
        .map_err(|e| ShaderError::Compile {
            stage,
            log: e.emit_to_string(source),
        })?;

    log::debug!(
        "compiled {stage} stage: {} entry point(s), {} global(s)",
        module.entry_points.len(),
        module.global_variables.len()
    );

    Ok(StageModule { stage, module, info })
}

fn parse(stage: ShaderStage, language: ShaderLanguage, source: &str) -> Result<naga::Module, ShaderError> {
    match language {
        ShaderLanguage::Wgsl => naga::front::wgsl::parse_str(source).map_err(|e| ShaderError::Compile {
            stage,
            log: e.emit_to_string(source),
        }),
        ShaderLanguage::Glsl => {
            let mut frontend = naga::front::glsl::Frontend::default();
            frontend
                .parse(&naga::front::glsl::Options::from(stage.to_naga()), source)
                .map_err(|e| ShaderError::Compile {
                    stage,
                    log: e.emit_to_string(source),
                })
        }
    }
}
