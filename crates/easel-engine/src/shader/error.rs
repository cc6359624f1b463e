use super::ShaderStage;

/// Failure to build a shader program.
///
/// `log` is the compiler's diagnostic text, untranslated. Shader text is static
/// input, so neither variant is worth retrying without changing the source.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShaderError {
    #[error("failed to compile {stage} shader:\n{log}")]
    Compile { stage: ShaderStage, log: String },

    #[error("failed to link shader program:\n{log}")]
    Link { log: String },
}

impl ShaderError {
    /// Stage that failed to compile; `None` for link failures.
    pub fn stage(&self) -> Option<ShaderStage> {
        match self {
            Self::Compile { stage, .. } => Some(*stage),
            Self::Link { .. } => None,
        }
    }

    pub fn log(&self) -> &str {
        match self {
            Self::Compile { log, .. } | Self::Link { log } => log,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_stage() {
        let err = ShaderError::Compile {
            stage: ShaderStage::Fragment,
            log: "expected `;`".into(),
        };
        assert_eq!(err.to_string(), "failed to compile fragment shader:\nexpected `;`");
        assert_eq!(err.stage(), Some(ShaderStage::Fragment));
    }

    #[test]
    fn link_errors_have_no_stage() {
        let err = ShaderError::Link { log: "missing".into() };
        assert_eq!(err.stage(), None);
        assert_eq!(err.log(), "missing");
    }
}
