use std::path::PathBuf;

pub type SliceStripResult<T> = Result<T, SliceStripError>;

#[derive(thiserror::Error, Debug)]
pub enum SliceStripError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("missing tool: '{0}' was not found on PATH")]
    MissingTool(String),

    #[error("missing input: '{}' does not exist", .0.display())]
    MissingInput(PathBuf),

    #[error("tool error: {0}")]
    Tool(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SliceStripError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn missing_tool(program: impl Into<String>) -> Self {
        Self::MissingTool(program.into())
    }

    pub fn missing_input(path: impl Into<PathBuf>) -> Self {
        Self::MissingInput(path.into())
    }

    pub fn tool(msg: impl Into<String>) -> Self {
        Self::Tool(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_are_stable() {
        assert!(
            SliceStripError::validation("x")
                .to_string()
                .contains("validation error:")
        );
        assert!(
            SliceStripError::missing_tool("mrview")
                .to_string()
                .contains("'mrview' was not found on PATH")
        );
        assert!(
            SliceStripError::missing_input("masks/left.nii")
                .to_string()
                .contains("masks/left.nii")
        );
        assert!(SliceStripError::tool("x").to_string().contains("tool error:"));
    }

    #[test]
    fn other_preserves_source() {
        let base = std::io::Error::other("boom");
        let err = SliceStripError::Other(anyhow::Error::new(base));
        assert!(err.to_string().contains("boom"));
    }
}
