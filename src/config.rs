// src/config.rs
//! Where compiled programs are written and which runtime library they get

use crate::CompileError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_OUTPUT_DIR: &str = "Compiled";
pub const DEFAULT_APP_FILE_NAME: &str = "BhAppScript.js";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompilerConfig {
    pub output_dir: PathBuf,
    pub app_file_name: String,
    /// Directory with `common.js`, `local.js` and `remote.js` replacing the
    /// built-in runtime library
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runtime_dir: Option<PathBuf>,
}

impl CompilerConfig {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            ..Self::default()
        }
    }

    pub fn with_app_file_name(mut self, name: impl Into<String>) -> Self {
        self.app_file_name = name.into();
        self
    }

    pub fn with_runtime_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.runtime_dir = Some(dir.into());
        self
    }

    pub fn from_json(json: &str) -> Result<Self, CompileError> {
        serde_json::from_str(json).map_err(|e| CompileError::Config(e.to_string()))
    }

    /// Fixed location of the compiled program
    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(&self.app_file_name)
    }
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            app_file_name: DEFAULT_APP_FILE_NAME.to_string(),
            runtime_dir: None,
        }
    }
}
