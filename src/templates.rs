//! Header Template - The Artifact Contract
//!
//! Declarations stay visible to every includer. The implementation body only
//! appears when the includer defines the activation symbol, sits behind a
//! second guard so it is emitted once per translation unit, and is wrapped in
//! `extern "C"` for C++ callers.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::date::BuildDate;

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Failed to read template {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid template {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderTemplate {
    /// Name of the declarations header. Implementation lines containing it are dropped.
    pub header_name: String,
    /// Name of the implementation source, shown in the banner.
    pub source_name: String,
    pub activation_symbol: String,
    pub guard_symbol: String,
    #[serde(default = "default_engine_min_version")]
    pub engine_min_version: String,
    #[serde(default)]
    pub failure_mode: FailureMode,
}

/// What the validator does with error-level violations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailureMode {
    #[default]
    Block,
    Warn,
    Log,
}

fn default_engine_min_version() -> String {
    crate::MIN_ENGINE_VERSION.to_string()
}

impl HeaderTemplate {
    /// Derive a template from file names: `my_lib.h` gives `MY_LIB_IMPL` and
    /// `MY_LIB_IMPL_GUARD`.
    pub fn for_header(header_name: &str, source_name: &str) -> Self {
        let prefix = symbol_prefix(header_name);
        Self {
            header_name: header_name.to_string(),
            source_name: source_name.to_string(),
            activation_symbol: format!("{}_IMPL", prefix),
            guard_symbol: format!("{}_IMPL_GUARD", prefix),
            engine_min_version: default_engine_min_version(),
            failure_mode: FailureMode::default(),
        }
    }

    pub fn load_from_file(path: &Path) -> Result<Self, TemplateError> {
        let content = fs::read_to_string(path).map_err(|source| TemplateError::Read {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| TemplateError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Assemble the artifact. `implementation` must already be filtered and
    /// `license_block` already formatted.
    pub fn render(
        &self,
        declarations: &str,
        implementation: &str,
        license_block: &str,
        date: BuildDate,
    ) -> String {
        format!(
            "/**\n\
             \x20* This header was automatically built using\n\
             \x20* {header} and {source}\n\
             \x20* @date {date}\n\
             \x20*\n\
             {license}\n\
             \x20*/\n\
             {api}\n\
             \n\
             #ifdef {activation}\n\
             #ifndef {guard}\n\
             #define {guard}\n\
             #ifdef __cplusplus\n\
             extern \"C\" {{\n\
             #endif\n\
             {implementation}\n\
             #ifdef __cplusplus\n\
             }}\n\
             #endif\n\
             #endif // {guard}\n\
             #endif // {activation}\n",
            header = self.header_name,
            source = self.source_name,
            date = date,
            license = license_block,
            api = declarations,
            activation = self.activation_symbol,
            guard = self.guard_symbol,
            implementation = implementation,
        )
    }
}

impl Default for HeaderTemplate {
    fn default() -> Self {
        Self::for_header("embedded_cli.h", "embedded_cli.c")
    }
}

fn symbol_prefix(header_name: &str) -> String {
    let stem = Path::new(header_name)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut prefix: String = stem
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_uppercase() } else { '_' })
        .collect();

    if prefix.is_empty() || prefix.starts_with(|c: char| c.is_ascii_digit()) {
        prefix.insert(0, '_');
    }
    prefix
}
