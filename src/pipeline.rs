//! Amalgamation Pipeline - Single Entry Point
//!
//! CRITICAL: assemble MUST call validate internally. No bypass.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::date::BuildDate;
use crate::filter::{DroppedLine, ImplementationFilter};
use crate::hashing::{compute_artifact_hash, compute_input_hash, compute_manifest_hash};
use crate::license::format_license;
use crate::sources::{write_artifact, SourceError, SourcePaths, SourceSet};
use crate::templates::HeaderTemplate;
use crate::validation::{ValidationResult, Validator};
use crate::ENGINE_VERSION;

#[cfg(feature = "test-hooks")]
use std::sync::atomic::{AtomicU32, Ordering};

#[cfg(feature = "test-hooks")]
static VALIDATION_CALL_COUNT: AtomicU32 = AtomicU32::new(0);

#[cfg(feature = "test-hooks")]
pub fn get_validation_call_count() -> u32 {
    VALIDATION_CALL_COUNT.load(Ordering::SeqCst)
}

#[cfg(feature = "test-hooks")]
pub fn reset_validation_call_count() {
    VALIDATION_CALL_COUNT.store(0, Ordering::SeqCst);
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    #[error("Template for {0} requires engine >= {1}, current is {2}")]
    EngineVersionMismatch(String, String, String),

    #[error("Invalid version: {0}")]
    InvalidVersion(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Source(#[from] SourceError),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmalgamationRequest {
    pub sources: SourceSet,
    pub date: BuildDate,
}

/// A finished artifact and the manifest describing how it was produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Amalgamation {
    pub id: String,
    pub header_name: String,
    pub build_date: BuildDate,
    pub engine_version: String,
    pub created_at: DateTime<Utc>,
    pub input_hash: String,
    pub artifact_hash: String,
    pub manifest_hash: String,
    pub dropped_lines: Vec<DroppedLine>,
    pub validation: ValidationResult,
    #[serde(skip)]
    pub text: String,
}

/// Compose the artifact: format the license, filter the implementation,
/// render the template. Pure.
pub fn amalgamate(sources: &SourceSet, template: &HeaderTemplate, date: BuildDate) -> String {
    let license_block = format_license(&sources.license);
    let implementation = ImplementationFilter::new(&template.header_name).apply(&sources.implementation);
    template.render(&sources.declarations, &implementation, &license_block, date)
}

/// The amalgamation pipeline - single entry point for all artifact operations
pub struct AmalgamationPipeline {
    template: HeaderTemplate,
    validator: Validator,
}

impl AmalgamationPipeline {
    pub fn new(template: HeaderTemplate) -> Self {
        Self {
            template,
            validator: Validator::new(),
        }
    }

    pub fn template(&self) -> &HeaderTemplate {
        &self.template
    }

    /// Validate sources against the template
    ///
    /// This is the ONLY validation entry point.
    pub fn validate(&self, sources: &SourceSet) -> Result<ValidationResult, PipelineError> {
        #[cfg(feature = "test-hooks")]
        VALIDATION_CALL_COUNT.fetch_add(1, Ordering::SeqCst);

        self.check_engine_version()?;

        let result = self.validator.validate(sources, &self.template);
        for v in result.warnings() {
            warn!(rule = %v.rule, "{}", v.message);
        }
        Ok(result)
    }

    /// Assemble an artifact in memory
    ///
    /// CRITICAL: This ALWAYS calls validate internally. No bypass possible.
    pub fn assemble(&self, request: &AmalgamationRequest) -> Result<Amalgamation, PipelineError> {
        let validation = self.validate(&request.sources)?;

        if !validation.valid {
            let messages: Vec<_> = validation.violations.iter()
                .map(|v| format!("{}: {}", v.rule, v.message))
                .collect();
            return Err(PipelineError::ValidationFailed(messages.join("; ")));
        }

        info!(
            header = %self.template.header_name,
            date = %request.date,
            "assembling single-header artifact"
        );

        let dropped_lines = ImplementationFilter::new(&self.template.header_name)
            .dropped(&request.sources.implementation);
        debug!(dropped = dropped_lines.len(), "filtered implementation");

        let text = amalgamate(&request.sources, &self.template, request.date);

        let input_hash = compute_input_hash(
            &self.template,
            &request.sources,
            request.date,
            ENGINE_VERSION,
        )?;

        let mut amalgamation = Amalgamation {
            id: Uuid::new_v4().to_string(),
            header_name: self.template.header_name.clone(),
            build_date: request.date,
            engine_version: ENGINE_VERSION.to_string(),
            created_at: Utc::now(),
            input_hash,
            artifact_hash: compute_artifact_hash(&text),
            manifest_hash: String::new(),  // Computed after
            dropped_lines,
            validation,
            text,
        };

        amalgamation.manifest_hash = compute_manifest_hash(&amalgamation)?;

        Ok(amalgamation)
    }

    /// Read the inputs, assemble, and write the artifact to `output`.
    pub fn build(
        &self,
        paths: &SourcePaths,
        output: &Path,
        date: BuildDate,
    ) -> Result<Amalgamation, PipelineError> {
        let sources = SourceSet::load(paths)?;
        let amalgamation = self.assemble(&AmalgamationRequest { sources, date })?;
        write_artifact(output, &amalgamation.text)?;

        info!(
            output = %output.display(),
            hash = %amalgamation.artifact_hash,
            "single-header artifact written"
        );
        Ok(amalgamation)
    }

    fn check_engine_version(&self) -> Result<(), PipelineError> {
        let engine_ver = semver::Version::parse(ENGINE_VERSION)
            .map_err(|_| PipelineError::InvalidVersion(ENGINE_VERSION.to_string()))?;
        let min_ver = semver::Version::parse(&self.template.engine_min_version)
            .map_err(|_| PipelineError::InvalidVersion(self.template.engine_min_version.clone()))?;

        if engine_ver < min_ver {
            return Err(PipelineError::EngineVersionMismatch(
                self.template.header_name.clone(),
                self.template.engine_min_version.clone(),
                ENGINE_VERSION.to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for AmalgamationPipeline {
    fn default() -> Self {
        Self::new(HeaderTemplate::default())
    }
}
