//! shlforge Core - Single-Header Library Amalgamator
//!
//! Packs a C library's header, implementation and license into one header:
//! declarations always visible, implementation compiled only where the
//! includer defines the activation symbol.
//!
//! # Guarantees
//! 1. Declarations Pass Through Verbatim
//! 2. Implementation Is Guarded Twice (activation + include guard)
//! 3. C Linkage Under C++
//! 4. Deterministic Output For A Fixed Date

pub mod date;
pub mod license;
pub mod filter;
pub mod templates;
pub mod validation;
pub mod hashing;
pub mod sources;
pub mod pipeline;

pub use date::BuildDate;
pub use license::format_license;
pub use filter::{filter_implementation, dropped_lines, split_lines, DroppedLine, ImplementationFilter};
pub use templates::{HeaderTemplate, FailureMode};
pub use validation::{ValidationResult, ValidationRule, ValidationViolation, ViolationSeverity};
pub use hashing::{compute_artifact_hash, compute_manifest_hash, compute_input_hash};
pub use sources::{SourceSet, SourcePaths};
pub use pipeline::{amalgamate, AmalgamationPipeline, Amalgamation, AmalgamationRequest, PipelineError};

pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");
pub const MIN_ENGINE_VERSION: &str = "1.0.0";
