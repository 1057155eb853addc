//! Hashing System - SHA-256 for Build Manifests
//!
//! Same inputs and same date give the same artifact, so the digests below let
//! a build be checked for reproduction.

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::date::BuildDate;
use crate::sources::SourceSet;
use crate::templates::HeaderTemplate;

/// JSON with object keys in sorted order (`serde_json::Map` is a `BTreeMap`).
fn canonical_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>, serde_json::Error> {
    serde_json::to_vec(&serde_json::to_value(value)?)
}

/// Hash of the finished artifact text
pub fn compute_artifact_hash(text: &str) -> String {
    hex::encode(Sha256::digest(text.as_bytes()))
}

/// Hash of a serialized manifest, taken while its own hash field is empty
pub fn compute_manifest_hash<T: Serialize>(manifest: &T) -> Result<String, serde_json::Error> {
    Ok(hex::encode(Sha256::digest(canonical_bytes(manifest)?)))
}

/// Everything that determines the artifact bytes. Fields are NUL-separated.
pub fn compute_input_hash(
    template: &HeaderTemplate,
    sources: &SourceSet,
    date: BuildDate,
    engine_version: &str,
) -> Result<String, serde_json::Error> {
    let mut hasher = Sha256::new();
    for part in [
        canonical_bytes(template)?,
        canonical_bytes(sources)?,
        date.to_string().into_bytes(),
        engine_version.as_bytes().to_vec(),
    ] {
        hasher.update(&part);
        hasher.update([0u8]);
    }
    Ok(hex::encode(hasher.finalize()))
}
