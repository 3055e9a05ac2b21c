//! Load-time error taxonomy.
//!
//! The content corpus is static and developer-controlled, so malformed
//! authored data is a construction failure, never a runtime condition: the
//! registry refuses to build rather than deferring null-checks to query time.
//! Ordinary "not found" outcomes (unknown region id, unmatched symptom name)
//! are represented as `Option`/empty results by the query operations and
//! never appear in this enum.

use soma_types::{ComplaintId, RegionId};

/// Errors raised while parsing and validating the content corpus.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// The corpus document did not match the wire schema. `path` is a
    /// best-effort dotted path to the failing field (e.g.
    /// `regions[3].explanations.level4`).
    #[error("corpus schema mismatch at {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("duplicate region id: {0}")]
    DuplicateRegion(RegionId),

    #[error("region '{region}': duplicate complaint id: {complaint}")]
    DuplicateComplaint {
        region: RegionId,
        complaint: ComplaintId,
    },

    #[error("region '{region}': bounding box min exceeds max on the {axis} axis")]
    InvalidBoundingBox { region: RegionId, axis: char },

    /// A primary (non-mirror) region seed left out a field that every fully
    /// authored region must carry.
    #[error("region '{region}': missing required content: {field}")]
    MissingContent {
        region: RegionId,
        field: &'static str,
    },

    #[error("region '{region}': mirror source '{mirror_source}' does not exist")]
    MirrorSourceMissing {
        region: RegionId,
        mirror_source: RegionId,
    },

    /// Mirror chains are not supported; a mirror must name a fully authored
    /// primary region.
    #[error("region '{region}': mirror source '{mirror_source}' is itself a mirror")]
    MirrorOfMirror {
        region: RegionId,
        mirror_source: RegionId,
    },
}

/// Result type for registry construction.
pub type RegistryResult<T> = Result<T, RegistryError>;
