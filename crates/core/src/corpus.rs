//! Content corpus wire schema and strict loader.
//!
//! The corpus is the static, authored payload the engine consumes: an ordered
//! list of region seeds. Order matters (it is the declaration order used for
//! spatial tie-breaking), so the document is a JSON array, not an object.
//!
//! A seed is either fully authored, or declares `mirrorOf` naming a primary
//! region. Mirror seeds carry only their own identity and bounding box; their
//! content fields are populated from the primary during registry
//! construction (bilateral mirroring).
//!
//! Parsing is strict: unknown fields are rejected and schema mismatches are
//! reported with a best-effort path to the failing field.

use serde::Deserialize;
use soma_types::RegionId;

use crate::error::{RegistryError, RegistryResult};
use crate::geometry::BoundingBox;
use crate::model::{
    ChiefComplaint, DifferentialAnatomy, Explanations, RedFlag, RegionalAnatomy,
};

/// The content corpus shipped with this crate: the authored body-region
/// definitions the default registry is built from.
const EMBEDDED_CORPUS: &str = include_str!("../content/regions.json");

/// One authored region entry as it appears in the corpus document.
///
/// For primary regions, `region_description`, `regional_anatomy` and
/// `explanations` are required (enforced during registry construction, not
/// here, so that the error can name the offending region). For mirror seeds
/// every content field is ignored in favour of the primary's.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RegionSeed {
    pub region_id: RegionId,
    pub region_name: String,
    #[serde(default)]
    pub localized_name: Option<String>,
    #[serde(default)]
    pub region_description: Option<String>,
    pub bounding_box: BoundingBox,
    /// Names the primary region this seed mirrors, if any.
    #[serde(default)]
    pub mirror_of: Option<RegionId>,
    #[serde(default)]
    pub chief_complaints: Vec<ChiefComplaint>,
    #[serde(default)]
    pub regional_anatomy: Option<RegionalAnatomy>,
    #[serde(default)]
    pub differential_anatomy: Vec<DifferentialAnatomy>,
    #[serde(default)]
    pub red_flags: Vec<RedFlag>,
    #[serde(default)]
    pub related_modules: Vec<String>,
    #[serde(default)]
    pub explanations: Option<Explanations>,
}

/// Parsed corpus document, regions in declaration order.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Corpus {
    pub regions: Vec<RegionSeed>,
}

impl Corpus {
    /// Strictly parses a corpus document from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Parse`] with a best-effort path to the
    /// failing field (e.g. `regions[3].explanations.level4`) if the text
    /// does not match the corpus schema, carries unknown fields, or omits a
    /// required one.
    pub fn parse(json: &str) -> RegistryResult<Self> {
        let mut deserializer = serde_json::Deserializer::from_str(json);

        match serde_path_to_error::deserialize(&mut deserializer) {
            Ok(corpus) => Ok(corpus),
            Err(err) => {
                let path = err.path().to_string();
                let path = if path.is_empty() || path == "." {
                    "<root>".to_owned()
                } else {
                    path
                };
                Err(RegistryError::Parse {
                    path,
                    source: err.into_inner(),
                })
            }
        }
    }

    /// Parses the corpus embedded in this crate.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Parse`] if the shipped document is
    /// malformed; this indicates a packaging defect, not a runtime
    /// condition.
    pub fn embedded() -> RegistryResult<Self> {
        Self::parse(EMBEDDED_CORPUS)
    }
}
