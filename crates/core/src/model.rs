//! Content records for the region exploration engine.
//!
//! These are fully-typed representations of the authored corpus entities:
//! every field the engine reasons about is explicit, and optionality is
//! expressed with `Option` rather than loosely-present keys. The wire form
//! is camelCase JSON, matching the coordinate space the presentation layer
//! already consumes.
//!
//! Records are built once during registry construction and never mutated
//! afterwards; cloning is the only way content crosses an ownership
//! boundary, so mirrored regions can never alias a primary's data.

use serde::{Deserialize, Serialize};
use soma_types::{ComplaintId, RegionId, StructureId};

use crate::geometry::BoundingBox;

/// Clinical frequency tier of a complaint or anatomical differential.
///
/// Ordered by commonness: `VeryCommon < Common < LessCommon < Uncommon`, so
/// an ascending sort ranks the most common entries first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FrequencyTier {
    VeryCommon,
    Common,
    LessCommon,
    Uncommon,
}

/// Triage urgency of a red flag, most urgent first in sort order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Emergency,
    Urgent,
    Soon,
}

/// Narrative detail level requested by the reader, shallowest first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DetailLevel {
    Level1,
    Level2,
    Level3,
    Level4,
    Level5,
}

impl DetailLevel {
    /// All levels, shallowest first.
    pub const ALL: [DetailLevel; 5] = [
        DetailLevel::Level1,
        DetailLevel::Level2,
        DetailLevel::Level3,
        DetailLevel::Level4,
        DetailLevel::Level5,
    ];
}

/// Explanation text at every detail level.
///
/// All five levels are required; a corpus entry missing one fails to parse,
/// which is how the "explanation map must be complete" invariant is enforced
/// at load time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Explanations {
    pub level1: String,
    pub level2: String,
    pub level3: String,
    pub level4: String,
    pub level5: String,
}

impl Explanations {
    /// Returns the text authored for `level`.
    pub fn level(&self, level: DetailLevel) -> &str {
        match level {
            DetailLevel::Level1 => &self.level1,
            DetailLevel::Level2 => &self.level2,
            DetailLevel::Level3 => &self.level3,
            DetailLevel::Level4 => &self.level4,
            DetailLevel::Level5 => &self.level5,
        }
    }
}

/// A body-system structure cited as a plausible cause of a complaint.
///
/// Purely descriptive and owned by the complaint that declares it; the
/// `system` tag and `highlight_color` belong to the opaque content corpus
/// and are passed through untouched.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AnatomicalSource {
    pub structure_id: StructureId,
    pub structure_name: String,
    pub system: String,
    /// Free-text causal mechanism (e.g. "Meningeal irritation or inflammation").
    pub mechanism: String,
    /// Display color for the 3D highlight, as authored (e.g. "#E74C3C").
    pub highlight_color: String,
}

/// An authored symptom associated with a region.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ChiefComplaint {
    /// Unique within the owning region.
    pub complaint_id: ComplaintId,
    pub symptom: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
    pub frequency: FrequencyTier,
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub anatomical_basis: Vec<AnatomicalSource>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub characteristic_features: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub common_causes: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub differential_diagnoses: Vec<String>,
    /// References to other complaints, possibly cross-region. May dangle;
    /// consumers resolve these by omission.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub related_complaints: Vec<ComplaintId>,
    /// Reference into the external static-content store.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub educational_content_id: Option<String>,
}

impl ChiefComplaint {
    /// Returns true if `name` equals the symptom name or any alias,
    /// ignoring ASCII case.
    pub fn matches_symptom(&self, name: &str) -> bool {
        self.symptom.eq_ignore_ascii_case(name)
            || self.aliases.iter().any(|a| a.eq_ignore_ascii_case(name))
    }
}

/// One body system present in a region.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SystemPresence {
    pub system: String,
    pub structures: Vec<String>,
    pub structure_ids: Vec<StructureId>,
    pub primary_functions: Vec<String>,
}

/// A clinically significant structure within a region.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct KeyStructure {
    pub structure_id: StructureId,
    pub structure_name: String,
    pub system: String,
    pub clinical_relevance: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub common_pathologies: Vec<String>,
}

/// Sensory and motor nerve supply of a region.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NeuralInnervation {
    pub sensory_nerves: Vec<String>,
    pub motor_nerves: Vec<String>,
    pub dermatomal_levels: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub autonomic_supply: Option<String>,
}

/// Arterial, venous, and optional lymphatic supply of a region.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct VascularSupply {
    pub arterial_supply: Vec<String>,
    pub venous_drainage: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub lymphatic_drainage: Vec<String>,
}

/// Per-region anatomy summary.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RegionalAnatomy {
    pub systems: Vec<SystemPresence>,
    pub key_structures: Vec<KeyStructure>,
    pub neural_innervation: NeuralInnervation,
    pub vascular_supply: VascularSupply,
}

/// One candidate anatomical origin of a symptom.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AnatomicalDifferential {
    pub structure_name: String,
    pub structure_id: StructureId,
    pub likelihood: FrequencyTier,
    pub characteristic_features: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_to_distinguish: Option<String>,
}

/// The pre-authored set of alternative anatomical origins for a named
/// symptom within a region, with distinguishing features.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DifferentialAnatomy {
    /// Symptom name as authored; lookup matches this exactly (case-sensitive).
    pub symptom: String,
    pub possible_sources: Vec<AnatomicalDifferential>,
    pub distinguishing_features: String,
}

/// An authored symptom/finding combination indicating urgent triage.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RedFlag {
    pub symptom: String,
    pub concern: String,
    pub associated_findings: Vec<String>,
    pub action: String,
    pub urgency: Urgency,
}

/// A named, spatially-bounded anatomical area of the explorable body model.
///
/// Regions are built once by [`crate::registry::RegionRegistry`] and are
/// read-only thereafter.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Region {
    pub region_id: RegionId,
    pub region_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub localized_name: Option<String>,
    pub region_description: String,
    pub bounding_box: BoundingBox,
    pub chief_complaints: Vec<ChiefComplaint>,
    pub regional_anatomy: RegionalAnatomy,
    pub differential_anatomy: Vec<DifferentialAnatomy>,
    pub red_flags: Vec<RedFlag>,
    /// Tags linking the region to related education modules.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub related_modules: Vec<String>,
    pub explanations: Explanations,
}

impl Region {
    /// Looks up a complaint of this region by id.
    pub fn complaint(&self, complaint_id: &str) -> Option<&ChiefComplaint> {
        self.chief_complaints
            .iter()
            .find(|c| c.complaint_id == complaint_id)
    }

    /// The region's red flags ordered most urgent first, authored order
    /// preserved within an urgency tier.
    pub fn red_flags_by_urgency(&self) -> Vec<&RedFlag> {
        let mut flags: Vec<&RedFlag> = self.red_flags.iter().collect();
        flags.sort_by_key(|f| f.urgency);
        flags
    }
}
