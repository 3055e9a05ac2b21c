//! Build-once region registry with bilateral mirroring and spatial lookup.
//!
//! The registry is constructed from a parsed [`Corpus`] exactly once, at
//! startup, and is logically immutable afterwards: every query borrows from
//! it, and a shared reference can be read concurrently from any number of
//! threads without synchronisation. There is no ambient global instance:
//! callers construct a registry explicitly and pass the handle to consumers,
//! which keeps tests free to build small synthetic registries.
//!
//! Bilateral mirroring runs here, during construction: a mirror seed
//! receives structural clones of its primary's content fields while keeping
//! its own identifier, display name and bounding box. Cloning makes the copy
//! a true deep copy, so the two sides can never alias each other's data.

use std::collections::{HashMap, HashSet};

use soma_types::RegionId;

use crate::corpus::{Corpus, RegionSeed};
use crate::error::{RegistryError, RegistryResult};
use crate::geometry::Point3;
use crate::model::Region;

/// Spatial tie-break policy for points contained by more than one region box.
///
/// Adjacent regions may be authored with overlapping boxes. Resolution must
/// still assign each point to at most one region, so the policy is explicit
/// configuration rather than an accident of container iteration:
///
/// - [`TieBreak::DeclarationOrder`]: the first containing region in corpus
///   order wins. This reproduces the reference behaviour and is the default.
/// - [`TieBreak::SmallestVolume`]: among containing regions the smallest
///   box wins, with declaration order breaking exact volume ties.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TieBreak {
    #[default]
    DeclarationOrder,
    SmallestVolume,
}

/// Registry construction options, resolved once at startup.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RegistryConfig {
    pub tie_break: TieBreak,
}

/// In-memory table of region records, keyed by region id.
///
/// Declaration order of the corpus is preserved and observable through
/// [`RegionRegistry::regions`]; it is also the order spatial resolution
/// scans under [`TieBreak::DeclarationOrder`].
#[derive(Debug)]
pub struct RegionRegistry {
    regions: Vec<Region>,
    index: HashMap<RegionId, usize>,
    tie_break: TieBreak,
}

impl RegionRegistry {
    /// Builds a registry from a parsed corpus, applying bilateral mirroring
    /// and validating the authored invariants.
    ///
    /// # Errors
    ///
    /// Returns a [`RegistryError`] if the corpus violates a load-time
    /// invariant: duplicate region or complaint ids, a bounding box with
    /// `min > max` on any axis, a primary region missing required content,
    /// or a mirror naming an absent or non-primary source.
    pub fn from_corpus(corpus: Corpus, config: RegistryConfig) -> RegistryResult<Self> {
        let seeds = corpus.regions;

        let mut regions: Vec<Option<Region>> = Vec::with_capacity(seeds.len());
        let mut mirrors: Vec<(usize, RegionId, RegionSeed)> = Vec::new();
        let mut ids: HashSet<RegionId> = HashSet::new();
        let mut primary_pos: HashMap<RegionId, usize> = HashMap::new();

        for (pos, seed) in seeds.into_iter().enumerate() {
            if !ids.insert(seed.region_id.clone()) {
                return Err(RegistryError::DuplicateRegion(seed.region_id));
            }
            if let Some(axis) = seed.bounding_box.invalid_axis() {
                return Err(RegistryError::InvalidBoundingBox {
                    region: seed.region_id,
                    axis,
                });
            }

            if let Some(source) = seed.mirror_of.clone() {
                mirrors.push((pos, source, seed));
                regions.push(None);
            } else {
                primary_pos.insert(seed.region_id.clone(), pos);
                regions.push(Some(build_primary(seed)?));
            }
        }

        let mirror_count = mirrors.len();
        for (pos, source, seed) in mirrors {
            let Some(&src_pos) = primary_pos.get(&source) else {
                return Err(if ids.contains(&source) {
                    RegistryError::MirrorOfMirror {
                        region: seed.region_id,
                        mirror_source: source,
                    }
                } else {
                    RegistryError::MirrorSourceMissing {
                        region: seed.region_id,
                        mirror_source: source,
                    }
                });
            };
            let primary = regions[src_pos]
                .as_ref()
                .expect("primaries are all built in the first pass");

            // Content authored directly on a mirror seed is superseded by
            // the primary's; only identity, display names and the bounding
            // box are the mirror's own.
            let mirrored = Region {
                region_id: seed.region_id,
                region_name: seed.region_name,
                localized_name: seed.localized_name,
                region_description: seed
                    .region_description
                    .unwrap_or_else(|| primary.region_description.clone()),
                bounding_box: seed.bounding_box,
                chief_complaints: primary.chief_complaints.clone(),
                regional_anatomy: primary.regional_anatomy.clone(),
                differential_anatomy: primary.differential_anatomy.clone(),
                red_flags: primary.red_flags.clone(),
                related_modules: primary.related_modules.clone(),
                explanations: primary.explanations.clone(),
            };
            regions[pos] = Some(mirrored);
        }

        let regions: Vec<Region> = regions
            .into_iter()
            .map(|r| r.expect("every slot is filled by one of the two passes"))
            .collect();

        let index = regions
            .iter()
            .enumerate()
            .map(|(i, r)| (r.region_id.clone(), i))
            .collect();

        for (i, a) in regions.iter().enumerate() {
            for b in regions.iter().skip(i + 1) {
                if a.bounding_box.intersects(&b.bounding_box) {
                    tracing::debug!(
                        first = %a.region_id,
                        second = %b.region_id,
                        "bounding boxes overlap; resolution follows the configured tie-break"
                    );
                }
            }
        }
        tracing::debug!(
            regions = regions.len(),
            mirrored = mirror_count,
            "region registry built"
        );

        Ok(Self {
            regions,
            index,
            tie_break: config.tie_break,
        })
    }

    /// Parses `json` as a corpus document and builds a registry from it.
    pub fn from_corpus_str(json: &str, config: RegistryConfig) -> RegistryResult<Self> {
        Self::from_corpus(Corpus::parse(json)?, config)
    }

    /// Builds a registry from the corpus embedded in this crate, with the
    /// default configuration.
    pub fn embedded() -> RegistryResult<Self> {
        Self::from_corpus(Corpus::embedded()?, RegistryConfig::default())
    }

    /// Looks up a region by id. Unknown ids are an absent result, never an
    /// error.
    pub fn get(&self, region_id: &str) -> Option<&Region> {
        self.index.get(region_id).map(|&i| &self.regions[i])
    }

    /// All regions in corpus declaration order.
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// The tie-break policy this registry resolves with.
    pub fn tie_break(&self) -> TieBreak {
        self.tie_break
    }

    /// Resolves a pick point to the enclosing region, if any.
    ///
    /// Containment is axis-aligned bounding-box containment, inclusive on
    /// both ends of every axis; no mesh-level hit testing occurs. When more
    /// than one box contains the point the configured [`TieBreak`] decides.
    /// Given the same registry, the same point always resolves to the same
    /// region.
    pub fn resolve_at(&self, point: Point3) -> Option<&RegionId> {
        match self.tie_break {
            TieBreak::DeclarationOrder => self
                .regions
                .iter()
                .find(|r| r.bounding_box.contains(point))
                .map(|r| &r.region_id),
            TieBreak::SmallestVolume => {
                let mut best: Option<&Region> = None;
                for region in self.regions.iter().filter(|r| r.bounding_box.contains(point)) {
                    // Strict less-than keeps the earliest-declared region on
                    // exact volume ties.
                    let smaller = best
                        .map(|b| region.bounding_box.volume() < b.bounding_box.volume())
                        .unwrap_or(true);
                    if smaller {
                        best = Some(region);
                    }
                }
                best.map(|r| &r.region_id)
            }
        }
    }

    /// Convenience form of [`RegionRegistry::resolve_at`] taking raw
    /// world-space coordinates.
    pub fn resolve_region_at(&self, x: f32, y: f32, z: f32) -> Option<&RegionId> {
        self.resolve_at(Point3::new(x, y, z))
    }
}

/// Builds a fully authored region from its seed, validating per-region
/// invariants.
fn build_primary(seed: RegionSeed) -> RegistryResult<Region> {
    let mut complaint_ids = HashSet::new();
    for complaint in &seed.chief_complaints {
        if !complaint_ids.insert(complaint.complaint_id.clone()) {
            return Err(RegistryError::DuplicateComplaint {
                region: seed.region_id,
                complaint: complaint.complaint_id.clone(),
            });
        }
    }

    let missing = |region: &RegionId, field: &'static str| RegistryError::MissingContent {
        region: region.clone(),
        field,
    };

    let region_description = seed
        .region_description
        .ok_or_else(|| missing(&seed.region_id, "regionDescription"))?;
    let regional_anatomy = seed
        .regional_anatomy
        .ok_or_else(|| missing(&seed.region_id, "regionalAnatomy"))?;
    let explanations = seed
        .explanations
        .ok_or_else(|| missing(&seed.region_id, "explanations"))?;

    Ok(Region {
        region_id: seed.region_id,
        region_name: seed.region_name,
        localized_name: seed.localized_name,
        region_description,
        bounding_box: seed.bounding_box,
        chief_complaints: seed.chief_complaints,
        regional_anatomy,
        differential_anatomy: seed.differential_anatomy,
        red_flags: seed.red_flags,
        related_modules: seed.related_modules,
        explanations,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    /// Minimal fully-authored region seed for synthetic registries.
    fn region_json(id: &str, min: [f32; 3], max: [f32; 3]) -> Value {
        json!({
            "regionId": id,
            "regionName": id,
            "regionDescription": format!("The {id} region"),
            "boundingBox": {
                "min": {"x": min[0], "y": min[1], "z": min[2]},
                "max": {"x": max[0], "y": max[1], "z": max[2]}
            },
            "regionalAnatomy": {
                "systems": [],
                "keyStructures": [],
                "neuralInnervation": {
                    "sensoryNerves": [],
                    "motorNerves": [],
                    "dermatomalLevels": []
                },
                "vascularSupply": {
                    "arterialSupply": [],
                    "venousDrainage": []
                }
            },
            "explanations": {
                "level1": "1", "level2": "2", "level3": "3", "level4": "4", "level5": "5"
            }
        })
    }

    fn registry_from(regions: Vec<Value>, config: RegistryConfig) -> RegionRegistry {
        let doc = json!({ "regions": regions }).to_string();
        RegionRegistry::from_corpus_str(&doc, config).expect("synthetic corpus must build")
    }

    #[test]
    fn test_embedded_registry_builds() {
        let registry = RegionRegistry::embedded().expect("embedded corpus must build");
        assert_eq!(registry.len(), 8);

        // Declaration order is preserved.
        let order: Vec<&str> = registry.regions().iter().map(|r| r.region_id.as_str()).collect();
        assert_eq!(
            order,
            vec![
                "head",
                "chest",
                "abdomen-upper",
                "thoracic-spine",
                "lumbar-spine",
                "back-lower",
                "knee-left",
                "knee-right"
            ]
        );
    }

    #[test]
    fn test_get_unknown_region_is_absent() {
        let registry = RegionRegistry::embedded().unwrap();
        assert!(registry.get("not-a-region").is_none());
        assert!(registry.get("head").is_some());
    }

    #[test]
    fn test_mirrored_region_shares_content_but_not_identity() {
        let registry = RegionRegistry::embedded().unwrap();
        let left = registry.get("knee-left").unwrap();
        let right = registry.get("knee-right").unwrap();

        assert_ne!(left.region_id, right.region_id);
        assert_ne!(left.bounding_box, right.bounding_box);
        assert_ne!(left.region_name, right.region_name);

        assert_eq!(left.chief_complaints, right.chief_complaints);
        assert_eq!(left.regional_anatomy, right.regional_anatomy);
        assert_eq!(left.differential_anatomy, right.differential_anatomy);
        assert_eq!(left.red_flags, right.red_flags);
        assert_eq!(left.explanations, right.explanations);
    }

    #[test]
    fn test_duplicate_region_id_fails_fast() {
        let doc = json!({
            "regions": [
                region_json("head", [0.0, 0.0, 0.0], [1.0, 1.0, 1.0]),
                region_json("head", [2.0, 2.0, 2.0], [3.0, 3.0, 3.0]),
            ]
        })
        .to_string();
        let err = RegionRegistry::from_corpus_str(&doc, RegistryConfig::default())
            .expect_err("duplicate ids must be rejected");
        assert!(matches!(err, RegistryError::DuplicateRegion(id) if id == "head"));
    }

    #[test]
    fn test_inverted_bounding_box_fails_fast() {
        let doc = json!({
            "regions": [region_json("head", [0.0, 2.0, 0.0], [1.0, 1.0, 1.0])]
        })
        .to_string();
        let err = RegionRegistry::from_corpus_str(&doc, RegistryConfig::default())
            .expect_err("inverted box must be rejected");
        assert!(
            matches!(err, RegistryError::InvalidBoundingBox { axis: 'y', .. }),
            "got: {err:?}"
        );
    }

    #[test]
    fn test_primary_missing_explanations_fails_fast() {
        let mut region = region_json("head", [0.0, 0.0, 0.0], [1.0, 1.0, 1.0]);
        region.as_object_mut().unwrap().remove("explanations");
        let doc = json!({ "regions": [region] }).to_string();

        let err = RegionRegistry::from_corpus_str(&doc, RegistryConfig::default())
            .expect_err("primary without explanations must be rejected");
        assert!(matches!(
            err,
            RegistryError::MissingContent {
                field: "explanations",
                ..
            }
        ));
    }

    #[test]
    fn test_duplicate_complaint_id_fails_fast() {
        let mut region = region_json("head", [0.0, 0.0, 0.0], [1.0, 1.0, 1.0]);
        let complaint = json!({
            "complaintId": "head-headache",
            "symptom": "Headache",
            "frequency": "very-common",
            "description": "Pain"
        });
        region.as_object_mut().unwrap().insert(
            "chiefComplaints".into(),
            json!([complaint, complaint]),
        );
        let doc = json!({ "regions": [region] }).to_string();

        let err = RegionRegistry::from_corpus_str(&doc, RegistryConfig::default())
            .expect_err("duplicate complaint ids must be rejected");
        assert!(matches!(err, RegistryError::DuplicateComplaint { .. }));
    }

    #[test]
    fn test_mirror_of_unknown_source_fails_fast() {
        let doc = json!({
            "regions": [{
                "regionId": "knee-right",
                "regionName": "Right Knee",
                "boundingBox": {
                    "min": {"x": 0.0, "y": 0.0, "z": 0.0},
                    "max": {"x": 1.0, "y": 1.0, "z": 1.0}
                },
                "mirrorOf": "knee-left"
            }]
        })
        .to_string();
        let err = RegionRegistry::from_corpus_str(&doc, RegistryConfig::default())
            .expect_err("mirror of an absent region must be rejected");
        assert!(matches!(err, RegistryError::MirrorSourceMissing { .. }));
    }

    #[test]
    fn test_mirror_of_mirror_fails_fast() {
        let mirror = |id: &str, source: &str| {
            json!({
                "regionId": id,
                "regionName": id,
                "boundingBox": {
                    "min": {"x": 0.0, "y": 0.0, "z": 0.0},
                    "max": {"x": 1.0, "y": 1.0, "z": 1.0}
                },
                "mirrorOf": source
            })
        };
        let doc = json!({
            "regions": [
                region_json("hand-left", [0.0, 0.0, 0.0], [1.0, 1.0, 1.0]),
                mirror("hand-right", "hand-left"),
                mirror("hand-rightmost", "hand-right"),
            ]
        })
        .to_string();
        let err = RegionRegistry::from_corpus_str(&doc, RegistryConfig::default())
            .expect_err("mirror chains must be rejected");
        assert!(matches!(err, RegistryError::MirrorOfMirror { .. }));
    }

    #[test]
    fn test_resolve_inside_single_region() {
        let registry = RegionRegistry::embedded().unwrap();
        let resolved = registry.resolve_region_at(-0.05, 0.0, 0.0);
        assert_eq!(resolved.map(|id| id.as_str()), Some("knee-left"));
    }

    #[test]
    fn test_resolve_outside_all_regions_is_absent() {
        let registry = RegionRegistry::embedded().unwrap();
        assert!(registry.resolve_region_at(5.0, 5.0, 5.0).is_none());
    }

    #[test]
    fn test_resolve_is_inclusive_and_order_dependent_on_shared_faces() {
        let registry = RegionRegistry::embedded().unwrap();
        // x = 0.0 lies on the shared face of knee-left (max.x) and
        // knee-right (min.x); knee-left is declared first.
        let resolved = registry.resolve_region_at(0.0, 0.1, 0.1);
        assert_eq!(resolved.map(|id| id.as_str()), Some("knee-left"));
    }

    #[test]
    fn test_resolve_declaration_order_tie_break() {
        let outer = region_json("trunk", [-1.0, -1.0, -1.0], [1.0, 1.0, 1.0]);
        let inner = region_json("navel", [-0.1, -0.1, -0.1], [0.1, 0.1, 0.1]);
        let registry = registry_from(vec![outer, inner], RegistryConfig::default());

        let resolved = registry.resolve_region_at(0.0, 0.0, 0.0);
        assert_eq!(resolved.map(|id| id.as_str()), Some("trunk"));
    }

    #[test]
    fn test_resolve_smallest_volume_tie_break() {
        let outer = region_json("trunk", [-1.0, -1.0, -1.0], [1.0, 1.0, 1.0]);
        let inner = region_json("navel", [-0.1, -0.1, -0.1], [0.1, 0.1, 0.1]);
        let config = RegistryConfig {
            tie_break: TieBreak::SmallestVolume,
        };
        let registry = registry_from(vec![outer, inner], config);

        let resolved = registry.resolve_region_at(0.0, 0.0, 0.0);
        assert_eq!(resolved.map(|id| id.as_str()), Some("navel"));

        // Outside the inner box the outer region still resolves.
        let resolved = registry.resolve_region_at(0.5, 0.5, 0.5);
        assert_eq!(resolved.map(|id| id.as_str()), Some("trunk"));
    }

    #[test]
    fn test_every_region_carries_all_detail_levels() {
        use crate::model::DetailLevel;

        let registry = RegionRegistry::embedded().unwrap();
        for region in registry.regions() {
            for level in DetailLevel::ALL {
                assert!(
                    !region.explanations.level(level).is_empty(),
                    "{} has an empty {level:?}",
                    region.region_id
                );
            }
        }
    }

    #[test]
    fn test_red_flags_by_urgency_sorts_most_urgent_first() {
        let registry = RegionRegistry::embedded().unwrap();
        for region in registry.regions() {
            let ordered = region.red_flags_by_urgency();
            assert_eq!(ordered.len(), region.red_flags.len());
            for pair in ordered.windows(2) {
                assert!(pair[0].urgency <= pair[1].urgency);
            }
        }
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let registry = RegionRegistry::embedded().unwrap();
        let first = registry.resolve_region_at(0.0, 1.2, 0.05).cloned();
        for _ in 0..10 {
            assert_eq!(registry.resolve_region_at(0.0, 1.2, 0.05).cloned(), first);
        }
    }
}
