//! Exploration result composition.
//!
//! The exploration result is the view model handed to the presentation
//! layer after a region resolves: the region record, the user's history for
//! it, the ranked complaints, anatomy highlights, narrative text, and
//! camera framing hints. Every derived text field is a plain string join
//! over already-authored data; nothing here summarises or generates.

use serde::Serialize;
use soma_types::StructureId;

use crate::constants::{CAMERA_STANDOFF, TOP_COMPLAINT_LIMIT};
use crate::geometry::Point3;
use crate::history::UserRegionHistory;
use crate::model::{AnatomicalSource, ChiefComplaint, Region};
use crate::registry::RegionRegistry;

/// Narrative text bundle for the side panel.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NarrativeBundle {
    /// The region's level-2 explanation.
    pub overview: String,
    /// "Key structures: …" over the region's key structure names.
    pub anatomy: String,
    /// "Common complaints: …" over the top complaints' symptom names.
    pub common_issues: String,
}

/// Camera and highlight hints for the 3D view.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewSettings {
    /// Bounding-box centroid on x/y at the fixed standoff depth.
    pub camera_target: Point3,
    /// The region's key-structure ids, in authored order.
    pub highlighted_ids: Vec<StructureId>,
    /// Whether the renderer should hide everything outside the region.
    /// Defaults to false; the presentation layer may flip it.
    pub isolate_region: bool,
}

/// Composed view model for one resolved region.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExplorationResult {
    pub region: Region,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_history: Option<UserRegionHistory>,
    pub top_complaints: Vec<ChiefComplaint>,
    /// Anatomical sources of the top complaints, flattened in rank order.
    /// Not deduplicated: a structure cited by two complaints appears twice.
    pub anatomy_highlights: Vec<AnatomicalSource>,
    pub narrative: NarrativeBundle,
    pub view_settings: ViewSettings,
}

impl RegionRegistry {
    /// Composes the exploration result for a region, if it exists.
    ///
    /// `user_history` is the caller's snapshot for this user and region, if
    /// any; it is carried through untouched and never influences ranking or
    /// resolution.
    pub fn exploration_result(
        &self,
        region_id: &str,
        user_history: Option<UserRegionHistory>,
    ) -> Option<ExplorationResult> {
        let region = self.get(region_id)?;
        let top = self.top_complaints(region_id, TOP_COMPLAINT_LIMIT);

        let anatomy_highlights: Vec<AnatomicalSource> = top
            .iter()
            .flat_map(|c| c.anatomical_basis.iter().cloned())
            .collect();

        let key_structures = &region.regional_anatomy.key_structures;
        let structure_names: Vec<&str> = key_structures
            .iter()
            .map(|s| s.structure_name.as_str())
            .collect();
        let symptom_names: Vec<&str> = top.iter().map(|c| c.symptom.as_str()).collect();

        let narrative = NarrativeBundle {
            overview: region.explanations.level2.clone(),
            anatomy: format!("Key structures: {}", structure_names.join(", ")),
            common_issues: format!("Common complaints: {}", symptom_names.join(", ")),
        };

        let centroid = region.bounding_box.centroid();
        let view_settings = ViewSettings {
            camera_target: Point3::new(centroid.x, centroid.y, CAMERA_STANDOFF),
            highlighted_ids: key_structures.iter().map(|s| s.structure_id.clone()).collect(),
            isolate_region: false,
        };

        Some(ExplorationResult {
            region: region.clone(),
            user_history,
            top_complaints: top.into_iter().cloned().collect(),
            anatomy_highlights,
            narrative,
            view_settings,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::{HistoryTracker, SymptomReport};
    use soma_types::RegionId;

    #[test]
    fn test_unknown_region_is_absent() {
        let registry = RegionRegistry::embedded().unwrap();
        assert!(registry.exploration_result("not-a-region", None).is_none());
    }

    #[test]
    fn test_highlights_equal_key_structure_ids() {
        let registry = RegionRegistry::embedded().unwrap();
        let result = registry.exploration_result("knee-left", None).unwrap();

        let expected: Vec<&StructureId> = result
            .region
            .regional_anatomy
            .key_structures
            .iter()
            .map(|s| &s.structure_id)
            .collect();
        let actual: Vec<&StructureId> = result.view_settings.highlighted_ids.iter().collect();
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_camera_target_is_centroid_at_standoff_depth() {
        let registry = RegionRegistry::embedded().unwrap();
        let result = registry.exploration_result("knee-left", None).unwrap();

        let target = result.view_settings.camera_target;
        let centroid = result.region.bounding_box.centroid();
        assert!((target.x - centroid.x).abs() < f32::EPSILON);
        assert!((target.y - centroid.y).abs() < f32::EPSILON);
        assert!((target.z - CAMERA_STANDOFF).abs() < f32::EPSILON);
    }

    #[test]
    fn test_anatomy_highlights_keep_repeated_structures() {
        let registry = RegionRegistry::embedded().unwrap();
        // Several chest complaints cite the heart; the flattened list keeps
        // every citation.
        let result = registry.exploration_result("chest", None).unwrap();

        let heart_citations = result
            .anatomy_highlights
            .iter()
            .filter(|s| s.structure_id == "cardiovascular-heart")
            .count();
        assert!(heart_citations >= 2, "got {heart_citations}");
    }

    #[test]
    fn test_narrative_is_joined_from_authored_data() {
        let registry = RegionRegistry::embedded().unwrap();
        let result = registry.exploration_result("knee-left", None).unwrap();

        assert_eq!(result.narrative.overview, result.region.explanations.level2);
        assert!(result.narrative.anatomy.starts_with("Key structures: "));
        assert!(result.narrative.anatomy.contains("Meniscus"));
        assert!(result
            .narrative
            .common_issues
            .starts_with("Common complaints: "));
        assert!(result.narrative.common_issues.contains("Knee Pain"));
    }

    #[test]
    fn test_top_complaints_are_capped() {
        let registry = RegionRegistry::embedded().unwrap();
        for region in registry.regions() {
            let result = registry
                .exploration_result(region.region_id.as_str(), None)
                .unwrap();
            assert!(result.top_complaints.len() <= TOP_COMPLAINT_LIMIT);
        }
    }

    #[test]
    fn test_user_history_is_carried_through() {
        let registry = RegionRegistry::embedded().unwrap();
        let tracker = HistoryTracker::new();
        let knee = RegionId::parse("knee-left").unwrap();
        tracker.record("user-1", &knee, SymptomReport::new("aching after running"));

        let history = tracker.history("user-1", "knee-left");
        let result = registry
            .exploration_result("knee-left", history.clone())
            .unwrap();
        assert_eq!(result.user_history, history);

        let without = registry.exploration_result("knee-left", None).unwrap();
        assert!(without.user_history.is_none());
    }

    #[test]
    fn test_result_serialises_with_camel_case_wire_names() {
        let registry = RegionRegistry::embedded().unwrap();
        let result = registry.exploration_result("knee-left", None).unwrap();

        let value = serde_json::to_value(&result).unwrap();
        assert!(value.get("topComplaints").is_some());
        assert!(value.get("anatomyHighlights").is_some());
        assert!(value["viewSettings"].get("cameraTarget").is_some());
        assert!(value["viewSettings"]["isolateRegion"] == serde_json::json!(false));
        assert!(value["narrative"].get("commonIssues").is_some());
        // Absent history is omitted from the wire form entirely.
        assert!(value.get("userHistory").is_none());
    }
}
