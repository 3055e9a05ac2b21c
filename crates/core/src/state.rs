//! Ephemeral exploration state for the presentation layer.
//!
//! The state struct mirrors one exploration session: idle, a region
//! selected, optionally one complaint expanded. Transitions are entirely
//! caller-driven by UI events; nothing here is timed and nothing is
//! persisted.

use serde::Serialize;
use soma_types::{ComplaintId, RegionId, StructureId};

use crate::history::UserRegionHistory;
use crate::model::Region;

/// UI-facing exploration session state.
///
/// Lifecycle: idle (no region selected) → region selected → complaint
/// expanded → back to region selected or idle on deselection.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExplorationState {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_region: Option<RegionId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region_data: Option<Region>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_history: Option<UserRegionHistory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expanded_complaint: Option<ComplaintId>,
    pub showing_anatomy: bool,
    pub highlighted_structures: Vec<StructureId>,
}

impl ExplorationState {
    /// Fresh idle state with every field empty.
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no region is selected.
    pub fn is_idle(&self) -> bool {
        self.selected_region.is_none()
    }

    /// Selects a region, replacing any previous selection. Complaint focus
    /// is dropped and the highlights reset to the region's key structures.
    pub fn select_region(&mut self, region: &Region, user_history: Option<UserRegionHistory>) {
        self.selected_region = Some(region.region_id.clone());
        self.region_data = Some(region.clone());
        self.user_history = user_history;
        self.expanded_complaint = None;
        self.showing_anatomy = false;
        self.highlighted_structures = region
            .regional_anatomy
            .key_structures
            .iter()
            .map(|s| s.structure_id.clone())
            .collect();
    }

    /// Focuses one complaint of the selected region, highlighting its
    /// anatomical sources. Returns false (and leaves the state untouched)
    /// when no region is selected or the complaint is not one of its own.
    pub fn expand_complaint(&mut self, complaint_id: &str) -> bool {
        let Some(region) = &self.region_data else {
            return false;
        };
        let Some(complaint) = region.complaint(complaint_id) else {
            return false;
        };

        self.expanded_complaint = Some(complaint.complaint_id.clone());
        self.highlighted_structures = complaint
            .anatomical_basis
            .iter()
            .map(|s| s.structure_id.clone())
            .collect();
        true
    }

    /// Drops complaint focus, restoring the region's key-structure
    /// highlights. No-op when nothing is expanded.
    pub fn collapse_complaint(&mut self) {
        if self.expanded_complaint.take().is_none() {
            return;
        }
        self.highlighted_structures = self
            .region_data
            .as_ref()
            .map(|region| {
                region
                    .regional_anatomy
                    .key_structures
                    .iter()
                    .map(|s| s.structure_id.clone())
                    .collect()
            })
            .unwrap_or_default();
    }

    pub fn set_showing_anatomy(&mut self, showing: bool) {
        self.showing_anatomy = showing;
    }

    /// Deselects everything, returning to idle.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
