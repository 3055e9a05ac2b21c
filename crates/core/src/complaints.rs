//! Complaint ranking and lookup over the region registry.
//!
//! Ranking is deterministic: complaints sort by frequency tier, most common
//! first, and the sort is stable so complaints sharing a tier keep their
//! authored order. Repeated calls always yield the same order.

use crate::model::ChiefComplaint;
use crate::registry::RegionRegistry;

impl RegionRegistry {
    /// The top `limit` complaints of a region, ranked by frequency tier.
    ///
    /// Unknown region ids and regions with no complaints both yield an empty
    /// vec, never an error.
    pub fn top_complaints(&self, region_id: &str, limit: usize) -> Vec<&ChiefComplaint> {
        let Some(region) = self.get(region_id) else {
            return Vec::new();
        };

        let mut ranked: Vec<&ChiefComplaint> = region.chief_complaints.iter().collect();
        // Vec::sort_by_key is stable: ties keep authored order.
        ranked.sort_by_key(|c| c.frequency);
        ranked.truncate(limit);
        ranked
    }

    /// Finds a complaint by id, scanning regions in declaration order.
    ///
    /// Complaint ids are only unique within a region; when two regions
    /// author the same id (e.g. a complaint shared by adjacent regions), the
    /// earliest-declared region wins.
    pub fn find_complaint(&self, complaint_id: &str) -> Option<&ChiefComplaint> {
        self.regions()
            .iter()
            .find_map(|region| region.complaint(complaint_id))
    }

    /// Finds a complaint of `region_id` whose symptom name or alias matches
    /// `name`, ignoring ASCII case.
    pub fn complaint_matching(&self, region_id: &str, name: &str) -> Option<&ChiefComplaint> {
        self.get(region_id)?
            .chief_complaints
            .iter()
            .find(|c| c.matches_symptom(name))
    }

    /// Resolves a complaint's related-complaint references across the whole
    /// registry. References that do not resolve are silently omitted; the
    /// authored data is allowed to dangle.
    pub fn related_complaints(&self, complaint: &ChiefComplaint) -> Vec<&ChiefComplaint> {
        complaint
            .related_complaints
            .iter()
            .filter_map(|id| self.find_complaint(id.as_str()))
            .collect()
    }
}
