//! Differential-anatomy lookup.
//!
//! Matching policy: the symptom name must equal the authored entry name
//! exactly, including case. There is no fuzzy matching, aliasing, or
//! normalisation at this seam; the authored names are the contract, and a
//! near-miss is an absent result rather than a guess.

use crate::model::{AnatomicalDifferential, DifferentialAnatomy};
use crate::registry::RegionRegistry;

impl RegionRegistry {
    /// The region's pre-authored differential entry for `symptom`, matched
    /// exactly (case-sensitive).
    pub fn differential_for(&self, region_id: &str, symptom: &str) -> Option<&DifferentialAnatomy> {
        self.get(region_id)?
            .differential_anatomy
            .iter()
            .find(|entry| entry.symptom == symptom)
    }

    /// The ordered candidate anatomical sources for `symptom` in a region.
    ///
    /// Unknown regions and unmatched symptom names both yield an empty
    /// slice, never an error.
    pub fn differentials_for(&self, region_id: &str, symptom: &str) -> &[AnatomicalDifferential] {
        self.differential_for(region_id, symptom)
            .map(|entry| entry.possible_sources.as_slice())
            .unwrap_or(&[])
    }
}
