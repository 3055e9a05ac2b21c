//! Engine-wide constants.

/// Number of ranked complaints included in an exploration result.
pub const TOP_COMPLAINT_LIMIT: usize = 5;

/// Fixed camera standoff on the z axis, in model-space units. The camera
/// target sits at the region's bounding-box centroid on x/y and at this
/// depth, so every region is framed from the same viewing distance.
pub const CAMERA_STANDOFF: f32 = 2.5;

/// Educational disclaimer, to be surfaced verbatim wherever exploration
/// results are displayed.
pub const DISCLAIMER: &str = "This region-based symptom information is for \
educational purposes only. It helps understand what structures may be \
involved when symptoms occur in a specific body area. This information does \
not constitute medical advice or diagnosis. If you are experiencing \
symptoms, please consult a qualified healthcare provider for proper \
evaluation and treatment.";
