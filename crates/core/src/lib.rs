//! # SOMA Core
//!
//! Resolution-and-assembly engine behind the interactive anatomy explorer:
//! given a pick point on the 3D body model, identify the enclosing region
//! and assemble the consumable view model for it: ranked chief complaints,
//! anatomy highlights, camera framing, and narrative text.
//!
//! This crate contains the engine only:
//! - Region registry built once from the static content corpus, immutable
//!   afterwards, with bilateral mirroring applied at construction
//! - Spatial resolution by axis-aligned bounding-box containment
//! - Deterministic complaint ranking by clinical frequency tier
//! - Differential-anatomy lookup by exact symptom name
//! - Exploration result composition for the presentation layer
//! - Append-only per-user symptom history
//!
//! **No rendering or content concerns**: the medical prose, citations, and
//! level 1–5 explanation text are opaque authored data consumed through the
//! corpus loader; 3D model loading and UI state beyond [`ExplorationState`]
//! belong to the presentation layer.
//!
//! The engine performs no medical inference: it surfaces pre-authored
//! associations for education only, and [`DISCLAIMER`] must accompany every
//! displayed exploration result.

pub mod complaints;
pub mod constants;
pub mod corpus;
pub mod differential;
pub mod error;
pub mod explore;
pub mod geometry;
pub mod history;
pub mod model;
pub mod registry;
pub mod state;

pub use constants::{CAMERA_STANDOFF, DISCLAIMER, TOP_COMPLAINT_LIMIT};
pub use corpus::Corpus;
pub use error::{RegistryError, RegistryResult};
pub use explore::{ExplorationResult, NarrativeBundle, ViewSettings};
pub use geometry::{BoundingBox, Point3};
pub use history::{HistoryTracker, SymptomEntry, SymptomReport, UserRegionHistory};
pub use model::{
    AnatomicalDifferential, AnatomicalSource, ChiefComplaint, DetailLevel, DifferentialAnatomy,
    Explanations, FrequencyTier, KeyStructure, NeuralInnervation, RedFlag, Region,
    RegionalAnatomy, SystemPresence, Urgency, VascularSupply,
};
pub use registry::{RegionRegistry, RegistryConfig, TieBreak};
pub use state::ExplorationState;

// Identifier primitives are re-exported so downstream crates do not need a
// direct soma-types dependency.
pub use soma_types::{ComplaintId, IdError, RegionId, StructureId};
