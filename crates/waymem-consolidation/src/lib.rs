//! # waymem-consolidation
//!
//! Reconciles independently collected, noisy waypoint sets into one canonical set:
//! bucket merge with weighted blending → dual-threshold pruning → min-max normalization.
//! Also hosts the flat proximity clusterer used for event records.

pub mod algorithms;
pub mod engine;
pub mod merge;
pub mod prune;

pub use algorithms::blend::{blend, blend_at, BlendWeights};
pub use algorithms::proximity::{cluster, ProximityClusterer};
pub use algorithms::spatial::{bucket_key, BucketKey, SpatialBucketIndex};
pub use engine::{ConsolidationEngine, ConsolidationResult};
pub use merge::{merge, MergeEngine, MergeOutcome, MergeReport};
pub use prune::{prune_and_normalize, PruneNormalizer, PruneOutcome, PruneReport};
