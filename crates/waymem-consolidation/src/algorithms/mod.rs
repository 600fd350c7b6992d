//! Building blocks: grid bucketing, convex blending, proximity grouping.

pub mod blend;
pub mod proximity;
pub mod spatial;
