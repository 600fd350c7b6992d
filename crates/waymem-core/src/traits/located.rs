use crate::models::Position;

/// Anything with a place in space.
///
/// Bucket merging and proximity clustering both group records by a spatial
/// predicate and then reduce each group; this is the seam they share.
pub trait Located {
    fn position(&self) -> &Position;
}
