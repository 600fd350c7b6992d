use serde::{Deserialize, Serialize};

use super::position::Position;
use crate::traits::Located;

/// A point-in-time occurrence ranked by `score` during clustering.
/// `meta` is carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord<M> {
    pub position: Position,
    pub score: f64,
    pub meta: M,
}

impl<M> EventRecord<M> {
    pub fn new(position: Position, score: f64, meta: M) -> Self {
        Self {
            position,
            score,
            meta,
        }
    }
}

impl<M> Located for EventRecord<M> {
    fn position(&self) -> &Position {
        &self.position
    }
}
