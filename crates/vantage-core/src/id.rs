//! Strongly-typed point identifiers.

use std::fmt;

/// Identifies a point within a [`PointSet`](crate::PointSet).
///
/// Identifiers are unique within a set but need not be contiguous.
/// Ordering is numeric, which makes "smallest id" a well-defined
/// tie-break for the greedy dominating-set selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PointId(pub i64);

impl PointId {
    /// Identifier carried by synthetic positions that are not members of
    /// any point set (e.g. grid-search candidates).
    ///
    /// [`PointSet::new`](crate::PointSet::new) rejects this value so a
    /// synthetic candidate can never be confused with a real point.
    pub const SYNTHETIC: PointId = PointId(-1);

    /// Returns `true` for the [`SYNTHETIC`](Self::SYNTHETIC) sentinel.
    pub fn is_synthetic(self) -> bool {
        self == Self::SYNTHETIC
    }
}

impl fmt::Display for PointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for PointId {
    fn from(v: i64) -> Self {
        Self(v)
    }
}

impl From<u32> for PointId {
    fn from(v: u32) -> Self {
        Self(i64::from(v))
    }
}
