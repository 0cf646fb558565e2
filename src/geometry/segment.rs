use serde::{Deserialize, Serialize};

use crate::error::{GeometryError, Result};
use crate::math::{Point3, Vector3, TOLERANCE};

/// Opaque identity of a segment's renderable counterpart.
///
/// The forest only stores and compares handles; what they point at is owned
/// by the rendering side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SegmentHandle(pub u64);

impl std::fmt::Display for SegmentHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An immutable line segment between two 3D points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    start: Point3,
    end: Point3,
    handle: SegmentHandle,
}

impl Segment {
    /// Creates a new segment from `start` to `end`.
    #[must_use]
    pub fn new(start: Point3, end: Point3, handle: SegmentHandle) -> Self {
        Self { start, end, handle }
    }

    /// Returns the start point.
    #[must_use]
    pub fn start(&self) -> &Point3 {
        &self.start
    }

    /// Returns the end point.
    #[must_use]
    pub fn end(&self) -> &Point3 {
        &self.end
    }

    /// Returns the identity handle.
    #[must_use]
    pub fn handle(&self) -> SegmentHandle {
        self.handle
    }

    /// Euclidean distance from start to end.
    #[must_use]
    pub fn length(&self) -> f64 {
        nalgebra::distance(&self.start, &self.end)
    }

    /// Returns `true` if the segment is shorter than [`TOLERANCE`].
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.length() < TOLERANCE
    }

    /// Returns the unit direction from start to end.
    ///
    /// # Errors
    ///
    /// Returns an error if the segment has zero length.
    pub fn direction(&self) -> Result<Vector3> {
        let v = self.end - self.start;
        let len = v.norm();
        if len < TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }
        Ok(v / len)
    }

    /// Returns `true` if both segments lie on the same infinite line.
    ///
    /// Degenerate segments have no line and are never colinear.
    #[must_use]
    pub fn is_colinear_with(&self, other: &Segment) -> bool {
        let (Ok(dir), Ok(other_dir)) = (self.direction(), other.direction()) else {
            return false;
        };
        if dir.cross(&other_dir).norm() > TOLERANCE {
            return false;
        }
        // Parallel; check that the other segment's endpoints sit on this line.
        [other.start, other.end]
            .iter()
            .all(|p| (*p - self.start).cross(&dir).norm() < TOLERANCE)
    }

    /// Returns `true` if any endpoint of `self` coincides with an endpoint of `other`.
    #[must_use]
    pub fn shares_endpoint_with(&self, other: &Segment) -> bool {
        [self.start, self.end].iter().any(|a| {
            [other.start, other.end]
                .iter()
                .any(|b| nalgebra::distance(a, b) < TOLERANCE)
        })
    }
}
