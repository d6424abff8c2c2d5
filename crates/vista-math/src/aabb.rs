use glam::Vec3;

/// Degenerate geometry handed to a bounds computation.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum InputRangeError {
    /// No vertex contributed to the bounds.
    #[error("bounds requested for empty geometry")]
    EmptyGeometry,

    /// A vertex carried NaN or infinite components.
    #[error("bounds are not finite (min {min:?}, max {max:?})")]
    NonFiniteBounds { min: Vec3, max: Vec3 },
}

/// Axis-Aligned Bounding Box in f32 model space.
///
/// The [`EMPTY`](Self::EMPTY) box has `min = +inf` and `max = -inf` so that
/// folding points into it with [`include_point`](Self::include_point) yields
/// the exact extrema.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Default for Aabb {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Aabb {
    /// The identity for [`union`](Self::union).
    pub const EMPTY: Aabb = Aabb {
        min: Vec3::splat(f32::INFINITY),
        max: Vec3::splat(f32::NEG_INFINITY),
    };

    /// Create an AABB from two corners. Components are sorted so that
    /// min <= max on every axis.
    pub fn new(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Smallest box enclosing every point, or [`EMPTY`](Self::EMPTY) for none.
    pub fn from_points<I>(points: I) -> Self
    where
        I: IntoIterator<Item = Vec3>,
    {
        let mut aabb = Self::EMPTY;
        for p in points {
            aabb.include_point(p);
        }
        aabb
    }

    /// Grow the box to enclose `p`.
    pub fn include_point(&mut self, p: Vec3) {
        self.min = self.min.min(p);
        self.max = self.max.max(p);
    }

    /// Returns the smallest AABB enclosing both self and other.
    pub fn union(&self, other: &Aabb) -> Aabb {
        Aabb {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// True when no point has been included (min > max on some axis).
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// Returns true if the point lies inside or on the boundary.
    pub fn contains_point(&self, p: Vec3) -> bool {
        p.cmpge(self.min).all() && p.cmple(self.max).all()
    }

    /// Midpoint of the two corners. Meaningless for an empty box; see
    /// [`checked_center`](Self::checked_center).
    pub fn center(&self) -> Vec3 {
        0.5 * (self.min + self.max)
    }

    /// Midpoint of the two corners, rejecting empty and non-finite boxes.
    pub fn checked_center(&self) -> Result<Vec3, InputRangeError> {
        if self.is_empty() {
            return Err(InputRangeError::EmptyGeometry);
        }
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(InputRangeError::NonFiniteBounds {
                min: self.min,
                max: self.max,
            });
        }
        Ok(self.center())
    }

    /// Returns the size along each axis.
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// The same box moved by `offset`.
    pub fn translated(&self, offset: Vec3) -> Aabb {
        Aabb {
            min: self.min + offset,
            max: self.max + offset,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructor_auto_sorts() {
        let aabb = Aabb::new(Vec3::new(10.0, 10.0, 10.0), Vec3::ZERO);
        assert_eq!(aabb.min, Vec3::ZERO);
        assert_eq!(aabb.max, Vec3::splat(10.0));
    }

    #[test]
    fn test_empty_is_empty() {
        assert!(Aabb::EMPTY.is_empty());
        assert!(Aabb::default().is_empty());
    }

    #[test]
    fn test_from_points_tracks_extrema() {
        let aabb = Aabb::from_points([
            Vec3::new(1.0, -2.0, 3.0),
            Vec3::new(-1.0, 4.0, 0.5),
            Vec3::new(0.0, 0.0, -7.0),
        ]);
        assert_eq!(aabb.min, Vec3::new(-1.0, -2.0, -7.0));
        assert_eq!(aabb.max, Vec3::new(1.0, 4.0, 3.0));
    }

    #[test]
    fn test_from_no_points_is_empty() {
        let aabb = Aabb::from_points(std::iter::empty());
        assert!(aabb.is_empty());
        assert_eq!(aabb.checked_center(), Err(InputRangeError::EmptyGeometry));
    }

    #[test]
    fn test_single_point_box_is_not_empty() {
        let aabb = Aabb::from_points([Vec3::new(2.0, 2.0, 2.0)]);
        assert!(!aabb.is_empty());
        assert_eq!(aabb.checked_center(), Ok(Vec3::splat(2.0)));
    }

    #[test]
    fn test_union_encloses_both() {
        let a = Aabb::new(Vec3::ZERO, Vec3::splat(5.0));
        let b = Aabb::new(Vec3::splat(3.0), Vec3::splat(10.0));
        let u = a.union(&b);
        assert_eq!(u.min, Vec3::ZERO);
        assert_eq!(u.max, Vec3::splat(10.0));
        assert!(u.contains_point(Vec3::splat(5.0)));
    }

    #[test]
    fn test_union_with_empty_is_identity() {
        let a = Aabb::new(Vec3::new(-1.0, 0.0, 2.0), Vec3::new(1.0, 3.0, 4.0));
        assert_eq!(a.union(&Aabb::EMPTY), a);
        assert_eq!(Aabb::EMPTY.union(&a), a);
    }

    #[test]
    fn test_center() {
        let aabb = Aabb::new(Vec3::new(10.0, 10.0, 10.0), Vec3::new(12.0, 12.0, 10.0));
        assert_eq!(aabb.center(), Vec3::new(11.0, 11.0, 10.0));
    }

    #[test]
    fn test_non_finite_center_rejected() {
        let aabb = Aabb::from_points([Vec3::new(f32::NEG_INFINITY, 0.0, 0.0), Vec3::ONE]);
        let result = aabb.checked_center();
        assert!(matches!(
            result,
            Err(InputRangeError::NonFiniteBounds { .. })
        ));
    }

    #[test]
    fn test_contains_point_on_edge() {
        let aabb = Aabb::new(Vec3::ZERO, Vec3::splat(10.0));
        assert!(aabb.contains_point(Vec3::ZERO));
        assert!(aabb.contains_point(Vec3::new(10.0, 5.0, 5.0)));
        assert!(!aabb.contains_point(Vec3::new(11.0, 5.0, 5.0)));
    }

    #[test]
    fn test_translated_moves_center() {
        let aabb = Aabb::new(Vec3::ZERO, Vec3::splat(2.0));
        let moved = aabb.translated(Vec3::new(-1.0, -1.0, -1.0));
        assert_eq!(moved.center(), Vec3::ZERO);
        assert_eq!(moved.size(), aabb.size());
    }
}
