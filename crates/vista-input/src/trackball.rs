//! Virtual trackball for object-mode rotation.
//!
//! The cursor is projected onto a unit hemisphere facing the viewer. The
//! rotation between the point under the cursor when the button went down
//! and the point under it now gives an axis and an angle; the angle is
//! divided by a damping factor before it is applied to the model.

use glam::Vec3;

/// Divisor applied to the raw angle between two sphere points.
pub const ROTATION_DAMPING: f32 = 15.0;

/// Axes shorter than this mean the cursor did not move far enough to define
/// a rotation.
pub const AXIS_EPSILON: f32 = 1e-4;

/// Project window coordinates onto the unit hemisphere.
///
/// The smaller window dimension maps to the unit disk, so the sphere stays
/// round in non-square windows. Points outside the disk are pulled onto its
/// rim (z = 0).
pub fn project_to_sphere(x: f32, y: f32, width: f32, height: f32) -> Vec3 {
    let radius = 0.5 * width.min(height).max(1.0);
    let mut px = (x - 0.5 * width) / radius;
    let mut py = (0.5 * height - y) / radius;

    let d = (px * px + py * py).sqrt();
    if d > 1.0 {
        px /= d;
        py /= d;
    }
    let z = (1.0 - d.clamp(0.0, 1.0)).sqrt();
    Vec3::new(px, py, z)
}

/// Angle and axis taking `from` to `to`, or `None` when they are (nearly)
/// parallel.
pub fn rotation_between(from: Vec3, to: Vec3, damping: f32, epsilon: f32) -> Option<(f32, Vec3)> {
    let axis = from.cross(to);
    let len = axis.length();
    if len.is_nan() || len < epsilon {
        return None;
    }
    let denom = from.length() * to.length();
    let cos = (from.dot(to) / denom).clamp(-1.0, 1.0);
    Some((cos.acos() / damping, axis))
}

/// Drag state for one trackball.
#[derive(Debug, Clone, PartialEq)]
pub struct Trackball {
    damping: f32,
    epsilon: f32,
    viewport: (f32, f32),
    anchor: Option<Vec3>,
}

impl Trackball {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            damping: ROTATION_DAMPING,
            epsilon: AXIS_EPSILON,
            viewport: (width.max(1) as f32, height.max(1) as f32),
            anchor: None,
        }
    }

    /// Override the damping divisor and the axis threshold. Non-positive
    /// damping keeps the current value.
    pub fn with_tuning(mut self, damping: f32, epsilon: f32) -> Self {
        if damping > 0.0 {
            self.damping = damping;
        }
        self.epsilon = epsilon.max(0.0);
        self
    }

    /// Track a window resize. Zero sizes are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.viewport = (width as f32, height as f32);
    }

    pub fn viewport(&self) -> (f32, f32) {
        self.viewport
    }

    pub fn project(&self, x: f32, y: f32) -> Vec3 {
        project_to_sphere(x, y, self.viewport.0, self.viewport.1)
    }

    /// Button down at `(x, y)`: fix the anchor point.
    pub fn begin_drag(&mut self, x: f32, y: f32) {
        self.anchor = Some(self.project(x, y));
    }

    pub fn end_drag(&mut self) {
        self.anchor = None;
    }

    pub fn is_dragging(&self) -> bool {
        self.anchor.is_some()
    }

    /// Rotation from the anchor to the cursor at `(x, y)`, as
    /// `(angle_radians, view_space_axis)`. The anchor stays where the drag
    /// began, so holding the cursor away from it keeps the model turning.
    pub fn drag_to(&self, x: f32, y: f32) -> Option<(f32, Vec3)> {
        let anchor = self.anchor?;
        rotation_between(anchor, self.project(x, y), self.damping, self.epsilon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    #[test]
    fn test_center_projects_to_pole() {
        let p = project_to_sphere(400.0, 300.0, 800.0, 600.0);
        assert!((p - Vec3::Z).length() < EPS);
    }

    #[test]
    fn test_projection_stays_on_or_inside_unit_sphere() {
        for &(x, y) in &[
            (0.0, 0.0),
            (800.0, 600.0),
            (100.0, 550.0),
            (400.0, 0.0),
            (799.0, 301.0),
        ] {
            let p = project_to_sphere(x, y, 800.0, 600.0);
            assert!(p.length() <= 1.0 + EPS, "{p:?} from ({x}, {y})");
            assert!(p.z >= 0.0);
        }
    }

    #[test]
    fn test_outside_disk_is_clipped_to_rim() {
        // Left edge of an 800x600 window: x' = -400/300 > 1 in magnitude.
        let p = project_to_sphere(0.0, 300.0, 800.0, 600.0);
        assert!((p - Vec3::new(-1.0, 0.0, 0.0)).length() < EPS);
    }

    #[test]
    fn test_screen_up_is_positive_y() {
        let p = project_to_sphere(300.0, 150.0, 600.0, 600.0);
        assert!(p.y > 0.0);
        assert!(p.x.abs() < EPS);
    }

    #[test]
    fn test_equal_points_give_no_rotation() {
        let p = project_to_sphere(123.0, 456.0, 800.0, 600.0);
        assert_eq!(rotation_between(p, p, ROTATION_DAMPING, AXIS_EPSILON), None);
    }

    #[test]
    fn test_rotation_angle_is_damped() {
        let (angle, axis) =
            rotation_between(Vec3::Z, Vec3::X, ROTATION_DAMPING, AXIS_EPSILON).unwrap();
        assert!((angle - std::f32::consts::FRAC_PI_2 / 15.0).abs() < EPS);
        assert!((axis - Vec3::Y).length() < EPS);
        assert!(angle.is_finite());
    }

    #[test]
    fn test_nan_input_gives_no_rotation() {
        let nan = Vec3::new(f32::NAN, 0.0, 1.0);
        assert_eq!(rotation_between(nan, Vec3::Z, ROTATION_DAMPING, AXIS_EPSILON), None);
    }

    #[test]
    fn test_drag_uses_press_anchor() {
        let mut tb = Trackball::new(800, 600);
        assert_eq!(tb.drag_to(500.0, 300.0), None);

        tb.begin_drag(400.0, 300.0);
        assert!(tb.is_dragging());
        assert_eq!(tb.drag_to(400.0, 300.0), None);

        let first = tb.drag_to(500.0, 300.0).unwrap();
        let again = tb.drag_to(500.0, 300.0).unwrap();
        assert_eq!(first, again);
        // Dragging right turns about +Y.
        assert!(first.1.normalize().dot(Vec3::Y) > 0.99);

        tb.end_drag();
        assert_eq!(tb.drag_to(500.0, 300.0), None);
    }

    #[test]
    fn test_resize_changes_projection() {
        let mut tb = Trackball::new(800, 600);
        tb.resize(1024, 768);
        assert_eq!(tb.viewport(), (1024.0, 768.0));
        assert!((tb.project(512.0, 384.0) - Vec3::Z).length() < EPS);
        tb.resize(0, 10);
        assert_eq!(tb.viewport(), (1024.0, 768.0));
    }

    #[test]
    fn test_tuning() {
        let mut tb = Trackball::new(100, 100)
            .with_tuning(30.0, 1e-3)
            .with_tuning(-1.0, 1e-3);
        tb.begin_drag(50.0, 50.0);
        let (angle, _) = tb.drag_to(100.0, 50.0).unwrap();
        assert!((angle - std::f32::consts::FRAC_PI_2 / 30.0).abs() < EPS);
    }
}
