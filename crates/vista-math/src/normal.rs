use glam::Mat4;

/// Determinant magnitude below which a model-view matrix is treated as singular.
const SINGULAR_EPSILON: f32 = 1e-12;

/// Inverse-transpose of `view * model`, used to carry normals into view space.
///
/// Falls back to identity when the product is singular (e.g. a zero scale),
/// which keeps NaNs out of the shader.
pub fn normal_matrix(view: Mat4, model: Mat4) -> Mat4 {
    let model_view = view * model;
    if model_view.determinant().abs() < SINGULAR_EPSILON {
        return Mat4::IDENTITY;
    }
    model_view.inverse().transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Vec3, Vec4};

    #[test]
    fn test_identity_in_identity_out() {
        assert_eq!(normal_matrix(Mat4::IDENTITY, Mat4::IDENTITY), Mat4::IDENTITY);
    }

    #[test]
    fn test_pure_rotation_is_unchanged() {
        let rotation = Mat4::from_rotation_y(0.7);
        let n = normal_matrix(Mat4::IDENTITY, rotation);
        for col in 0..3 {
            for row in 0..3 {
                assert!((n.col(col)[row] - rotation.col(col)[row]).abs() < 1e-5);
            }
        }
    }

    #[test]
    fn test_normal_stays_perpendicular_under_non_uniform_scale() {
        let model = Mat4::from_scale(Vec3::new(4.0, 1.0, 1.0));
        // Surface x = y in model space; its normal is (1, -1, 0).
        let tangent = model * Vec4::new(1.0, 1.0, 0.0, 0.0);
        let normal = normal_matrix(Mat4::IDENTITY, model) * Vec4::new(1.0, -1.0, 0.0, 0.0);
        assert!(tangent.truncate().dot(normal.truncate()).abs() < 1e-5);
    }

    #[test]
    fn test_singular_falls_back_to_identity() {
        let model = Mat4::from_scale(Vec3::new(0.0, 1.0, 1.0));
        assert_eq!(normal_matrix(Mat4::IDENTITY, model), Mat4::IDENTITY);
    }

    #[test]
    fn test_view_translation_does_not_affect_normals() {
        let view = Mat4::from_translation(Vec3::new(0.0, 0.0, -10.0));
        let n = normal_matrix(view, Mat4::IDENTITY) * Vec4::new(0.0, 1.0, 0.0, 0.0);
        assert!((n.truncate() - Vec3::Y).length() < 1e-5);
    }
}
