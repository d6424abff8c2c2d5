//! Everything that happens before the window opens: import the model,
//! center it and build the scene around it.

use glam::Vec3;
use tracing::{info, instrument};
use vista_config::Config;
use vista_import::ModelImporter;
use vista_scene::{Model, SceneContext};

use crate::error::AppError;

/// Import the configured model and build the scene. CPU only, so a bad file
/// fails before any window or GPU resource exists.
#[instrument(skip(config))]
pub fn load_scene(config: &Config) -> Result<SceneContext, AppError> {
    let path = config.scene.model_path.as_ref().ok_or(AppError::NoModel)?;
    info!("Importing {}", path.display());

    let imported = ModelImporter::new()
        .apply_node_transforms(config.scene.apply_node_transforms)
        .import(path)?;
    info!(
        "Imported {} meshes, {} vertices, {} indices",
        imported.meshes.len(),
        imported.vertex_count(),
        imported.index_count()
    );

    let model = Model::new(imported, Vec3::from(config.scene.model_color));
    Ok(SceneContext::new(model, config)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use vista_import::ImportError;

    #[test]
    fn test_missing_model_path() {
        let config = Config::default();
        assert!(matches!(load_scene(&config), Err(AppError::NoModel)));
    }

    #[test]
    fn test_invalid_file_is_import_error() {
        let mut config = Config::default();
        config.scene.model_path = Some("/nonexistent/model.obj".into());
        assert!(matches!(
            load_scene(&config),
            Err(AppError::Import(ImportError::SceneInvalid { .. }))
        ));
    }

    #[test]
    fn test_unsupported_extension() {
        let mut config = Config::default();
        config.scene.model_path = Some("model.stl".into());
        assert!(matches!(
            load_scene(&config),
            Err(AppError::Import(ImportError::UnsupportedFormat { .. }))
        ));
    }

    #[test]
    fn test_obj_scene_is_centered() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tri.obj");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "v 2 2 2\nv 4 2 2\nv 2 4 2\nf 1 2 3").unwrap();
        drop(file);

        let mut config = Config::default();
        config.scene.model_path = Some(path);
        let scene = load_scene(&config).unwrap();
        let bounds = vista_scene::combined_bounds(scene.model.meshes());
        assert!(bounds.center().length() < 1e-6);
        assert_eq!(scene.model.meshes()[0].index_count(), 3);
    }
}
