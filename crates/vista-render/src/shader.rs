//! Shader module loading and caching.
//!
//! Every pipeline ships an embedded WGSL source. When a shader directory is
//! configured, a file with the expected name in that directory replaces the
//! embedded source, which makes shader iteration possible without a rebuild.

use log::{debug, info};
use std::{collections::HashMap, path::PathBuf, sync::Arc};
use thiserror::Error;
use wgpu::{ShaderModuleDescriptor, ShaderSource};

/// Error types for shader loading operations.
#[derive(Debug, Error)]
pub enum ShaderError {
    #[error("shader file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to read shader file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no shader directory configured for file-based loading")]
    NoShaderDir,
}

/// Central registry for compiled shader modules.
pub struct ShaderLibrary {
    modules: HashMap<String, Arc<wgpu::ShaderModule>>,
    shader_dir: Option<PathBuf>,
}

impl ShaderLibrary {
    /// Create a new empty shader library.
    pub fn new() -> Self {
        Self {
            modules: HashMap::new(),
            shader_dir: None,
        }
    }

    /// Set the directory to load .wgsl overrides from.
    pub fn with_shader_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.shader_dir = Some(dir.into());
        self
    }

    /// Load `filename` from the shader directory if it exists there,
    /// otherwise compile `builtin`.
    pub fn load(
        &mut self,
        device: &wgpu::Device,
        name: &str,
        filename: &str,
        builtin: &str,
    ) -> Result<Arc<wgpu::ShaderModule>, ShaderError> {
        match self.load_from_file(device, name, filename) {
            Ok(module) => Ok(module),
            Err(ShaderError::NoShaderDir | ShaderError::FileNotFound { .. }) => {
                Ok(self.load_from_source(device, name, builtin))
            }
            Err(e) => Err(e),
        }
    }

    /// Compile a shader from a WGSL source string.
    ///
    /// Compilation errors surface through wgpu's validation error handler.
    pub fn load_from_source(
        &mut self,
        device: &wgpu::Device,
        name: &str,
        source: &str,
    ) -> Arc<wgpu::ShaderModule> {
        debug!("Loading shader '{}' from source", name);

        let module = Arc::new(device.create_shader_module(ShaderModuleDescriptor {
            label: Some(name),
            source: ShaderSource::Wgsl(source.into()),
        }));

        if self
            .modules
            .insert(name.to_string(), module.clone())
            .is_some()
        {
            info!("Replaced shader '{}'", name);
        } else {
            info!("Loaded shader '{}'", name);
        }
        module
    }

    /// Load a shader from a file in the shader directory.
    pub fn load_from_file(
        &mut self,
        device: &wgpu::Device,
        name: &str,
        filename: &str,
    ) -> Result<Arc<wgpu::ShaderModule>, ShaderError> {
        let path = self
            .shader_dir
            .as_ref()
            .ok_or(ShaderError::NoShaderDir)?
            .join(filename);

        if !path.exists() {
            return Err(ShaderError::FileNotFound { path });
        }

        debug!("Loading shader '{}' from file: {:?}", name, path);
        let source =
            std::fs::read_to_string(&path).map_err(|source| ShaderError::Io { path, source })?;
        Ok(self.load_from_source(device, name, &source))
    }

    /// Get a previously loaded shader by name.
    pub fn get(&self, name: &str) -> Option<Arc<wgpu::ShaderModule>> {
        self.modules.get(name).cloned()
    }

    /// Number of loaded shaders.
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

impl Default for ShaderLibrary {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::tests::create_test_device;

    const VALID_SHADER: &str = r#"
        @vertex
        fn vs_main(@builtin(vertex_index) idx: u32) -> @builtin(position) vec4<f32> {
            return vec4<f32>(0.0, 0.0, 0.0, 1.0);
        }

        @fragment
        fn fs_main() -> @location(0) vec4<f32> {
            return vec4<f32>(1.0, 0.0, 0.0, 1.0);
        }
    "#;

    const INVALID_SHADER: &str = r#"
        @vertex
        fn vs_main() -> @builtin(position) vec4<f32> {
            return undeclared_variable;
        }
    "#;

    #[test]
    fn test_load_valid_shader_succeeds() {
        let Some((device, _queue)) = create_test_device() else {
            return;
        };
        let mut library = ShaderLibrary::new();
        library.load_from_source(&device, "test", VALID_SHADER);
        assert_eq!(library.len(), 1);
    }

    #[test]
    fn test_cache_returns_same_module_for_same_name() {
        let Some((device, _queue)) = create_test_device() else {
            return;
        };
        let mut library = ShaderLibrary::new();
        library.load_from_source(&device, "cached", VALID_SHADER);

        let a = library.get("cached").unwrap();
        let b = library.get("cached").unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_shader_library_starts_empty() {
        let library = ShaderLibrary::new();
        assert!(library.is_empty());
        assert!(library.get("nonexistent").is_none());
    }

    #[test]
    fn test_load_from_file_without_shader_dir_returns_error() {
        let Some((device, _queue)) = create_test_device() else {
            return;
        };
        let mut library = ShaderLibrary::new();
        let result = library.load_from_file(&device, "test", "test.wgsl");
        assert!(matches!(result, Err(ShaderError::NoShaderDir)));
    }

    #[test]
    fn test_load_falls_back_to_builtin() {
        let Some((device, _queue)) = create_test_device() else {
            return;
        };
        let mut library = ShaderLibrary::new().with_shader_dir("/nonexistent/vista-shaders");
        let result = library.load(&device, "lit", "lit.wgsl", VALID_SHADER);
        assert!(result.is_ok());
        assert!(library.get("lit").is_some());
    }

    #[test]
    fn test_load_prefers_override_file() {
        let Some((device, _queue)) = create_test_device() else {
            return;
        };
        let dir = std::env::temp_dir().join(format!("vista-shader-test-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("sky.wgsl"), VALID_SHADER).unwrap();

        let mut library = ShaderLibrary::new().with_shader_dir(&dir);
        // The builtin is invalid: success proves the file was used.
        let result = library.load(&device, "sky", "sky.wgsl", INVALID_SHADER);
        assert!(result.is_ok());
        let _ = std::fs::remove_dir_all(&dir);
    }
}
