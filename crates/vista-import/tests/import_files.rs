use std::path::{Path, PathBuf};

use vista_import::{ImportError, ImportFlags, ModelImporter, read_scene};

fn write(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, bytes).unwrap();
    path
}

/// A one-triangle glTF: parent node at (10,0,0) with a child at (0,5,0)
/// that references the mesh. Geometry lives in an external `tri.bin`.
fn write_gltf(dir: &Path) -> PathBuf {
    let mut bin = Vec::with_capacity(84);
    for p in [[0.0f32, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]] {
        for c in p {
            bin.extend_from_slice(&c.to_le_bytes());
        }
    }
    for _ in 0..3 {
        for c in [0.0f32, 0.0, 1.0] {
            bin.extend_from_slice(&c.to_le_bytes());
        }
    }
    for i in [0u32, 1, 2] {
        bin.extend_from_slice(&i.to_le_bytes());
    }
    assert_eq!(bin.len(), 84);
    write(dir, "tri.bin", &bin);

    let json = r#"{
  "asset": { "version": "2.0" },
  "scene": 0,
  "scenes": [{ "nodes": [0] }],
  "nodes": [
    { "name": "parent", "translation": [10.0, 0.0, 0.0], "children": [1] },
    { "name": "child", "translation": [0.0, 5.0, 0.0], "mesh": 0 }
  ],
  "meshes": [{
    "name": "tri",
    "primitives": [{ "attributes": { "POSITION": 0, "NORMAL": 1 }, "indices": 2 }]
  }],
  "buffers": [{ "uri": "tri.bin", "byteLength": 84 }],
  "bufferViews": [
    { "buffer": 0, "byteOffset": 0, "byteLength": 36, "target": 34962 },
    { "buffer": 0, "byteOffset": 36, "byteLength": 36, "target": 34962 },
    { "buffer": 0, "byteOffset": 72, "byteLength": 12, "target": 34963 }
  ],
  "accessors": [
    { "bufferView": 0, "componentType": 5126, "count": 3, "type": "VEC3",
      "min": [0.0, 0.0, 0.0], "max": [1.0, 1.0, 0.0] },
    { "bufferView": 1, "componentType": 5126, "count": 3, "type": "VEC3" },
    { "bufferView": 2, "componentType": 5125, "count": 3, "type": "SCALAR" }
  ]
}"#;
    write(dir, "tri.gltf", json.as_bytes())
}

#[test]
fn test_import_obj_quad_is_triangulated() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(
        dir.path(),
        "quad.obj",
        b"o quad\nv 0 0 0\nv 2 0 0\nv 2 2 0\nv 0 2 0\n\
          vt 0 0\nvt 1 0\nvt 1 1\nvt 0.25 0\n\
          f 1/1 2/2 3/3 4/4\n",
    );

    let model = ModelImporter::new().import(&path).unwrap();
    assert_eq!(model.meshes.len(), 1);
    assert_eq!(model.directory, dir.path());

    let geometry = &model.meshes[0].geometry;
    assert_eq!(geometry.index_count(), 6);
    assert_eq!(geometry.vertices().len(), 4);
    // No normals in the file: generated, facing +Z.
    for v in geometry.vertices() {
        assert!((v.normal[2] - 1.0).abs() < 1e-6);
    }
    // UVs flipped to a top-left origin.
    assert_eq!(geometry.vertices()[3].uv, [0.25, 1.0]);
    assert!(model.meshes[0].textures.is_empty());
}

#[test]
fn test_import_missing_file_is_scene_invalid() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("does-not-exist.obj");
    match ModelImporter::new().import(&path) {
        Err(ImportError::SceneInvalid { path: p, message }) => {
            assert_eq!(p, path);
            assert!(!message.is_empty());
        }
        other => panic!("expected SceneInvalid, got {other:?}"),
    }
}

#[test]
fn test_import_empty_obj_is_incomplete() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "empty.obj", b"# no geometry\n");
    let err = ModelImporter::new().import(&path).unwrap_err();
    assert!(matches!(err, ImportError::SceneInvalid { .. }));
    assert!(err.to_string().contains("incomplete"));
}

#[test]
fn test_import_unknown_extension() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "model.stl", b"solid x\nendsolid x\n");
    match ModelImporter::new().import(&path) {
        Err(ImportError::UnsupportedFormat { extension, .. }) => assert_eq!(extension, "stl"),
        other => panic!("expected UnsupportedFormat, got {other:?}"),
    }
}

#[test]
fn test_gltf_node_tree_is_preserved() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_gltf(dir.path());

    let scene = read_scene(&path, ImportFlags::default()).unwrap();
    assert!(!scene.incomplete);
    assert_eq!(scene.meshes.len(), 1);
    let root = scene.root.unwrap();
    assert_eq!(root.node_count(), 3);
    assert_eq!(root.children[0].name, "parent");
    assert_eq!(root.children[0].children[0].mesh_indices, vec![0]);
}

#[test]
fn test_gltf_import_keeps_local_space_by_default() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_gltf(dir.path());

    let model = ModelImporter::new().import(&path).unwrap();
    assert_eq!(model.meshes.len(), 1);
    let v = model.meshes[0].geometry.vertices();
    assert_eq!(v[1].position, [1.0, 0.0, 0.0]);
    assert_eq!(v[0].normal, [0.0, 0.0, 1.0]);
    assert_eq!(model.meshes[0].geometry.indices(), &[0, 1, 2]);
}

#[test]
fn test_gltf_import_applies_node_transforms_when_enabled() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_gltf(dir.path());

    let model = ModelImporter::new()
        .apply_node_transforms(true)
        .import(&path)
        .unwrap();
    let v = model.meshes[0].geometry.vertices();
    assert_eq!(v[0].position, [10.0, 5.0, 0.0]);
    assert_eq!(v[2].position, [10.0, 6.0, 0.0]);
    let bounds = model.bounds();
    assert_eq!(bounds.min, glam::Vec3::new(10.0, 5.0, 0.0));
}
