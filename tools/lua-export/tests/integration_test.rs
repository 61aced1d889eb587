//! Integration tests for the lua-export binary
//!
//! Tests the full pipeline: write JSON scene -> convert -> check -> verify output

use std::path::Path;
use std::process::Command;
use tempfile::tempdir;

use lua_export::parse_document;
use scene_model::{Face, Mesh, Node, Scene, Texture, Vec3};

fn sample_scene() -> Scene {
    let mut scene = Scene::new(
        "cli",
        Node::new("root")
            .with_child(Node::new("body").with_meshes([0]))
            .with_child(Node::new("empty")),
    );
    scene.meshes.push(Mesh {
        name: "tri".into(),
        vertices: vec![Vec3::ZERO, Vec3::X, Vec3::Y],
        faces: vec![Face::triangle(0, 1, 2)],
        ..Default::default()
    });
    scene
        .textures
        .push(Texture::compressed("", "png", b"\x89PNG\r\n\x1a\n".to_vec()));
    scene
}

fn write_scene_json(scene: &Scene, path: &Path) {
    let json = serde_json::to_string_pretty(scene).expect("Failed to serialize scene");
    std::fs::write(path, json).expect("Failed to write scene JSON");
}

fn lua_export(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_lua-export"))
        .args(args)
        .output()
        .expect("Failed to run lua-export")
}

/// Test JSON -> Lua conversion
#[test]
fn test_convert_json_scene() {
    let dir = tempdir().expect("Failed to create temp dir");
    let json_path = dir.path().join("scene.json");
    let lua_path = dir.path().join("scene.lua");
    write_scene_json(&sample_scene(), &json_path);

    let output = lua_export(&[
        "convert",
        json_path.to_str().unwrap(),
        "-o",
        lua_path.to_str().unwrap(),
    ]);
    assert!(output.status.success(), "lua-export convert command failed");
    assert!(lua_path.exists(), "Lua file should exist");

    let data = std::fs::read(&lua_path).expect("Failed to read Lua file");
    assert!(data.starts_with(b"return {\n"), "Document should start with return");
    assert!(data.ends_with(b"}\n"), "Document should end with a newline");

    let doc = parse_document(&data).expect("Failed to parse document");
    assert_eq!(doc.get("name").as_str(), Some("cli"));
    assert_eq!(doc.get("nodes").as_table().map(|t| t.len()), Some(3));
    let texture = doc.get("textures").index(0);
    assert_eq!(texture.get("data_length").as_i64(), Some(8));
    assert!(
        data.windows(8).any(|w| w == b"\x89PNG\r\n\x1a\n"),
        "PNG signature should be written verbatim"
    );
    assert_eq!(texture.get("data").as_bytes(), Some(&b"\x89PNG\n\x1a\n"[..]));
}

/// Output path defaults to the input with a .lua extension
#[test]
fn test_convert_default_output() {
    let dir = tempdir().expect("Failed to create temp dir");
    let json_path = dir.path().join("default.json");
    write_scene_json(&sample_scene(), &json_path);

    let output = lua_export(&["convert", json_path.to_str().unwrap()]);
    assert!(output.status.success(), "lua-export convert command failed");
    assert!(dir.path().join("default.lua").exists(), "default.lua should exist");
}

/// Precision flag and config file are both honored
#[test]
fn test_convert_with_config() {
    let dir = tempdir().expect("Failed to create temp dir");
    let json_path = dir.path().join("scene.json");
    let config_path = dir.path().join("lua-export.toml");
    let lua_path = dir.path().join("scene.lua");

    let mut scene = sample_scene();
    scene.meshes[0].vertices[1] = Vec3::new(0.1, 0.0, 0.0);
    write_scene_json(&scene, &json_path);
    std::fs::write(&config_path, "float_precision = 17\nlong_bracket_level = 2\n")
        .expect("Failed to write config");

    let output = lua_export(&[
        "convert",
        json_path.to_str().unwrap(),
        "-o",
        lua_path.to_str().unwrap(),
        "-c",
        config_path.to_str().unwrap(),
    ]);
    assert!(output.status.success(), "lua-export convert command failed");
    let text = String::from_utf8_lossy(&std::fs::read(&lua_path).expect("Failed to read Lua file"))
        .into_owned();
    assert!(text.contains("{0.10000000149011612, 0, 0}"), "17 digits expected");
    assert!(text.contains("data=[==["), "bracket level from config expected");

    let output = lua_export(&[
        "convert",
        json_path.to_str().unwrap(),
        "-o",
        lua_path.to_str().unwrap(),
        "--precision",
        "15",
    ]);
    assert!(output.status.success(), "lua-export convert command failed");
    let text = String::from_utf8_lossy(&std::fs::read(&lua_path).expect("Failed to read Lua file"))
        .into_owned();
    assert!(text.contains("{0.100000001490116, 0, 0}"), "15 digits expected");
}

/// Invalid scenes are rejected before any output is written
#[test]
fn test_convert_rejects_invalid_scene() {
    let dir = tempdir().expect("Failed to create temp dir");
    let json_path = dir.path().join("bad.json");
    let lua_path = dir.path().join("bad.lua");

    let mut scene = sample_scene();
    scene.root.meshes.push(9);
    write_scene_json(&scene, &json_path);

    let output = lua_export(&[
        "convert",
        json_path.to_str().unwrap(),
        "-o",
        lua_path.to_str().unwrap(),
    ]);
    assert!(!output.status.success(), "Invalid scene should fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("references mesh 9"), "stderr: {stderr}");
}

/// Check command accepts exported documents and rejects broken ones
#[test]
fn test_check_command() {
    let dir = tempdir().expect("Failed to create temp dir");
    let json_path = dir.path().join("scene.json");
    let lua_path = dir.path().join("scene.lua");
    write_scene_json(&sample_scene(), &json_path);

    let output = lua_export(&[
        "convert",
        json_path.to_str().unwrap(),
        "-o",
        lua_path.to_str().unwrap(),
    ]);
    assert!(output.status.success(), "lua-export convert command failed");

    let output = lua_export(&["check", lua_path.to_str().unwrap()]);
    assert!(output.status.success(), "lua-export check command failed");

    let broken_path = dir.path().join("broken.lua");
    std::fs::write(&broken_path, "return {name=\"x\";").expect("Failed to write file");
    let output = lua_export(&["check", broken_path.to_str().unwrap()]);
    assert!(!output.status.success(), "Broken document should fail");
}

#[test]
fn test_missing_input() {
    let dir = tempdir().expect("Failed to create temp dir");
    let missing = dir.path().join("missing.json");
    let output = lua_export(&["convert", missing.to_str().unwrap()]);
    assert!(!output.status.success(), "Missing input should fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to read scene"), "stderr: {stderr}");
}
