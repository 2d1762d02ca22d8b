//! Test helpers: build the router against temporary directories.
//!
//! Run from workspace root: `cargo test -p pixmerge-api`.

#![allow(dead_code)]

use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use pixmerge_api::setup;
use pixmerge_core::Config;
use std::collections::HashMap;
use std::io::Cursor;
use std::path::PathBuf;
use tempfile::TempDir;

pub const BASE_URL: &str = "http://localhost:5001";

/// Test application: server and the directories it writes into.
pub struct TestApp {
    pub server: TestServer,
    pub upload_dir: PathBuf,
    pub output_dir: PathBuf,
    pub _temp_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    pub fn upload_files(&self) -> Vec<String> {
        list_dir(&self.upload_dir)
    }

    pub fn output_files(&self) -> Vec<String> {
        list_dir(&self.output_dir)
    }
}

fn list_dir(dir: &std::path::Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .map(|entries| {
            entries
                .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
                .collect()
        })
        .unwrap_or_default();
    names.sort();
    names
}

/// Setup test app with default limits.
pub async fn setup_test_app() -> TestApp {
    setup_test_app_with(&[]).await
}

/// Setup test app; `overrides` are applied on top of the test defaults.
pub async fn setup_test_app_with(overrides: &[(&str, &str)]) -> TestApp {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let upload_dir = temp_dir.path().join("uploads");
    let output_dir = temp_dir.path().join("output");

    let mut vars: HashMap<String, String> = HashMap::new();
    vars.insert("UPLOAD_DIR".into(), upload_dir.display().to_string());
    vars.insert("OUTPUT_DIR".into(), output_dir.display().to_string());
    vars.insert("PUBLIC_BASE_URL".into(), BASE_URL.into());
    vars.insert("ENVIRONMENT".into(), "test".into());
    for (key, value) in overrides {
        vars.insert(key.to_string(), value.to_string());
    }

    let config = Config::from_lookup(|key| vars.get(key).cloned()).expect("Invalid test config");
    config.validate().expect("Invalid test config");

    let (_state, router) = setup::initialize_app(config)
        .await
        .expect("Failed to initialize app");
    let server = TestServer::new(router.into_make_service()).expect("Failed to create test server");

    TestApp {
        server,
        upload_dir,
        output_dir,
        _temp_dir: temp_dir,
    }
}

/// Encode an image as PNG bytes
pub fn png_bytes(img: &RgbImage) -> Vec<u8> {
    let mut buffer = Vec::new();
    DynamicImage::ImageRgb8(img.clone())
        .write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
        .expect("Failed to encode PNG");
    buffer
}

pub fn solid_png(width: u32, height: u32, color: [u8; 3]) -> Vec<u8> {
    png_bytes(&RgbImage::from_pixel(width, height, Rgb(color)))
}

pub fn image_part(data: Vec<u8>, file_name: &str) -> Part {
    Part::bytes(bytes::Bytes::from(data))
        .file_name(file_name)
        .mime_type("image/png")
}

/// Form with both images present
pub fn image_pair_form(image1: Vec<u8>, image2: Vec<u8>) -> MultipartForm {
    MultipartForm::new()
        .add_part("image1", image_part(image1, "1.png"))
        .add_part("image2", image_part(image2, "2.png"))
}
