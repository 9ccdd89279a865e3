//! Scene loading and saving
//!
//! Uses RON (Rusty Object Notation) for human-readable scene files.

use std::fs;
use std::path::Path;
use thiserror::Error;
use crate::rasterizer::{Camera, RenderSettings};
use super::RenderContext;

/// Error type for scene files
#[derive(Debug, Error)]
pub enum SceneFileError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("Serialize error: {0}")]
    Serialize(#[from] ron::Error),
    #[error("Invalid scene: {0}")]
    Invalid(String),
}

/// Load a scene from a RON file
pub fn load_scene<P: AsRef<Path>>(path: P) -> Result<RenderContext, SceneFileError> {
    let contents = fs::read_to_string(path)?;
    load_scene_from_str(&contents)
}

/// Load a scene from a RON string
pub fn load_scene_from_str(s: &str) -> Result<RenderContext, SceneFileError> {
    let scene: RenderContext = ron::from_str(s)?;
    check_settings(&scene.settings)?;
    Ok(scene)
}

/// Reject camera settings the projection cannot handle
fn check_settings(settings: &RenderSettings) -> Result<(), SceneFileError> {
    let (near, far, fov) = (settings.near, settings.far, settings.camera.fov);
    if !(near.is_finite() && near > 0.0) {
        return Err(SceneFileError::Invalid(format!("near must be > 0, got {}", near)));
    }
    if !(far.is_finite() && far > near) {
        return Err(SceneFileError::Invalid(format!("far must be > near ({}), got {}", near, far)));
    }
    let (lo, hi) = Camera::fov_range();
    if !(lo..=hi).contains(&fov) {
        let (lo_deg, hi_deg) = Camera::FOV_RANGE_DEG;
        return Err(SceneFileError::Invalid(format!(
            "fov must be within {}-{} degrees, got {:.1}",
            lo_deg,
            hi_deg,
            fov.to_degrees()
        )));
    }
    Ok(())
}

/// Serialize a scene to pretty RON
pub fn scene_to_string(scene: &RenderContext) -> Result<String, SceneFileError> {
    let config = ron::ser::PrettyConfig::new()
        .depth_limit(4)
        .indentor("  ".to_string());
    Ok(ron::ser::to_string_pretty(scene, config)?)
}

/// Save a scene to a RON file, creating parent directories
pub fn save_scene<P: AsRef<Path>>(scene: &RenderContext, path: P) -> Result<(), SceneFileError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, scene_to_string(scene)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rasterizer::{ShadingMode, Vec4};
    use crate::world::default_scene;

    #[test]
    fn test_minimal_scene_uses_defaults() {
        let scene = load_scene_from_str("(objects: [(position: (x: 0.0, y: 0.0, z: -5.0))])").unwrap();
        assert_eq!(scene.objects.len(), 1);
        let obj = &scene.objects[0];
        assert_eq!(obj.position, Vec4::point(0.0, 0.0, -5.0));
        assert_eq!(obj.scale.x, 1.0);
        assert_eq!(scene.settings.shading, ShadingMode::PerPixel);
        assert!(scene.settings.viewport.is_none());
    }

    #[test]
    fn test_string_round_trip_keeps_scene() {
        let scene = default_scene();
        let text = scene_to_string(&scene).unwrap();
        let back = load_scene_from_str(&text).unwrap();
        assert_eq!(back, scene);
    }

    #[test]
    fn test_parse_error_reported() {
        let err = load_scene_from_str("(objects: [").unwrap_err();
        assert!(matches!(err, SceneFileError::Parse(_)));
        assert!(err.to_string().starts_with("Parse error"));
    }

    #[test]
    fn test_bad_camera_settings_rejected() {
        let bad = [
            "(settings: (near: 0.0))",
            "(settings: (near: -1.0))",
            "(settings: (near: 1.0, far: 1.0))",
            "(settings: (camera: (position: (x: 0.0, y: 0.0, z: 0.0), fov: 0.0)))",
            "(settings: (camera: (position: (x: 0.0, y: 0.0, z: 0.0), fov: 3.0)))",
        ];
        for text in bad {
            let err = load_scene_from_str(text).unwrap_err();
            assert!(matches!(err, SceneFileError::Invalid(_)), "{}", text);
        }
        assert!(load_scene_from_str("(settings: (near: 0.5, far: 50.0))").is_ok());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_scene("/nonexistent/dir/scene.ron").unwrap_err();
        assert!(matches!(err, SceneFileError::Io(_)));
    }

    #[test]
    fn test_save_then_load() {
        let dir = std::env::temp_dir().join(format!("scanline-cubes-test-{}", std::process::id()));
        let path = dir.join("nested").join("scene.ron");
        let scene = default_scene();
        save_scene(&scene, &path).unwrap();
        assert_eq!(load_scene(&path).unwrap(), scene);
        let _ = fs::remove_dir_all(&dir);
    }
}
