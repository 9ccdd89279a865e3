//! Command-line configuration

use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Scene file loaded at startup and written by save
    pub scene_path: PathBuf,
    /// Where screenshots go
    pub screenshot_dir: PathBuf,
    /// Start in flat shading regardless of the scene file
    pub flat: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            scene_path: PathBuf::from("scenes/default.ron"),
            screenshot_dir: PathBuf::from("screenshots"),
            flat: false,
        }
    }
}

impl AppConfig {
    /// Parse `--scene <path>`, `--shots <dir>` and `--flat`. Anything else is ignored.
    pub fn from_args<I: IntoIterator<Item = String>>(args: I) -> Self {
        let mut cfg = AppConfig::default();
        let args: Vec<String> = args.into_iter().collect();
        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--scene" if i + 1 < args.len() => {
                    cfg.scene_path = PathBuf::from(&args[i + 1]);
                    i += 2;
                }
                "--shots" if i + 1 < args.len() => {
                    cfg.screenshot_dir = PathBuf::from(&args[i + 1]);
                    i += 2;
                }
                "--flat" => {
                    cfg.flat = true;
                    i += 1;
                }
                _ => i += 1,
            }
        }
        cfg
    }

    /// `shot_0007.png` inside the screenshot directory
    pub fn screenshot_path(&self, index: u32) -> PathBuf {
        self.screenshot_dir.join(format!("shot_{:04}.png", index))
    }
}
