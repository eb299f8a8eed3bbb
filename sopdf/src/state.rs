//! Persisted window state.
//!
//! A small JSON file remembering the window geometry and which organize view
//! was last shown. Reading and writing never fail the caller: problems are
//! logged and defaults are used instead.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::utils::sibling_temp_path;

/// Environment variable overriding the state directory.
pub const CONFIG_DIR_ENV: &str = "SOPDF_CONFIG_DIR";

/// File name of the state file inside the config directory.
pub const STATE_FILE_NAME: &str = "window_state.json";

/// Window geometry and view preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowState {
    /// Whether the window starts maximized.
    pub maximized: bool,
    /// Window width in pixels.
    pub width: u32,
    /// Window height in pixels.
    pub height: u32,
    /// Horizontal position; `None` centers the window.
    pub x: Option<i32>,
    /// Vertical position; `None` centers the window.
    pub y: Option<i32>,
    /// Whether organize starts in the thumbnail grid instead of the list.
    pub organize_preview_mode: bool,
}

impl Default for WindowState {
    fn default() -> Self {
        Self {
            maximized: true,
            width: 1200,
            height: 900,
            x: None,
            y: None,
            organize_preview_mode: false,
        }
    }
}

/// Directory holding the state file.
///
/// `SOPDF_CONFIG_DIR` wins when set; otherwise the platform config directory
/// for `sopdf`, or the current directory as a last resort.
pub fn config_dir() -> PathBuf {
    if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV).filter(|dir| !dir.is_empty()) {
        return PathBuf::from(dir);
    }
    directories::ProjectDirs::from("", "", "sopdf")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Full path of the state file.
pub fn state_path() -> PathBuf {
    config_dir().join(STATE_FILE_NAME)
}

impl WindowState {
    /// Load from the default location.
    pub fn load() -> Self {
        Self::load_from(&state_path())
    }

    /// Load from `path`.
    ///
    /// A missing file gives the defaults. A file that does not deserialize as
    /// a whole is read key by key, so every readable key is kept and the rest
    /// fall back to their defaults.
    pub fn load_from(path: &Path) -> Self {
        let data = match fs::read_to_string(path) {
            Ok(data) => data,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Self::default(),
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "failed to read window state");
                return Self::default();
            }
        };

        match serde_json::from_str::<WindowState>(&data) {
            Ok(state) => state,
            Err(err) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %err,
                    "corrupted window state, recovering readable keys"
                );
                Self::from_partial(&data)
            }
        }
    }

    fn from_partial(data: &str) -> Self {
        let mut state = Self::default();
        let Ok(value) = serde_json::from_str::<serde_json::Value>(data) else {
            return state;
        };
        let Some(obj) = value.as_object() else {
            return state;
        };

        if let Some(v) = obj.get("maximized").and_then(|v| v.as_bool()) {
            state.maximized = v;
        }
        if let Some(v) = obj
            .get("width")
            .and_then(|v| v.as_u64())
            .and_then(|v| u32::try_from(v).ok())
        {
            state.width = v;
        }
        if let Some(v) = obj
            .get("height")
            .and_then(|v| v.as_u64())
            .and_then(|v| u32::try_from(v).ok())
        {
            state.height = v;
        }
        state.x = obj
            .get("x")
            .and_then(|v| v.as_i64())
            .and_then(|v| i32::try_from(v).ok());
        state.y = obj
            .get("y")
            .and_then(|v| v.as_i64())
            .and_then(|v| i32::try_from(v).ok());
        if let Some(v) = obj.get("organize_preview_mode").and_then(|v| v.as_bool()) {
            state.organize_preview_mode = v;
        }

        state
    }

    /// Save to the default location, logging any failure.
    pub fn save(&self) {
        self.save_to(&state_path());
    }

    /// Save to `path`, logging any failure.
    pub fn save_to(&self, path: &Path) {
        if let Err(err) = self.try_save_to(path) {
            tracing::warn!(path = %path.display(), error = %err, "failed to save window state");
        }
    }

    fn try_save_to(&self, path: &Path) -> io::Result<()> {
        if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        let data = serde_json::to_string_pretty(self).map_err(io::Error::other)?;
        atomic_write(path, &data)?;
        tracing::debug!(path = %path.display(), "saved window state");
        Ok(())
    }
}

fn atomic_write(path: &Path, data: &str) -> io::Result<()> {
    let tmp_path = sibling_temp_path(path);

    let written = fs::File::create(&tmp_path).and_then(|mut file| {
        file.write_all(data.as_bytes())?;
        file.sync_all()
    });
    let result = written.and_then(|()| fs::rename(&tmp_path, path));
    if result.is_err() {
        let _ = fs::remove_file(&tmp_path);
    }
    result
}
