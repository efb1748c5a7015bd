//! Application Configuration
//!
//! Paths and the public base URL, derived at startup with environment
//! overrides. No configuration-file framework: the embedding binary decides
//! where data lives, this crate only carries the values.

use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// SQLite database file
    pub db_path: PathBuf,
    /// Directory where transcoded icon images are stored
    pub upload_dir: PathBuf,
    /// Base URL prefixed to public image paths
    pub public_base_url: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from("start_page.db"),
            upload_dir: PathBuf::from("uploads/icons"),
            public_base_url: "http://localhost:8000".to_string(),
        }
    }
}

impl AppConfig {
    /// Defaults with `STARTPAGE_DB`, `STARTPAGE_UPLOAD_DIR`, and
    /// `STARTPAGE_BASE_URL` overrides
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(db) = env::var("STARTPAGE_DB") {
            config.db_path = PathBuf::from(db);
        }
        if let Ok(dir) = env::var("STARTPAGE_UPLOAD_DIR") {
            config.upload_dir = PathBuf::from(dir);
        }
        if let Ok(base) = env::var("STARTPAGE_BASE_URL") {
            config.public_base_url = base;
        }
        config
    }

    /// Public URL for a stored image filename
    pub fn public_image_url(&self, filename: &str) -> String {
        format!(
            "{}/uploads/icons/{}",
            self.public_base_url.trim_end_matches('/'),
            filename
        )
    }
}
