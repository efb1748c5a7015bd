//! Start Page Backend
//!
//! A per-user tree of "icons" (links and folders) with strict sibling
//! ordering, plus an image-attach pipeline. Layered architecture:
//! - domain: entities, error taxonomy, input/view projections
//! - repository: SQLite-backed data access, always owner-scoped
//! - images: transcoding and on-disk image storage
//! - commands: operation handlers a transport layer calls
//!
//! Transport (HTTP routing, sessions, upload framing) is the embedding
//! binary's concern; every operation here takes an explicit `Principal`.

use std::sync::Arc;

pub mod commands;
pub mod config;
pub mod domain;
pub mod images;
pub mod repository;

use config::AppConfig;
use domain::DomainResult;
use images::{ImageStore, ImageTranscoder, WebpTranscoder};
use repository::{IconRepository, SharedConnection, UserRepository};

/// Application state shared across command handlers
pub struct AppState {
    pub config: AppConfig,
    pub icons: IconRepository,
    pub users: UserRepository,
    pub images: ImageStore,
    pub transcoder: Arc<dyn ImageTranscoder>,
}

impl AppState {
    /// Open the configured database and assemble the state
    pub fn open(config: AppConfig) -> DomainResult<Self> {
        let conn = repository::open_db(&config.db_path)?;
        Ok(Self::new(config, conn))
    }

    pub fn new(config: AppConfig, conn: SharedConnection) -> Self {
        Self {
            icons: IconRepository::new(conn.clone()),
            users: UserRepository::new(conn),
            images: ImageStore::new(config.upload_dir.clone()),
            transcoder: Arc::new(WebpTranscoder),
            config,
        }
    }

    /// Swap the transcoder, e.g. for a stub in tests
    pub fn with_transcoder(mut self, transcoder: Arc<dyn ImageTranscoder>) -> Self {
        self.transcoder = transcoder;
        self
    }
}
