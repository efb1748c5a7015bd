//! Icon Entity
//!
//! A single launcher entry: either a link (external URL) or a folder that
//! contains other icons. Icons form a tree per owner via `parent_id`, and
//! siblings are ordered by `position`.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::entity::{DomainError, DomainResult, Entity};
use super::user::UserId;

pub type IconId = i64;

pub const TITLE_MAX_LEN: usize = 255;
pub const URL_MAX_LEN: usize = 500;
pub const MATERIAL_ICON_MAX_LEN: usize = 50;

static COLOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#[0-9A-Fa-f]{6}$").expect("valid color regex"));
static URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^https?://\S+$").expect("valid url regex"));

/// Icon kind determines behavior: links launch, folders contain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum IconKind {
    #[default]
    Link,
    Folder,
}

impl IconKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            IconKind::Link => "link",
            IconKind::Folder => "folder",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "folder" => IconKind::Folder,
            _ => IconKind::Link,
        }
    }
}

/// A launcher entry in the per-user icon tree
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Icon {
    /// Unique identifier, assigned by the database
    pub id: IconId,
    /// Display title (non-empty, <= 255 chars)
    pub title: String,
    /// Link or folder
    pub kind: IconKind,
    /// Target URL, required for links, unused for folders
    pub url: Option<String>,
    /// Bare filename of the stored (post-transcode) image, if any
    pub image_file: Option<String>,
    /// Material icon identifier, an alternative to an uploaded image
    pub material_icon_name: Option<String>,
    /// Optional `#RRGGBB` background color
    pub background_color: Option<String>,
    /// Parent folder (None = root level)
    pub parent_id: Option<IconId>,
    /// Position within siblings (for ordering)
    pub position: i64,
    /// Owning user, set at creation, never reassigned
    pub owner_id: UserId,
    /// Byte size of the stored image, if any
    pub image_size: Option<i64>,
    pub created_at: Option<i64>,
    pub updated_at: Option<i64>,
}

impl Icon {
    /// Create a new root-level icon with default values
    pub fn new(owner_id: UserId, title: String, kind: IconKind) -> Self {
        Self {
            id: 0,
            title,
            kind,
            url: None,
            image_file: None,
            material_icon_name: None,
            background_color: None,
            parent_id: None,
            position: 0,
            owner_id,
            image_size: None,
            created_at: None,
            updated_at: None,
        }
    }

    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    pub fn is_folder(&self) -> bool {
        self.kind == IconKind::Folder
    }

    /// Check all field-level constraints, including url-required-for-link
    pub fn validate(&self) -> DomainResult<()> {
        validate_title(&self.title)?;
        if self.kind == IconKind::Link {
            let url = self
                .url
                .as_deref()
                .ok_or_else(|| DomainError::Validation("url is required for link icons".to_string()))?;
            validate_url(url)?;
        }
        if let Some(color) = &self.background_color {
            validate_background_color(color)?;
        }
        if let Some(name) = &self.material_icon_name {
            validate_material_icon_name(name)?;
        }
        if self.position < 0 {
            return Err(DomainError::Validation(
                "position must be a non-negative integer".to_string(),
            ));
        }
        Ok(())
    }
}

impl Entity for Icon {
    type Id = IconId;

    fn id(&self) -> Self::Id {
        self.id
    }
}

pub fn validate_title(title: &str) -> DomainResult<()> {
    if title.trim().is_empty() {
        return Err(DomainError::Validation("title must not be blank".to_string()));
    }
    if title.chars().count() > TITLE_MAX_LEN {
        return Err(DomainError::Validation(format!(
            "title must be at most {} characters",
            TITLE_MAX_LEN
        )));
    }
    Ok(())
}

pub fn validate_url(url: &str) -> DomainResult<()> {
    if url.chars().count() > URL_MAX_LEN {
        return Err(DomainError::Validation(format!(
            "url must be at most {} characters",
            URL_MAX_LEN
        )));
    }
    if !URL_RE.is_match(url) {
        return Err(DomainError::Validation("url must be a valid http(s) URL".to_string()));
    }
    Ok(())
}

pub fn validate_background_color(color: &str) -> DomainResult<()> {
    if !COLOR_RE.is_match(color) {
        return Err(DomainError::Validation(
            "backgroundColor must be a #RRGGBB color".to_string(),
        ));
    }
    Ok(())
}

pub fn validate_material_icon_name(name: &str) -> DomainResult<()> {
    if name.chars().count() > MATERIAL_ICON_MAX_LEN {
        return Err(DomainError::Validation(format!(
            "materialIconName must be at most {} characters",
            MATERIAL_ICON_MAX_LEN
        )));
    }
    Ok(())
}
