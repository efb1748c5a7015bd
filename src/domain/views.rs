//! Input and view projections
//!
//! Explicit per-operation shapes instead of dynamic field filtering: inputs
//! carry only client-assignable fields, views decide exactly what each
//! response exposes. JSON field names are camelCase for frontend
//! compatibility.

use serde::{Deserialize, Deserializer, Serialize};

use super::icon::{Icon, IconId, IconKind};
use super::user::{User, UserId};

/// Client payload for creating an icon. Server-assigned fields (id, owner,
/// timestamps, image data) are deliberately absent.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateIconInput {
    pub title: String,
    pub kind: IconKind,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub material_icon_name: Option<String>,
    #[serde(default)]
    pub background_color: Option<String>,
    #[serde(default, rename = "parent")]
    pub parent_id: Option<IconId>,
    #[serde(default)]
    pub position: Option<i64>,
}

/// Client payload for a partial update. `parent_id` distinguishes "field
/// absent" (keep) from an explicit null (move to root).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateIconInput {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub kind: Option<IconKind>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub material_icon_name: Option<String>,
    #[serde(default)]
    pub background_color: Option<String>,
    #[serde(default, rename = "parent", deserialize_with = "double_option")]
    pub parent_id: Option<Option<IconId>>,
    #[serde(default)]
    pub position: Option<i64>,
}

fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

/// Public projection of one icon
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IconView {
    pub id: IconId,
    pub title: String,
    pub kind: IconKind,
    pub url: Option<String>,
    pub image_url: Option<String>,
    pub material_icon_name: Option<String>,
    pub background_color: Option<String>,
    pub parent: Option<IconId>,
    pub position: i64,
    pub created_at: Option<i64>,
    pub updated_at: Option<i64>,
}

impl IconView {
    /// `image_url` is the public URL the caller resolved from the stored
    /// filename; views never expose the bare filename or the owner.
    pub fn from_icon(icon: &Icon, image_url: Option<String>) -> Self {
        Self {
            id: icon.id,
            title: icon.title.clone(),
            kind: icon.kind,
            url: icon.url.clone(),
            image_url,
            material_icon_name: icon.material_icon_name.clone(),
            background_color: icon.background_color.clone(),
            parent: icon.parent_id,
            position: icon.position,
            created_at: icon.created_at,
            updated_at: icon.updated_at,
        }
    }
}

/// Item view with direct children, for the detail operation
#[derive(Debug, Clone, Serialize)]
pub struct IconDetailView {
    #[serde(flatten)]
    pub icon: IconView,
    pub children: Vec<IconView>,
}

/// `{"icons": [{"id": 1, "position": 0}, ...]}`
#[derive(Debug, Clone, Deserialize)]
pub struct ReorderRequest {
    pub icons: Vec<ReorderEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReorderEntry {
    pub id: IconId,
    pub position: i64,
}

/// One updated summary row in a reorder response, in input order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReorderedIcon {
    pub id: IconId,
    pub title: String,
    pub position: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReorderResponse {
    pub message: String,
    pub updated: Vec<ReorderedIcon>,
}

/// Response for a successful image attach
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageAttachView {
    pub id: IconId,
    pub title: String,
    pub image_url: String,
    pub image_size: i64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterInput {
    pub email: String,
    pub display_name: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub id: UserId,
    pub email: String,
    pub display_name: String,
    pub created_at: Option<i64>,
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            display_name: user.display_name.clone(),
            created_at: user.created_at,
        }
    }
}
