//! Icon Operation Handlers
//!
//! The surface a transport layer calls for icon CRUD, listing, and
//! reordering. Every handler takes the authenticated principal explicitly;
//! write paths run validated-input -> ownership-checked -> parent-resolved
//! -> persisted, aborting with no partial write on any failed step.

use crate::domain::{
    CreateIconInput, DomainError, DomainResult, Icon, IconDetailView, IconId, IconKind, IconView,
    Principal, ReorderRequest, ReorderResponse, UpdateIconInput,
};
use crate::repository::{
    IconHierarchyOperations, IconPositioningOperations, IconReorderOperations, OwnedRepository,
};
use crate::AppState;

pub(crate) fn icon_view(state: &AppState, icon: &Icon) -> IconView {
    let image_url = icon
        .image_file
        .as_deref()
        .map(|file| state.config.public_image_url(file));
    IconView::from_icon(icon, image_url)
}

/// Create a new icon. Position is auto-allocated at the end of the sibling
/// set unless the client supplies an explicit non-default position.
pub async fn create_icon(
    state: &AppState,
    principal: &Principal,
    input: CreateIconInput,
) -> DomainResult<IconView> {
    let owner = principal.user_id;

    let mut icon = Icon::new(owner, input.title, input.kind);
    icon.url = match input.kind {
        IconKind::Link => input.url,
        IconKind::Folder => None,
    };
    icon.material_icon_name = input.material_icon_name;
    icon.background_color = input.background_color;
    icon.parent_id = input.parent_id;
    icon.position = input.position.unwrap_or(0);
    icon.validate()?;

    if let Some(parent_id) = icon.parent_id {
        state.icons.resolve_parent_folder(owner, parent_id).await?;
    }
    if icon.position == 0 {
        icon.position = state.icons.next_position(owner, icon.parent_id).await?;
    }

    let created = state.icons.create(owner, &icon).await?;
    log::info!("created icon {} for user {}", created.id, owner);
    Ok(icon_view(state, &created))
}

/// Fetch one icon with its direct children
pub async fn get_icon(
    state: &AppState,
    principal: &Principal,
    id: IconId,
) -> DomainResult<IconDetailView> {
    let owner = principal.user_id;

    let icon = state
        .icons
        .find_by_id(owner, id)
        .await?
        .ok_or_else(|| DomainError::NotFound(format!("icon {} not found", id)))?;

    let children = if icon.is_folder() {
        state.icons.list_children(owner, id).await?
    } else {
        Vec::new()
    };

    Ok(IconDetailView {
        icon: icon_view(state, &icon),
        children: children.iter().map(|c| icon_view(state, c)).collect(),
    })
}

/// List icons: the caller's root level by default, or the children of one
/// of the caller's folders when a parent filter is supplied.
pub async fn list_icons(
    state: &AppState,
    principal: &Principal,
    parent: Option<IconId>,
) -> DomainResult<Vec<IconView>> {
    let owner = principal.user_id;

    let icons = match parent {
        Some(parent_id) => state.icons.list_children(owner, parent_id).await?,
        None => state.icons.list_roots(owner).await?,
    };
    Ok(icons.iter().map(|i| icon_view(state, i)).collect())
}

/// Partial update. A parent change re-validates the new parent and rejects
/// moves into the icon's own subtree.
pub async fn update_icon(
    state: &AppState,
    principal: &Principal,
    id: IconId,
    input: UpdateIconInput,
) -> DomainResult<IconView> {
    let owner = principal.user_id;

    let existing = state
        .icons
        .find_by_id(owner, id)
        .await?
        .ok_or_else(|| DomainError::NotFound(format!("icon {} not found", id)))?;

    let old_parent = existing.parent_id;
    let kind = input.kind.unwrap_or(existing.kind);
    let new_parent = match input.parent_id {
        Some(parent) => parent,
        None => old_parent,
    };

    let mut updated = Icon {
        id: existing.id,
        title: input.title.unwrap_or(existing.title),
        kind,
        url: match kind {
            IconKind::Link => input.url.or(existing.url),
            IconKind::Folder => None,
        },
        image_file: existing.image_file,
        material_icon_name: input.material_icon_name.or(existing.material_icon_name),
        background_color: input.background_color.or(existing.background_color),
        parent_id: new_parent,
        position: input.position.unwrap_or(existing.position),
        owner_id: existing.owner_id,
        image_size: existing.image_size,
        created_at: existing.created_at,
        updated_at: existing.updated_at,
    };
    updated.validate()?;

    if new_parent != old_parent {
        if let Some(parent_id) = new_parent {
            state.icons.resolve_parent_folder(owner, parent_id).await?;
            if state.icons.would_create_cycle(owner, id, parent_id).await? {
                return Err(DomainError::Validation(format!(
                    "icon {} cannot be moved into its own subtree",
                    id
                )));
            }
        }
    }

    let saved = state.icons.update(owner, &updated).await?;
    Ok(icon_view(state, &saved))
}

/// Delete an icon and, for folders, its whole subtree
pub async fn delete_icon(state: &AppState, principal: &Principal, id: IconId) -> DomainResult<()> {
    state.icons.delete(principal.user_id, id).await?;
    log::info!("deleted icon {} for user {}", id, principal.user_id);
    Ok(())
}

/// Apply a drag-and-drop position batch as one atomic unit
pub async fn reorder_icons(
    state: &AppState,
    principal: &Principal,
    request: ReorderRequest,
) -> DomainResult<ReorderResponse> {
    let updated = state.icons.reorder(principal.user_id, &request.icons).await?;
    Ok(ReorderResponse {
        message: "Icons reordered successfully".to_string(),
        updated,
    })
}
