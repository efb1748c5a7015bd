//! Image Attach Handler
//!
//! Explicit synchronous pipeline: resolve ownership, transcode, store the
//! new file, persist the reference, then clean up the replaced file. The
//! operation is all-or-nothing up to the database commit; a failure on any
//! step leaves the previous image reference and file untouched.

use crate::domain::{DomainError, DomainResult, IconId, ImageAttachView, Principal};
use crate::repository::OwnedRepository;
use crate::AppState;

pub async fn attach_icon_image(
    state: &AppState,
    principal: &Principal,
    id: IconId,
    bytes: &[u8],
) -> DomainResult<ImageAttachView> {
    let owner = principal.user_id;

    let icon = state
        .icons
        .find_by_id(owner, id)
        .await?
        .ok_or_else(|| DomainError::NotFound(format!("icon {} not found", id)))?;

    // Transcode before anything is written anywhere
    let transcoded = state.transcoder.transcode(bytes)?;
    let (filename, size) = state.images.store(&transcoded)?;

    if let Err(e) = state.icons.set_image(owner, id, &filename, size).await {
        // Roll the new file back; the row still points at the old image
        if icon.image_file.as_deref() != Some(filename.as_str()) {
            state.images.remove(&filename);
        }
        log::error!("attach image: row update failed for icon {}: {}", id, e);
        return Err(e);
    }

    // Committed. Dropping the replaced file is best-effort only.
    if let Some(old) = &icon.image_file {
        if old != &filename && !state.images.remove(old) {
            log::warn!("attach image: could not remove replaced file {}", old);
        }
    }

    log::info!("attached image {} ({} bytes) to icon {}", filename, size, id);
    Ok(ImageAttachView {
        id,
        title: icon.title,
        image_url: state.config.public_image_url(&filename),
        image_size: size,
    })
}
