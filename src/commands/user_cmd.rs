//! User Operation Handlers

use std::sync::LazyLock;

use regex::Regex;

use crate::domain::{DomainError, DomainResult, Principal, RegisterInput, UserView, TITLE_MAX_LEN};
use crate::AppState;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex"));

/// Register a new account. No principal: registration is the one public
/// operation. An already-used email is a conflict.
pub async fn register_user(state: &AppState, input: RegisterInput) -> DomainResult<UserView> {
    let email = input.email.trim().to_lowercase();
    if !EMAIL_RE.is_match(&email) {
        return Err(DomainError::Validation("email is not a valid address".to_string()));
    }

    let display_name = input.display_name.trim();
    if display_name.is_empty() {
        return Err(DomainError::Validation("displayName must not be blank".to_string()));
    }
    if display_name.chars().count() > TITLE_MAX_LEN {
        return Err(DomainError::Validation(format!(
            "displayName must be at most {} characters",
            TITLE_MAX_LEN
        )));
    }

    let user = state.users.create(&email, display_name).await?;
    log::info!("registered user {} ({})", user.id, user.email);
    Ok(UserView::from(&user))
}

/// Resolve the calling principal's own account row
pub async fn current_user(state: &AppState, principal: &Principal) -> DomainResult<UserView> {
    let user = state
        .users
        .find_by_id(principal.user_id)
        .await?
        .ok_or_else(|| DomainError::NotFound("user not found".to_string()))?;
    Ok(UserView::from(&user))
}
