//! Wiring from configuration to a ready-to-drive screen

use crate::screen::{Outcome, ScreenOptions, SettingsScreen};
use adminpanel_client::{
    AdminApi, ApiClient, ClientConfig, FileTokenStore, MemoryTokenStore, Result, Session,
};
use adminpanel_core::{Config, DraftField, NewSubAdminDraft, PasswordChangeDraft, PasswordField};
use std::sync::Arc;
use tracing::debug;

/// Build the session the client authenticates with
///
/// A `token_override` lives in memory for this process only; otherwise the
/// token is read from the file store at `auth.storage_path`.
#[must_use]
pub fn build_session(config: &Config, token_override: Option<&str>) -> Session {
    let key = config.auth.token_key.as_str();
    match token_override {
        Some(token) => {
            debug!("using token from the command line");
            Session::with_key(Arc::new(MemoryTokenStore::with_entry(key, token)), key)
        }
        None => {
            debug!(path = %config.auth.storage_path.display(), "using persisted token store");
            Session::with_key(
                Arc::new(FileTokenStore::new(config.auth.storage_path.clone())),
                key,
            )
        }
    }
}

/// Build the HTTP client for `config.api`
///
/// # Errors
///
/// Returns an error if the configured base URL is not http(s)
pub fn build_client(config: &Config, session: Session) -> Result<ApiClient> {
    ApiClient::new(&ClientConfig::from(&config.api), session)
}

/// Build a screen backed by the real API client
///
/// # Errors
///
/// Same as [`build_client`]
pub fn build_screen(config: &Config, session: Session) -> Result<SettingsScreen<ApiClient>> {
    let client = build_client(config, session)?;
    Ok(SettingsScreen::new(client, ScreenOptions::from(config)))
}

/// One user action on the screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Show the sub-admin list
    List,
    /// Fill the add dialog with this draft and submit it
    Add(NewSubAdminDraft),
    /// Delete the sub-admin with this id
    Delete(i64),
    /// Fill the password dialog with this draft and submit it
    ChangePassword(PasswordChangeDraft),
}

impl Action {
    /// Whether the list is part of this action's output
    #[must_use]
    pub const fn shows_list(&self) -> bool {
        !matches!(self, Self::ChangePassword(_))
    }
}

/// Drive `screen` through `action` the way a user would
///
/// List-affecting actions mount the screen first, so a failed mutation
/// still leaves the previously loaded rows on display.
pub async fn run_action<A: AdminApi>(screen: &mut SettingsScreen<A>, action: Action) -> Outcome {
    match action {
        Action::List => screen.mount().await,
        Action::Add(draft) => {
            screen.mount().await;
            screen.open_add_dialog();
            for (field, value) in [
                (DraftField::Username, draft.username),
                (DraftField::Email, draft.email),
                (DraftField::Password, draft.password),
                (DraftField::FullName, draft.full_name),
                (DraftField::PhoneNo, draft.phone_no),
            ] {
                screen.edit_new_sub_admin(field, value);
            }
            screen.submit_new_sub_admin().await
        }
        Action::Delete(id) => {
            screen.mount().await;
            screen.delete_sub_admin(id).await
        }
        Action::ChangePassword(draft) => {
            screen.open_password_dialog();
            for (field, value) in [
                (PasswordField::Current, draft.current_password),
                (PasswordField::New, draft.new_password),
                (PasswordField::Confirm, draft.confirm_password),
            ] {
                screen.edit_password(field, value);
            }
            screen.submit_password_change().await
        }
    }
}
