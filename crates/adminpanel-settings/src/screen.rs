//! Sub-admin management screen

use crate::dialog::Dialog;
use crate::notification::Notification;
use adminpanel_client::{AdminApi, ClientError};
use adminpanel_core::{
    Config, DraftField, NewSubAdminDraft, PasswordChangeDraft, PasswordField, RegisterRequest,
    RoleMatch, SUB_ADMIN_ROLE, Severity, SubAdmin,
};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Notification texts
pub mod messages {
    /// Load list failed without a server message
    pub const FETCH_FAILED: &str = "Failed to fetch sub-admins";
    /// Create succeeded
    pub const ADDED: &str = "Sub-admin added successfully";
    /// Create failed without a server message
    pub const ADD_FAILED: &str = "Failed to add sub-admin";
    /// Delete succeeded
    pub const DELETED: &str = "Sub-admin deleted successfully";
    /// Delete failed without a server message
    pub const DELETE_FAILED: &str = "Failed to delete sub-admin";
    /// Confirmation did not match
    pub const PASSWORD_MISMATCH: &str = "New passwords do not match";
    /// Password change succeeded
    pub const PASSWORD_CHANGED: &str = "Password changed successfully";
    /// Password change failed without a server message
    pub const PASSWORD_CHANGE_FAILED: &str = "Failed to change password";
}

/// Result of a screen action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The request succeeded
    Succeeded,
    /// The request was sent and failed
    Failed,
    /// Local validation refused the action; nothing was sent
    Rejected,
}

impl Outcome {
    /// Whether the action succeeded
    #[must_use]
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Succeeded)
    }
}

/// Knobs taken from [`Config`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenOptions {
    /// Role comparison for the list filter
    pub role_match: RoleMatch,
    /// Notification auto-hide delay
    pub auto_hide: Duration,
}

impl Default for ScreenOptions {
    fn default() -> Self {
        Self {
            role_match: RoleMatch::Exact,
            auto_hide: crate::notification::DEFAULT_AUTO_HIDE,
        }
    }
}

impl From<&Config> for ScreenOptions {
    fn from(config: &Config) -> Self {
        Self {
            role_match: config.screen.role_match,
            auto_hide: Duration::from_millis(config.notification.auto_hide_ms),
        }
    }
}

/// Keep only the records whose role is the sub-admin role
#[must_use]
pub fn filter_sub_admins(records: Vec<SubAdmin>, role_match: RoleMatch) -> Vec<SubAdmin> {
    records
        .into_iter()
        .filter(|admin| role_match.matches(&admin.role, SUB_ADMIN_ROLE))
        .collect()
}

fn failure_message(err: &ClientError, fallback: &str) -> String {
    let message = err.user_message();
    if message.trim().is_empty() {
        fallback.to_string()
    } else {
        message
    }
}

/// State of the settings screen and the handlers that drive it
///
/// Handlers take `&mut self` and run to completion, so at most one of
/// them is ever in flight for a given screen.
#[derive(Debug)]
pub struct SettingsScreen<A> {
    api: A,
    role_match: RoleMatch,
    sub_admins: Vec<SubAdmin>,
    add_dialog: Dialog<NewSubAdminDraft>,
    password_dialog: Dialog<PasswordChangeDraft>,
    notification: Notification,
}

impl<A: AdminApi> SettingsScreen<A> {
    /// Create an idle screen with an empty list
    pub fn new(api: A, options: ScreenOptions) -> Self {
        Self {
            api,
            role_match: options.role_match,
            sub_admins: Vec::new(),
            add_dialog: Dialog::default(),
            password_dialog: Dialog::default(),
            notification: Notification::new(options.auto_hide),
        }
    }

    /// Initial load when the screen is shown
    pub async fn mount(&mut self) -> Outcome {
        self.load_list().await
    }

    /// Fetch all admins and keep the sub-admins
    ///
    /// The screen is in its loading state for the duration of this call.
    /// On failure the previously loaded list stays in place.
    pub async fn load_list(&mut self) -> Outcome {
        debug!("loading sub-admins");
        let result = self.api.list_admins().await;

        match result {
            Ok(records) => {
                let total = records.len();
                self.sub_admins = filter_sub_admins(records, self.role_match);
                debug!(total, shown = self.sub_admins.len(), "sub-admin list loaded");
                Outcome::Succeeded
            }
            Err(err) => {
                warn!(error = %err, "failed to fetch sub-admins");
                self.fail(&err, messages::FETCH_FAILED);
                Outcome::Failed
            }
        }
    }

    /// Refresh after a mutation
    pub async fn invalidate(&mut self) -> Outcome {
        self.load_list().await
    }

    /// Show the add dialog
    pub fn open_add_dialog(&mut self) {
        self.add_dialog.open();
    }

    /// Close the add dialog and discard the draft
    pub fn cancel_add_dialog(&mut self) {
        self.add_dialog.cancel();
    }

    /// Merge a single field edit into the add draft
    pub fn edit_new_sub_admin(&mut self, field: DraftField, value: impl Into<String>) {
        self.add_dialog.draft_mut().set(field, value);
    }

    /// Submit the add draft with the sub-admin role
    ///
    /// On success the dialog closes, the draft is cleared and the list is
    /// reloaded. On failure the dialog and draft stay as they were.
    pub async fn submit_new_sub_admin(&mut self) -> Outcome {
        let request = RegisterRequest::from(self.add_dialog.draft());

        match self.api.register_sub_admin(&request).await {
            Ok(()) => {
                info!(username = request.username(), "sub-admin added");
                self.notification.show(messages::ADDED, Severity::Success);
                self.add_dialog.complete();
                self.invalidate().await;
                Outcome::Succeeded
            }
            Err(err) => {
                warn!(error = %err, username = request.username(), "failed to add sub-admin");
                self.fail(&err, messages::ADD_FAILED);
                Outcome::Failed
            }
        }
    }

    /// Delete the sub-admin with `id`; the list only changes on reload
    pub async fn delete_sub_admin(&mut self, id: i64) -> Outcome {
        match self.api.delete_admin(id).await {
            Ok(()) => {
                info!(id, "sub-admin deleted");
                self.notification.show(messages::DELETED, Severity::Success);
                self.invalidate().await;
                Outcome::Succeeded
            }
            Err(err) => {
                warn!(error = %err, id, "failed to delete sub-admin");
                self.fail(&err, messages::DELETE_FAILED);
                Outcome::Failed
            }
        }
    }

    /// Show the change-password dialog
    pub fn open_password_dialog(&mut self) {
        self.password_dialog.open();
    }

    /// Close the change-password dialog and discard the draft
    pub fn cancel_password_dialog(&mut self) {
        self.password_dialog.cancel();
    }

    /// Merge a single field edit into the password draft
    pub fn edit_password(&mut self, field: PasswordField, value: impl Into<String>) {
        self.password_dialog.draft_mut().set(field, value);
    }

    /// Submit the password change
    ///
    /// A confirmation that does not match the new password is refused
    /// locally without contacting the server.
    pub async fn submit_password_change(&mut self) -> Outcome {
        let Ok(request) = self.password_dialog.draft().to_request() else {
            debug!("password confirmation mismatch, request not sent");
            self.notification
                .show(messages::PASSWORD_MISMATCH, Severity::Error);
            return Outcome::Rejected;
        };

        match self.api.change_password(&request).await {
            Ok(()) => {
                info!("password changed");
                self.notification
                    .show(messages::PASSWORD_CHANGED, Severity::Success);
                self.password_dialog.complete();
                Outcome::Succeeded
            }
            Err(err) => {
                warn!(error = %err, "failed to change password");
                self.fail(&err, messages::PASSWORD_CHANGE_FAILED);
                Outcome::Failed
            }
        }
    }

    /// Hide the notification
    pub fn close_notification(&mut self) {
        self.notification.close();
    }

    /// Hide the notification if its delay has elapsed
    pub fn dismiss_expired_notification(&mut self, now: Instant) -> bool {
        self.notification.dismiss_expired(now)
    }

    fn fail(&mut self, err: &ClientError, fallback: &str) {
        self.notification
            .show(failure_message(err, fallback), Severity::Error);
    }

    /// Sub-admins currently displayed
    #[must_use]
    pub fn sub_admins(&self) -> &[SubAdmin] {
        &self.sub_admins
    }

    /// Add dialog state
    #[must_use]
    pub const fn add_dialog(&self) -> &Dialog<NewSubAdminDraft> {
        &self.add_dialog
    }

    /// Change-password dialog state
    #[must_use]
    pub const fn password_dialog(&self) -> &Dialog<PasswordChangeDraft> {
        &self.password_dialog
    }

    /// Notification state
    #[must_use]
    pub const fn notification(&self) -> &Notification {
        &self.notification
    }

    /// Backend the screen talks to
    #[must_use]
    pub const fn api(&self) -> &A {
        &self.api
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::field_reassign_with_default)]
mod tests {
    use super::*;
    use adminpanel_client::{Result as ClientResult, StatusCode};
    use adminpanel_core::ChangePasswordRequest;
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use std::collections::VecDeque;

    fn admin(id: i64, role: &str) -> SubAdmin {
        SubAdmin {
            id,
            username: format!("user{id}"),
            email: format!("user{id}@example.com"),
            full_name: format!("User {id}"),
            phone_no: format!("555-{id:04}"),
            role: role.to_string(),
        }
    }

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Call {
        List,
        Register(String),
        Delete(i64),
        ChangePassword,
    }

    /// Scripted backend: list responses are consumed in order, mutations
    /// succeed unless `fail_mutations` is set.
    #[derive(Debug, Default)]
    struct FakeApi {
        lists: Mutex<VecDeque<Result<Vec<SubAdmin>, String>>>,
        fail_mutations: Option<String>,
        calls: Mutex<Vec<Call>>,
    }

    impl FakeApi {
        fn with_lists(lists: Vec<Result<Vec<SubAdmin>, String>>) -> Self {
            Self {
                lists: Mutex::new(lists.into()),
                ..Self::default()
            }
        }

        fn failing(mut self, message: &str) -> Self {
            self.fail_mutations = Some(message.to_string());
            self
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.lock().clone()
        }

        fn mutation_result(&self) -> ClientResult<()> {
            match &self.fail_mutations {
                Some(message) => Err(ClientError::Status {
                    status: status_code(500),
                    message: Some(message.clone()).filter(|m| !m.is_empty()),
                }),
                None => Ok(()),
            }
        }
    }

    fn status_code(code: u16) -> StatusCode {
        StatusCode::from_u16(code).unwrap()
    }

    #[async_trait]
    impl AdminApi for FakeApi {
        async fn list_admins(&self) -> ClientResult<Vec<SubAdmin>> {
            self.calls.lock().push(Call::List);
            match self.lists.lock().pop_front() {
                Some(Ok(list)) => Ok(list),
                Some(Err(message)) => Err(ClientError::Status {
                    status: status_code(503),
                    message: Some(message).filter(|m| !m.is_empty()),
                }),
                None => Ok(Vec::new()),
            }
        }

        async fn register_sub_admin(&self, request: &RegisterRequest) -> ClientResult<()> {
            assert_eq!(request.role(), SUB_ADMIN_ROLE);
            self.calls
                .lock()
                .push(Call::Register(request.username().to_string()));
            self.mutation_result()
        }

        async fn delete_admin(&self, id: i64) -> ClientResult<()> {
            self.calls.lock().push(Call::Delete(id));
            self.mutation_result()
        }

        async fn change_password(&self, _request: &ChangePasswordRequest) -> ClientResult<()> {
            self.calls.lock().push(Call::ChangePassword);
            self.mutation_result()
        }
    }

    fn screen(api: FakeApi) -> SettingsScreen<FakeApi> {
        SettingsScreen::new(api, ScreenOptions::default())
    }

    #[tokio::test]
    async fn test_mount_filters_to_sub_admins() {
        let api = FakeApi::with_lists(vec![Ok(vec![
            admin(1, "sub admin"),
            admin(2, "admin"),
            admin(3, "sub admin"),
        ])]);
        let mut screen = screen(api);

        assert_eq!(screen.mount().await, Outcome::Succeeded);
        let ids: Vec<i64> = screen.sub_admins().iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert!(!screen.notification().is_open());
    }

    #[rstest]
    #[case(RoleMatch::Exact, vec![1])]
    #[case(RoleMatch::CaseInsensitive, vec![1, 2, 3])]
    fn test_filter_policy(#[case] role_match: RoleMatch, #[case] expected: Vec<i64>) {
        let records = vec![
            admin(1, "sub admin"),
            admin(2, "Sub Admin"),
            admin(3, " SUB ADMIN"),
            admin(4, "admin"),
            admin(5, "subadmin"),
        ];
        let ids: Vec<i64> = filter_sub_admins(records, role_match)
            .iter()
            .map(|a| a.id)
            .collect();
        assert_eq!(ids, expected);
    }

    #[tokio::test]
    async fn test_failed_load_keeps_stale_list() {
        let api = FakeApi::with_lists(vec![
            Ok(vec![admin(1, "sub admin")]),
            Err("Service unavailable".to_string()),
        ]);
        let mut screen = screen(api);
        screen.mount().await;

        assert_eq!(screen.load_list().await, Outcome::Failed);
        assert_eq!(screen.sub_admins().len(), 1);
        assert_eq!(screen.notification().severity(), Severity::Error);
        assert_eq!(screen.notification().message(), "Service unavailable");
    }

    #[tokio::test]
    async fn test_failed_load_without_server_message_uses_error_text() {
        let api = FakeApi::with_lists(vec![Err(String::new())]);
        let mut screen = screen(api);

        assert_eq!(screen.mount().await, Outcome::Failed);
        assert!(screen.sub_admins().is_empty());
        assert!(!screen.notification().message().is_empty());
        assert_eq!(screen.notification().severity(), Severity::Error);
    }

    #[test]
    fn test_failure_message_without_server_body() {
        let err = ClientError::Status {
            status: status_code(500),
            message: None,
        };
        assert_eq!(
            failure_message(&err, messages::FETCH_FAILED),
            "API returned 500 Internal Server Error"
        );

        let err = ClientError::Status {
            status: status_code(502),
            message: Some("Bad upstream".to_string()),
        };
        assert_eq!(failure_message(&err, messages::FETCH_FAILED), "Bad upstream");
    }

    #[tokio::test]
    async fn test_add_success_resets_dialog_and_reloads() {
        let api = FakeApi::with_lists(vec![
            Ok(vec![]),
            Ok(vec![admin(7, "sub admin")]),
        ]);
        let mut screen = screen(api);
        screen.mount().await;

        screen.open_add_dialog();
        screen.edit_new_sub_admin(DraftField::Username, "bob");
        screen.edit_new_sub_admin(DraftField::Password, "pw");

        assert_eq!(screen.submit_new_sub_admin().await, Outcome::Succeeded);
        assert!(!screen.add_dialog().is_open());
        assert!(screen.add_dialog().draft().is_empty());
        assert_eq!(screen.sub_admins().len(), 1);
        assert_eq!(screen.notification().message(), messages::ADDED);
        assert_eq!(screen.notification().severity(), Severity::Success);
        assert_eq!(
            screen.api().calls(),
            vec![Call::List, Call::Register("bob".to_string()), Call::List]
        );
    }

    #[tokio::test]
    async fn test_add_failure_keeps_dialog_open() {
        let api = FakeApi::with_lists(vec![Ok(vec![admin(1, "sub admin")])])
            .failing("Username already taken");
        let mut screen = screen(api);
        screen.mount().await;

        screen.open_add_dialog();
        screen.edit_new_sub_admin(DraftField::Username, "bob");

        assert_eq!(screen.submit_new_sub_admin().await, Outcome::Failed);
        assert_eq!(screen.sub_admins(), [admin(1, "sub admin")].as_slice());
        assert!(screen.add_dialog().is_open());
        assert_eq!(screen.add_dialog().draft().username, "bob");
        assert_eq!(screen.notification().message(), "Username already taken");
        assert_eq!(
            screen.api().calls(),
            vec![Call::List, Call::Register("bob".to_string())]
        );
    }

    #[tokio::test]
    async fn test_cancel_add_dialog_discards_draft() {
        let mut screen = screen(FakeApi::default());
        screen.open_add_dialog();
        screen.edit_new_sub_admin(DraftField::Email, "bob@example.com");
        screen.cancel_add_dialog();

        assert!(!screen.add_dialog().is_open());
        assert!(screen.add_dialog().draft().is_empty());
        assert!(screen.api().calls().is_empty());
    }

    #[tokio::test]
    async fn test_delete_success_reloads() {
        let api = FakeApi::with_lists(vec![
            Ok(vec![admin(1, "sub admin"), admin(2, "sub admin")]),
            Ok(vec![admin(2, "sub admin")]),
        ]);
        let mut screen = screen(api);
        screen.mount().await;

        assert_eq!(screen.delete_sub_admin(1).await, Outcome::Succeeded);
        assert_eq!(screen.sub_admins().len(), 1);
        assert_eq!(screen.sub_admins()[0].id, 2);
        assert_eq!(screen.notification().message(), messages::DELETED);
        assert_eq!(
            screen.api().calls(),
            vec![Call::List, Call::Delete(1), Call::List]
        );
    }

    #[tokio::test]
    async fn test_delete_failure_keeps_row() {
        let api = FakeApi::with_lists(vec![Ok(vec![admin(1, "sub admin")])]).failing("");
        let mut screen = screen(api);
        screen.mount().await;

        assert_eq!(screen.delete_sub_admin(1).await, Outcome::Failed);
        assert_eq!(screen.sub_admins()[0].id, 1);
        assert_eq!(screen.notification().severity(), Severity::Error);
        assert!(!screen.notification().message().is_empty());
        assert_eq!(screen.api().calls(), vec![Call::List, Call::Delete(1)]);
    }

    #[tokio::test]
    async fn test_password_mismatch_sends_nothing() {
        let mut screen = screen(FakeApi::default());
        screen.open_password_dialog();
        screen.edit_password(PasswordField::Current, "old");
        screen.edit_password(PasswordField::New, "new-1");
        screen.edit_password(PasswordField::Confirm, "new-2");

        assert_eq!(screen.submit_password_change().await, Outcome::Rejected);
        assert!(screen.api().calls().is_empty());
        assert!(screen.password_dialog().is_open());
        assert_eq!(screen.notification().message(), messages::PASSWORD_MISMATCH);
        assert_eq!(screen.notification().severity(), Severity::Error);
    }

    #[tokio::test]
    async fn test_password_change_success_clears_draft() {
        let mut screen = screen(FakeApi::default());
        screen.open_password_dialog();
        screen.edit_password(PasswordField::Current, "old");
        screen.edit_password(PasswordField::New, "new");
        screen.edit_password(PasswordField::Confirm, "new");

        assert_eq!(screen.submit_password_change().await, Outcome::Succeeded);
        assert!(!screen.password_dialog().is_open());
        assert_eq!(*screen.password_dialog().draft(), PasswordChangeDraft::default());
        assert_eq!(screen.notification().message(), messages::PASSWORD_CHANGED);
        // No list reload after a password change
        assert_eq!(screen.api().calls(), vec![Call::ChangePassword]);
    }

    #[tokio::test]
    async fn test_password_change_failure_keeps_draft() {
        let api = FakeApi::with_lists(vec![Ok(vec![admin(4, "sub admin")])])
            .failing("Current password is incorrect");
        let mut screen = screen(api);
        screen.mount().await;
        screen.open_password_dialog();
        screen.edit_password(PasswordField::Current, "wrong");
        screen.edit_password(PasswordField::New, "new");
        screen.edit_password(PasswordField::Confirm, "new");

        assert_eq!(screen.submit_password_change().await, Outcome::Failed);
        assert!(screen.password_dialog().is_open());
        assert_eq!(screen.password_dialog().draft().current_password, "wrong");
        assert_eq!(screen.sub_admins(), [admin(4, "sub admin")].as_slice());
        assert_eq!(
            screen.notification().message(),
            "Current password is incorrect"
        );
    }

    #[tokio::test]
    async fn test_notification_controls() {
        let options = ScreenOptions {
            auto_hide: Duration::from_millis(50),
            ..ScreenOptions::default()
        };
        let mut screen = SettingsScreen::new(FakeApi::default(), options);
        screen.open_password_dialog();
        screen.edit_password(PasswordField::New, "a");
        screen.submit_password_change().await;
        assert!(screen.notification().is_open());

        screen.close_notification();
        assert!(!screen.notification().is_open());

        screen.submit_password_change().await;
        assert!(screen.dismiss_expired_notification(Instant::now() + Duration::from_millis(60)));
        assert!(!screen.notification().is_open());
    }

    #[test]
    fn test_options_from_config() {
        let mut config = Config::default();
        config.screen.role_match = RoleMatch::CaseInsensitive;
        config.notification.auto_hide_ms = 1500;

        let options = ScreenOptions::from(&config);
        assert_eq!(options.role_match, RoleMatch::CaseInsensitive);
        assert_eq!(options.auto_hide, Duration::from_millis(1500));
    }
}
