//! Account records, form drafts and wire payloads

use serde::{Deserialize, Serialize};
use std::fmt;

/// Role value carried by every account this console manages
pub const SUB_ADMIN_ROLE: &str = "sub admin";

const REDACTED: &str = "<redacted>";

/// Admin account as returned by the list endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubAdmin {
    /// Server-assigned identifier
    pub id: i64,
    /// Login name
    pub username: String,
    /// Contact email
    pub email: String,
    /// Display name
    pub full_name: String,
    /// Contact phone number
    pub phone_no: String,
    /// Account role, e.g. `"sub admin"` or `"admin"`
    pub role: String,
}

/// Fields of the new sub-admin form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    /// Login name
    Username,
    /// Contact email
    Email,
    /// Initial password
    Password,
    /// Display name
    FullName,
    /// Contact phone number
    PhoneNo,
}

/// Unsaved state of the "add sub-admin" form
#[derive(Clone, Default, PartialEq, Eq)]
pub struct NewSubAdminDraft {
    /// Login name
    pub username: String,
    /// Contact email
    pub email: String,
    /// Initial password, sent once on submission
    pub password: String,
    /// Display name
    pub full_name: String,
    /// Contact phone number
    pub phone_no: String,
}

impl NewSubAdminDraft {
    /// Replace a single field, keeping the rest of the draft
    pub fn set(&mut self, field: DraftField, value: impl Into<String>) {
        let value = value.into();
        match field {
            DraftField::Username => self.username = value,
            DraftField::Email => self.email = value,
            DraftField::Password => self.password = value,
            DraftField::FullName => self.full_name = value,
            DraftField::PhoneNo => self.phone_no = value,
        }
    }

    /// Builder-style variant of [`Self::set`]
    #[must_use]
    pub fn with(mut self, field: DraftField, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    /// True when nothing has been typed into the form
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl fmt::Debug for NewSubAdminDraft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewSubAdminDraft")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &REDACTED)
            .field("full_name", &self.full_name)
            .field("phone_no", &self.phone_no)
            .finish()
    }
}

/// Body of `POST /admin/register`
///
/// The role is always [`SUB_ADMIN_ROLE`]; there is no way to construct a
/// request carrying any other role.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct RegisterRequest {
    username: String,
    email: String,
    password: String,
    full_name: String,
    phone_no: String,
    role: &'static str,
}

impl RegisterRequest {
    /// Role sent with this request
    #[must_use]
    pub const fn role(&self) -> &'static str {
        self.role
    }

    /// Username sent with this request
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }
}

impl From<&NewSubAdminDraft> for RegisterRequest {
    fn from(draft: &NewSubAdminDraft) -> Self {
        Self {
            username: draft.username.clone(),
            email: draft.email.clone(),
            password: draft.password.clone(),
            full_name: draft.full_name.clone(),
            phone_no: draft.phone_no.clone(),
            role: SUB_ADMIN_ROLE,
        }
    }
}

impl fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &REDACTED)
            .field("full_name", &self.full_name)
            .field("phone_no", &self.phone_no)
            .field("role", &self.role)
            .finish()
    }
}

/// Fields of the change-password form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordField {
    /// Password currently in use
    Current,
    /// Replacement password
    New,
    /// Repeat of the replacement password
    Confirm,
}

/// Unsaved state of the change-password form
#[derive(Clone, Default, PartialEq, Eq)]
pub struct PasswordChangeDraft {
    /// Password currently in use
    pub current_password: String,
    /// Replacement password
    pub new_password: String,
    /// Repeat of the replacement password
    pub confirm_password: String,
}

impl PasswordChangeDraft {
    /// Replace a single field, keeping the rest of the draft
    pub fn set(&mut self, field: PasswordField, value: impl Into<String>) {
        let value = value.into();
        match field {
            PasswordField::Current => self.current_password = value,
            PasswordField::New => self.new_password = value,
            PasswordField::Confirm => self.confirm_password = value,
        }
    }

    /// Builder-style variant of [`Self::set`]
    #[must_use]
    pub fn with(mut self, field: PasswordField, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    /// Whether the new password and its confirmation agree
    #[must_use]
    pub fn passwords_match(&self) -> bool {
        self.new_password == self.confirm_password
    }

    /// Build the request body, refusing mismatched confirmations
    ///
    /// # Errors
    ///
    /// Returns a validation error on `confirm_password` when the new
    /// password and its confirmation differ
    pub fn to_request(&self) -> crate::Result<ChangePasswordRequest> {
        if !self.passwords_match() {
            return Err(crate::Error::validation(
                "confirm_password",
                "New passwords do not match",
            ));
        }
        Ok(ChangePasswordRequest {
            current_password: self.current_password.clone(),
            new_password: self.new_password.clone(),
        })
    }
}

impl fmt::Debug for PasswordChangeDraft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordChangeDraft")
            .field("current_password", &REDACTED)
            .field("new_password", &REDACTED)
            .field("confirm_password", &REDACTED)
            .finish()
    }
}

/// Body of `POST /admin/change-password`
#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    current_password: String,
    new_password: String,
}

impl fmt::Debug for ChangePasswordRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangePasswordRequest")
            .field("current_password", &REDACTED)
            .field("new_password", &REDACTED)
            .finish()
    }
}

/// Notification severity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// The action completed
    #[default]
    Success,
    /// The action failed or was refused
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Error => write!(f, "error"),
        }
    }
}
