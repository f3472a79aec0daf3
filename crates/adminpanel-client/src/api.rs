//! Admin account endpoints and the trait the settings screen talks through

use crate::error::Result;
use adminpanel_core::{ChangePasswordRequest, RegisterRequest, SubAdmin};
use async_trait::async_trait;

/// Endpoint paths, relative to the API base URL
pub mod endpoints {
    /// `GET`: every admin account
    pub const ADMINS: &str = "/admin/admins";
    /// `POST`: create an account
    pub const REGISTER: &str = "/admin/register";
    /// `POST`: change the caller's own password
    pub const CHANGE_PASSWORD: &str = "/admin/change-password";

    /// `DELETE`: remove the account with `id`
    #[must_use]
    pub fn delete(id: i64) -> String {
        format!("/admin/delete/{id}")
    }
}

/// Operations the backend offers for admin accounts
#[async_trait]
pub trait AdminApi: Send + Sync {
    /// Fetch every admin account, whatever its role
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the list cannot be decoded
    async fn list_admins(&self) -> Result<Vec<SubAdmin>>;

    /// Create a sub-admin account
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server refuses it
    async fn register_sub_admin(&self, request: &RegisterRequest) -> Result<()>;

    /// Delete the account with `id`
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server refuses it
    async fn delete_admin(&self, id: i64) -> Result<()>;

    /// Change the authenticated admin's own password
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server refuses it
    async fn change_password(&self, request: &ChangePasswordRequest) -> Result<()>;
}
