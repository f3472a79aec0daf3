//! Admin settings screen
//!
//! Password change and sub-admin management driven headlessly: the
//! [`SettingsScreen`] holds the list, the two dialogs and the notification,
//! and its handlers talk to any [`adminpanel_client::AdminApi`].

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

pub mod console;
pub mod dialog;
pub mod notification;
pub mod screen;
pub mod view;

pub use dialog::Dialog;
pub use notification::Notification;
pub use screen::{Outcome, ScreenOptions, SettingsScreen, filter_sub_admins, messages};
