//! Modal form state

/// A modal form: an open flag plus the draft being edited
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dialog<T> {
    open: bool,
    draft: T,
}

impl<T: Default> Dialog<T> {
    /// Show the dialog with its current draft
    pub fn open(&mut self) {
        self.open = true;
    }

    /// Hide the dialog and discard the draft
    pub fn cancel(&mut self) {
        self.open = false;
        self.draft = T::default();
    }

    /// Hide the dialog after a successful submission, clearing the draft
    pub fn complete(&mut self) {
        self.cancel();
    }

    /// Whether the dialog is shown
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    /// Draft being edited
    #[must_use]
    pub const fn draft(&self) -> &T {
        &self.draft
    }

    /// Mutable access for merging field edits
    pub const fn draft_mut(&mut self) -> &mut T {
        &mut self.draft
    }
}
