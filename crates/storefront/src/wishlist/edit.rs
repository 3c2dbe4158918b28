//! Size-edit dialog state.
//!
//! ```text
//! Idle --begin--> LoadingSizes --resolve--> Editing --close--> Idle
//!                      |
//!                      +--fail/close--> Idle
//! ```
//!
//! Every `begin` issues a fresh [`EditTicket`]. A lookup that finishes after
//! its ticket was superseded or cancelled is dropped on the floor.

use wishlist_core::WishlistEntryId;

/// Identifies one edit request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditTicket(u64);

/// Where the edit dialog currently is.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EditState {
    /// No dialog.
    #[default]
    Idle,
    /// Size options are being fetched for `entry`.
    LoadingSizes {
        entry: WishlistEntryId,
        ticket: EditTicket,
    },
    /// Dialog open for `entry` with the fetched size options.
    Editing {
        entry: WishlistEntryId,
        sizes: Vec<String>,
    },
}

/// Edit dialog state machine for one wishlist page.
#[derive(Debug, Default)]
pub struct EditSession {
    state: EditState,
    next_ticket: u64,
}

impl EditSession {
    /// Create an idle session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> &EditState {
        &self.state
    }

    /// Start loading sizes for `entry`, superseding any pending request or
    /// open dialog.
    pub fn begin(&mut self, entry: WishlistEntryId) -> EditTicket {
        self.next_ticket += 1;
        let ticket = EditTicket(self.next_ticket);
        self.state = EditState::LoadingSizes { entry, ticket };
        ticket
    }

    /// Apply a finished lookup.
    ///
    /// Returns `false` and leaves the state untouched when `ticket` is no
    /// longer the pending request.
    pub fn resolve(&mut self, ticket: EditTicket, sizes: Vec<String>) -> bool {
        match &self.state {
            EditState::LoadingSizes {
                entry,
                ticket: pending,
            } if *pending == ticket => {
                self.state = EditState::Editing {
                    entry: entry.clone(),
                    sizes,
                };
                true
            }
            _ => false,
        }
    }

    /// Abandon a failed lookup. Stale tickets are ignored.
    pub fn fail(&mut self, ticket: EditTicket) -> bool {
        match &self.state {
            EditState::LoadingSizes {
                ticket: pending, ..
            } if *pending == ticket => {
                self.state = EditState::Idle;
                true
            }
            _ => false,
        }
    }

    /// Close the dialog or cancel a pending lookup.
    pub fn close(&mut self) {
        self.state = EditState::Idle;
    }

    /// Close the session if it targets `entry`, e.g. after the entry was
    /// removed.
    pub fn forget(&mut self, removed: &WishlistEntryId) {
        let targets_removed = match &self.state {
            EditState::LoadingSizes { entry, .. } | EditState::Editing { entry, .. } => {
                entry == removed
            }
            EditState::Idle => false,
        };
        if targets_removed {
            self.state = EditState::Idle;
        }
    }
}
