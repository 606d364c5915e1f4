//! Read-only list screens (schools, assignments)
//!
//! A list fetches its collection once per entry into the view and shows the
//! items in backend order. Fetch failures show an empty list; nothing is
//! surfaced to the user.

use super::Rendered;
use crate::navigation::View;
use campus_client::{ApiError, Assignment, School};

/// An item that can be shown in a list screen
pub trait ListItem {
    /// Stable key for the item
    fn key(&self) -> String;

    /// Display line for the item
    fn label(&self) -> String;
}

impl ListItem for School {
    fn key(&self) -> String {
        self.id.to_string()
    }

    fn label(&self) -> String {
        format!("{} ({})", self.name, self.code)
    }
}

impl ListItem for Assignment {
    fn key(&self) -> String {
        self.id.to_string()
    }

    fn label(&self) -> String {
        format!("{} - due {}", self.title, self.due_date)
    }
}

/// Identifies one fetch started by [`ListScreen::begin_load`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

/// List screen state
#[derive(Debug, Clone)]
pub struct ListScreen<T> {
    view: View,
    items: Vec<T>,
    generation: u64,
    mounted: bool,
}

impl<T: ListItem> ListScreen<T> {
    /// Create an unmounted list screen for `view`
    pub fn new(view: View) -> Self {
        Self { view, items: Vec::new(), generation: 0, mounted: false }
    }

    /// Items currently shown
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Whether the screen is currently entered
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Enter the screen and start a fetch
    ///
    /// Any earlier fetch that has not completed becomes stale.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;
        self.mounted = true;
        self.items.clear();
        LoadTicket(self.generation)
    }

    /// Leave the screen; pending fetches become stale
    pub fn unmount(&mut self) {
        self.generation += 1;
        self.mounted = false;
        self.items.clear();
    }

    /// Apply a fetch result
    ///
    /// Returns `false` without touching state when the ticket is stale or
    /// the screen was left. Errors produce an empty list.
    pub fn complete(&mut self, ticket: LoadTicket, result: Result<Vec<T>, ApiError>) -> bool {
        if !self.mounted || ticket.0 != self.generation {
            tracing::debug!("Discarding stale {} fetch", self.view.title());
            return false;
        }

        match result {
            Ok(items) => self.items = items,
            Err(e) => {
                // Not surfaced to the user
                tracing::warn!("Failed to load {}: {}", self.view.title(), e);
                self.items.clear();
            }
        }

        true
    }

    /// Render the list
    pub fn render(&self) -> Rendered {
        self.items
            .iter()
            .fold(Rendered::new(self.view), |rendered, item| rendered.item(item.key(), item.label()))
    }
}
