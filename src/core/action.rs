//! Actions that views return to the shell

use super::{Request, Route};

/// What a view wants the shell to do after handling input or a result
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// No action needed
    None,

    /// Make another view the active one
    Navigate(Route),

    /// Return to the previous view
    Back,

    /// Send a request to the backend on behalf of the current mount
    Request(Request),

    /// Show notification in status bar
    Notify(String, NotifyLevel),

    /// Request quit
    Quit,
}

/// Notification levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyLevel {
    Info,
    Warn,
    Error,
}
