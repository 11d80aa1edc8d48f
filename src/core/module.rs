//! Module trait for the shell's views

use std::time::Instant;

use crossterm::event::KeyEvent;
use ratatui::layout::Rect;
use ratatui::Frame;

use super::{Action, Outcome, Request, Route};

/// A mountable view.
///
/// The shell creates a fresh instance on every navigation and drops it on the
/// next one, so all view state lives exactly as long as the mount.
pub trait Module {
    /// Route this view is shown for
    fn route(&self) -> Route;

    /// Requests to issue as soon as the view is mounted
    fn on_mount(&mut self) -> Vec<Request>;

    /// Periodic hook driven by the UI tick
    fn on_tick(&mut self, _now: Instant) -> Option<Request> {
        None
    }

    /// Handle keyboard input
    /// Returns an Action describing what should happen
    fn handle_key(&mut self, key: KeyEvent) -> Action;

    /// Apply the result of a request this mount issued
    fn apply(&mut self, request: &Request, outcome: Outcome) -> Action;

    /// True while the view is consuming raw text input
    fn captures_input(&self) -> bool {
        false
    }

    /// Key hints shown in the footer
    fn hints(&self) -> &'static str;

    fn render(&self, frame: &mut Frame, area: Rect);
}
