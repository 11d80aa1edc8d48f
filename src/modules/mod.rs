//! Views
//!
//! Each view implements the Module trait and handles its own:
//! - Mount-time requests
//! - Key input processing
//! - Applying request results to its snapshot
//! - Rendering
//!
//! Views:
//! - home: welcome banner, navigation links, wallet address and balance
//! - chain: block list with collapsible transactions
//! - transact: transaction submission form
//! - pool: pending transactions and mining

pub mod chain;
pub mod home;
pub mod pool;
pub mod transact;

use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders};

use crate::core::{FetchStatus, Remote};

pub use chain::{BlockView, ChainView, TransactionView};
pub use home::HomeView;
pub use pool::PoolView;
pub use transact::{Field, TransactView};

/// Bordered panel with a title, shared by all views
pub(crate) fn panel(title: impl Into<String>) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(title.into())
}

/// Loading/error line for a fetch, if there is anything to say
pub(crate) fn status_line<T>(remote: &Remote<T>, what: &str) -> Option<Line<'static>> {
    match remote.status() {
        FetchStatus::Pending => Some(Line::from(Span::styled(
            format!("Loading {what}…"),
            Style::default().fg(Color::DarkGray),
        ))),
        FetchStatus::Failed(message) => Some(Line::from(Span::styled(
            format!("Could not load {what}: {message} (press r to retry)"),
            Style::default().fg(Color::Red),
        ))),
        FetchStatus::Unset | FetchStatus::Ready => None,
    }
}

/// Lines flattened to their text, without styling
pub fn plain_text(lines: &[Line<'_>]) -> Vec<String> {
    lines
        .iter()
        .map(|line| line.spans.iter().map(|span| span.content.as_ref()).collect())
        .collect()
}
