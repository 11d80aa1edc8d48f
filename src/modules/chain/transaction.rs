//! One transaction's sender and recipients

use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::domain::{truncate_address, Transaction};

/// Read-only rendering of a single transaction
#[derive(Debug, Clone, Copy)]
pub struct TransactionView<'a> {
    tx: &'a Transaction,
}

impl<'a> TransactionView<'a> {
    pub fn new(tx: &'a Transaction) -> Self {
        Self { tx }
    }

    pub fn transaction(&self) -> &'a Transaction {
        self.tx
    }

    /// Sender line followed by one line per recipient
    pub fn lines(&self) -> Vec<Line<'static>> {
        let label = Style::default().fg(Color::DarkGray);
        let input = &self.tx.input;
        let balance = input
            .amount
            .as_ref()
            .map(|n| n.to_string())
            .unwrap_or_default();

        let mut lines = vec![Line::from(vec![
            Span::styled("From: ", label),
            Span::raw(truncate_address(&input.address)),
            Span::styled(" | Balance: ", label),
            Span::raw(balance),
        ])];

        lines.extend(self.tx.output_map.iter().map(|(recipient, amount)| {
            Line::from(vec![
                Span::styled("To: ", label),
                Span::raw(truncate_address(recipient)),
                Span::styled(" | Sent: ", label),
                Span::styled(amount.to_string(), Style::default().fg(Color::Green)),
            ])
        }));

        lines
    }
}
