//! One block's summary with a collapsible transaction list

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::domain::{format_timestamp, truncate_hash, Block};
use crate::modules::chain::transaction::TransactionView;

/// A block plus its expand/collapse state.
///
/// Collapsed blocks produce no transaction lines at all; nothing per
/// transaction is computed until the list is expanded.
#[derive(Debug, Clone)]
pub struct BlockView {
    block: Block,
    expanded: bool,
}

impl BlockView {
    pub fn new(block: Block) -> Self {
        Self {
            block,
            expanded: false,
        }
    }

    pub fn block(&self) -> &Block {
        &self.block
    }

    /// Identity used to carry expansion state across refreshes
    pub fn hash(&self) -> &str {
        &self.block.hash
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub fn set_expanded(&mut self, expanded: bool) {
        self.expanded = expanded;
    }

    pub fn toggle(&mut self) {
        self.expanded = !self.expanded;
    }

    /// Views of the block's transactions in chain order; empty while collapsed
    pub fn transaction_views(&self) -> Vec<TransactionView<'_>> {
        if !self.expanded {
            return Vec::new();
        }
        self.block.data.iter().map(TransactionView::new).collect()
    }

    pub fn lines(&self, time_unit: i64, selected: bool) -> Vec<Line<'static>> {
        let label = Style::default().fg(Color::DarkGray);
        let (marker, hash_style) = if selected {
            (
                "> ",
                Style::default()
                    .fg(Color::LightCyan)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            ("  ", Style::default())
        };

        let mut lines = vec![
            Line::from(vec![
                Span::styled(marker, hash_style),
                Span::styled("Hash: ", label),
                Span::styled(truncate_hash(&self.block.hash), hash_style),
            ]),
            Line::from(vec![
                Span::raw("  "),
                Span::styled("Timestamp: ", label),
                Span::raw(format_timestamp(self.block.timestamp, time_unit)),
            ]),
        ];

        let affordance = Style::default().fg(Color::Red).add_modifier(Modifier::BOLD);
        if !self.expanded {
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled("[+]", affordance),
            ]));
            return lines;
        }

        for view in self.transaction_views() {
            lines.push(Line::from(Span::styled(
                "    ----",
                Style::default().fg(Color::DarkGray),
            )));
            lines.extend(view.lines().into_iter().map(|line| {
                let mut spans = vec![Span::raw("    ")];
                spans.extend(line.spans);
                Line::from(spans)
            }));
        }
        lines.push(Line::from(vec![
            Span::raw("  "),
            Span::styled("[-]", affordance),
        ]));
        lines
    }
}
