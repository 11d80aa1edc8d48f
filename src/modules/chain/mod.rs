//! Chain explorer - every block of the chain, genesis first

pub mod block;
pub mod transaction;

use std::collections::HashSet;
use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::Rect;
use ratatui::text::Line;
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use tracing::warn;

use crate::config::AppConfig;
use crate::core::{
    Action, Module, NotifyLevel, Outcome, Payload, Remote, Request, Resource, Route,
};
use crate::domain::Block;
use crate::modules::{panel, status_line};

pub use block::BlockView;
pub use transaction::TransactionView;

pub struct ChainView {
    config: Arc<AppConfig>,
    blocks: Remote<Vec<BlockView>>,
    selected: usize,
}

impl ChainView {
    pub fn new(config: Arc<AppConfig>) -> Self {
        Self {
            config,
            blocks: Remote::new(),
            selected: 0,
        }
    }

    pub fn remote(&self) -> &Remote<Vec<BlockView>> {
        &self.blocks
    }

    pub fn block_views(&self) -> &[BlockView] {
        self.blocks.value().map(Vec::as_slice).unwrap_or_default()
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn select(&mut self, index: usize) {
        let len = self.block_views().len();
        self.selected = index.min(len.saturating_sub(1));
    }

    /// Flip the transaction list of the block at `index`
    pub fn toggle(&mut self, index: usize) -> bool {
        let Some(view) = self
            .blocks
            .value_mut()
            .and_then(|views| views.get_mut(index))
        else {
            return false;
        };
        view.toggle();
        true
    }

    pub fn refresh(&mut self) -> Request {
        self.blocks.begin();
        Request::Fetch(Resource::Chain)
    }

    /// Install a freshly fetched chain.
    ///
    /// Expansion state and the cursor follow block hashes, so a refresh that
    /// grows the chain keeps the same blocks open.
    pub fn ingest(&mut self, blocks: Vec<Block>) {
        let selected_hash = self
            .block_views()
            .get(self.selected)
            .map(|view| view.hash().to_string());
        let expanded: HashSet<&str> = self
            .block_views()
            .iter()
            .filter(|view| view.is_expanded())
            .map(BlockView::hash)
            .collect();

        let views: Vec<BlockView> = blocks
            .into_iter()
            .map(|block| {
                let mut view = BlockView::new(block);
                view.set_expanded(expanded.contains(view.hash()));
                view
            })
            .collect();

        let selected = selected_hash
            .and_then(|hash| views.iter().position(|view| view.hash() == hash))
            .unwrap_or(self.selected);
        self.blocks.resolve::<String>(Ok(views));
        self.select(selected);
    }

    pub fn lines(&self) -> Vec<Line<'static>> {
        let mut lines = Vec::new();
        if let Some(line) = status_line(&self.blocks, "blockchain") {
            lines.push(line);
            lines.push(Line::default());
        }
        for (index, view) in self.block_views().iter().enumerate() {
            lines.extend(view.lines(self.config.time_unit, index == self.selected));
            lines.push(Line::default());
        }
        lines
    }

    /// First line of the selected block within [`ChainView::lines`]
    fn selected_offset(&self) -> usize {
        let header = if status_line(&self.blocks, "blockchain").is_some() {
            2
        } else {
            0
        };
        header
            + self
                .block_views()
                .iter()
                .take(self.selected)
                .map(|view| view.lines(self.config.time_unit, false).len() + 1)
                .sum::<usize>()
    }
}

impl Module for ChainView {
    fn route(&self) -> Route {
        Route::Blockchain
    }

    fn on_mount(&mut self) -> Vec<Request> {
        vec![self.refresh()]
    }

    fn handle_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.select(self.selected.saturating_sub(1));
                Action::None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.select(self.selected + 1);
                Action::None
            }
            KeyCode::Home | KeyCode::Char('g') => {
                self.select(0);
                Action::None
            }
            KeyCode::End | KeyCode::Char('G') => {
                self.select(usize::MAX);
                Action::None
            }
            KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('+') | KeyCode::Char('-') => {
                let wanted = match key.code {
                    KeyCode::Char('+') => Some(true),
                    KeyCode::Char('-') => Some(false),
                    _ => None,
                };
                let index = self.selected;
                let current = self.block_views().get(index).map(BlockView::is_expanded);
                if let Some(current) = current {
                    if wanted.map_or(true, |wanted| wanted != current) {
                        self.toggle(index);
                    }
                }
                Action::None
            }
            KeyCode::Char('r') if !self.blocks.is_pending() => Action::Request(self.refresh()),
            _ => Action::None,
        }
    }

    fn apply(&mut self, request: &Request, outcome: Outcome) -> Action {
        match outcome {
            Ok(Payload::Chain(blocks)) => {
                self.ingest(blocks);
                Action::None
            }
            Ok(other) => {
                warn!(?request, ?other, "unexpected payload for chain view");
                Action::None
            }
            Err(err) => {
                let message = format!("Could not load blockchain: {err}");
                self.blocks.resolve(Err(err));
                Action::Notify(message, NotifyLevel::Error)
            }
        }
    }

    fn hints(&self) -> &'static str {
        "↑/↓ select  enter toggle  r refresh"
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let count = self.block_views().len();
        let block = panel(format!("BLOCKCHAIN ({count} blocks)"));
        let inner_height = block.inner(area).height as usize;
        let scroll = self.selected_offset().saturating_sub(inner_height / 3);
        let paragraph = Paragraph::new(self.lines())
            .block(block)
            .scroll((scroll.min(u16::MAX as usize) as u16, 0));
        frame.render_widget(paragraph, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Transaction;
    use crate::infrastructure::ledger::LedgerError;
    use crossterm::event::KeyModifiers;

    fn block(hash: &str, txs: usize) -> Block {
        Block {
            hash: hash.to_string(),
            data: (0..txs)
                .map(|i| Transaction {
                    id: format!("{hash}-tx{i}"),
                    ..Transaction::default()
                })
                .collect(),
            ..Block::default()
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn view() -> ChainView {
        ChainView::new(Arc::new(AppConfig::default()))
    }

    #[test]
    fn test_mount_requests_chain() {
        let mut view = view();
        assert!(view.block_views().is_empty());
        assert_eq!(view.on_mount(), vec![Request::Fetch(Resource::Chain)]);
        assert!(view.remote().is_pending());
    }

    #[test]
    fn test_one_block_view_per_block_in_order() {
        let mut view = view();
        view.on_mount();
        let blocks: Vec<Block> = (0..5).map(|i| block(&format!("h{i}"), i)).collect();
        view.apply(
            &Request::Fetch(Resource::Chain),
            Ok(Payload::Chain(blocks)),
        );
        let hashes: Vec<&str> = view.block_views().iter().map(BlockView::hash).collect();
        assert_eq!(hashes, vec!["h0", "h1", "h2", "h3", "h4"]);
        assert!(view.block_views().iter().all(|v| !v.is_expanded()));
    }

    #[test]
    fn test_expand_blocks_with_and_without_transactions() {
        let mut view = view();
        view.ingest(vec![block("genesis", 0), block("empty", 0), block("full", 2)]);

        view.select(2);
        view.handle_key(key(KeyCode::Enter));
        assert_eq!(view.block_views()[2].transaction_views().len(), 2);

        view.select(1);
        view.handle_key(key(KeyCode::Enter));
        assert!(view.block_views()[1].is_expanded());
        assert!(view.block_views()[1].transaction_views().is_empty());
    }

    #[test]
    fn test_expansion_follows_hash_across_refresh() {
        let mut view = view();
        view.ingest(vec![block("a", 1), block("b", 1)]);
        view.toggle(1);
        view.select(1);

        // a block is inserted ahead of "b" and another appended
        view.ingest(vec![block("a", 1), block("x", 0), block("b", 1), block("c", 0)]);
        let expanded: Vec<&str> = view
            .block_views()
            .iter()
            .filter(|v| v.is_expanded())
            .map(BlockView::hash)
            .collect();
        assert_eq!(expanded, vec!["b"]);
        assert_eq!(view.selected(), 2);
    }

    #[test]
    fn test_plus_and_minus_are_one_way() {
        let mut view = view();
        view.ingest(vec![block("a", 1)]);
        view.handle_key(key(KeyCode::Char('+')));
        view.handle_key(key(KeyCode::Char('+')));
        assert!(view.block_views()[0].is_expanded());
        view.handle_key(key(KeyCode::Char('-')));
        view.handle_key(key(KeyCode::Char('-')));
        assert!(!view.block_views()[0].is_expanded());
    }

    #[test]
    fn test_failure_is_explicit_and_keeps_blocks() {
        let mut view = view();
        view.ingest(vec![block("a", 0)]);
        view.refresh();
        let action = view.apply(
            &Request::Fetch(Resource::Chain),
            Err(LedgerError::Status {
                status: 503,
                message: "Service Unavailable".to_string(),
            }),
        );
        assert!(matches!(action, Action::Notify(_, NotifyLevel::Error)));
        assert!(view.remote().error().is_some());
        assert_eq!(view.block_views().len(), 1);
        let text = crate::modules::plain_text(&view.lines());
        assert!(text[0].contains("Service Unavailable"));
    }

    #[test]
    fn test_refresh_ignored_while_fetch_pending() {
        let mut view = view();
        view.on_mount();
        assert_eq!(view.handle_key(key(KeyCode::Char('r'))), Action::None);

        let longer = vec![block("a", 0), block("b", 0), block("c", 0)];
        view.apply(&Request::Fetch(Resource::Chain), Ok(Payload::Chain(longer)));
        assert_eq!(view.block_views().len(), 3);

        // only one fetch was ever in flight, so no older snapshot can follow
        assert_eq!(
            view.handle_key(key(KeyCode::Char('r'))),
            Action::Request(Request::Fetch(Resource::Chain))
        );
        assert_eq!(view.handle_key(key(KeyCode::Char('r'))), Action::None);
        assert_eq!(view.block_views().len(), 3);
    }

    #[test]
    fn test_toggle_on_empty_chain_is_harmless() {
        let mut view = view();
        assert!(!view.toggle(0));
        assert_eq!(view.handle_key(key(KeyCode::Enter)), Action::None);
        view.handle_key(key(KeyCode::Down));
        assert_eq!(view.selected(), 0);
    }
}
