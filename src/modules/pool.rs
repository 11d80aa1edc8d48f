//! Transaction pool - pending transactions and the mine action

use std::sync::Arc;
use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use tracing::{debug, warn};

use crate::config::AppConfig;
use crate::core::{
    Action, FetchStatus, Module, NotifyLevel, Outcome, Payload, Remote, Request, Resource,
    Route, Submission,
};
use crate::domain::{truncate_hash, Block, Pool};
use crate::modules::chain::TransactionView;
use crate::modules::{panel, status_line};

pub struct PoolView {
    config: Arc<AppConfig>,
    pool: Remote<Pool>,
    mined: Remote<Block>,
    last_fetch: Option<Instant>,
}

impl PoolView {
    pub fn new(config: Arc<AppConfig>) -> Self {
        Self {
            config,
            pool: Remote::new(),
            mined: Remote::new(),
            last_fetch: None,
        }
    }

    pub fn remote(&self) -> &Remote<Pool> {
        &self.pool
    }

    /// Block returned by the last successful mine, if any
    pub fn mined(&self) -> &Remote<Block> {
        &self.mined
    }

    pub fn refresh(&mut self) -> Request {
        self.refresh_at(Instant::now())
    }

    fn refresh_at(&mut self, now: Instant) -> Request {
        self.pool.begin();
        self.last_fetch = Some(now);
        Request::Fetch(Resource::Pool)
    }

    /// Ask the backend to mine the pool. The local snapshot is left as is;
    /// a refresh shows the drained pool.
    pub fn mine(&mut self) -> Action {
        if self.mined.is_pending() {
            return Action::Notify("Mining already in progress".to_string(), NotifyLevel::Warn);
        }
        self.mined.begin();
        Action::Request(Request::Submit(Submission::Mine))
    }

    pub fn lines(&self) -> Vec<Line<'static>> {
        let mut lines = Vec::new();
        if let Some(line) = status_line(&self.pool, "transaction pool") {
            lines.push(line);
            lines.push(Line::default());
        }

        match self.pool.value() {
            Some(pool) if pool.is_empty() => {
                lines.push(Line::from(Span::styled(
                    "No pending transactions",
                    Style::default().fg(Color::DarkGray),
                )));
            }
            Some(pool) => {
                for (id, tx) in pool.iter() {
                    lines.push(Line::from(Span::styled(
                        format!("Transaction {id}"),
                        Style::default().fg(Color::LightCyan),
                    )));
                    lines.extend(TransactionView::new(tx).lines().into_iter().map(|line| {
                        let mut spans = vec![Span::raw("  ")];
                        spans.extend(line.spans);
                        Line::from(spans)
                    }));
                    lines.push(Line::default());
                }
            }
            None => {}
        }

        lines.push(Line::from("─".repeat(32)));
        lines.push(self.mine_line());
        lines
    }

    fn mine_line(&self) -> Line<'static> {
        match (self.mined.status(), self.mined.value()) {
            (FetchStatus::Pending, _) => Line::from(Span::styled(
                "Mining…",
                Style::default().fg(Color::Yellow),
            )),
            (FetchStatus::Failed(message), _) => Line::from(Span::styled(
                format!("Mining failed: {message}"),
                Style::default().fg(Color::Red),
            )),
            (FetchStatus::Ready, Some(block)) => Line::from(vec![
                Span::raw("Mined block "),
                Span::styled(truncate_hash(&block.hash), Style::default().fg(Color::Green)),
                Span::raw(" (press r to refresh the pool)"),
            ]),
            _ => Line::from(Span::styled(
                "Press m to mine the block of these transactions",
                Style::default().fg(Color::DarkGray),
            )),
        }
    }
}

impl Module for PoolView {
    fn route(&self) -> Route {
        Route::TransactionPool
    }

    fn on_mount(&mut self) -> Vec<Request> {
        vec![self.refresh()]
    }

    fn on_tick(&mut self, now: Instant) -> Option<Request> {
        let interval = self.config.pool_poll_interval()?;
        if self.pool.is_pending() {
            return None;
        }
        let due = self
            .last_fetch
            .map_or(true, |last| now.duration_since(last) >= interval);
        if !due {
            return None;
        }
        debug!("polling transaction pool");
        Some(self.refresh_at(now))
    }

    fn handle_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Char('r') if !self.pool.is_pending() => Action::Request(self.refresh()),
            KeyCode::Char('m') => self.mine(),
            _ => Action::None,
        }
    }

    fn apply(&mut self, request: &Request, outcome: Outcome) -> Action {
        match (request, outcome) {
            (_, Ok(Payload::Pool(pool))) => {
                self.pool.resolve::<String>(Ok(pool));
                Action::None
            }
            (_, Ok(Payload::Mined(block))) => {
                let message = format!(
                    "Mined block {}; refresh to see the updated pool",
                    truncate_hash(&block.hash)
                );
                self.mined.resolve::<String>(Ok(block));
                Action::Notify(message, NotifyLevel::Info)
            }
            (Request::Submit(Submission::Mine), Err(err)) => {
                let message = format!("Mining failed: {err}");
                self.mined.resolve(Err(err));
                Action::Notify(message, NotifyLevel::Error)
            }
            (_, Err(err)) => {
                let message = format!("Could not load transaction pool: {err}");
                self.pool.resolve(Err(err));
                Action::Notify(message, NotifyLevel::Error)
            }
            (_, Ok(other)) => {
                warn!(?request, ?other, "unexpected payload for pool view");
                Action::None
            }
        }
    }

    fn hints(&self) -> &'static str {
        "m mine  r refresh"
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let count = self.pool.value().map(Pool::len).unwrap_or(0);
        let paragraph = Paragraph::new(self.lines()).block(panel(format!("TRANSACTION POOL ({count})")));
        frame.render_widget(paragraph, area);
    }
}
