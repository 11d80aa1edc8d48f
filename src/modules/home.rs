//! Home view - welcome banner, navigation and the wallet summary

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};
use ratatui::Frame;
use tracing::warn;

use crate::config::AppConfig;
use crate::core::{
    Action, Module, NotifyLevel, Outcome, Payload, Remote, Request, Resource, Route,
};
use crate::domain::WalletInfo;
use crate::modules::{panel, status_line};

/// The wallet panel shown on the Home route
pub struct HomeView {
    config: Arc<AppConfig>,
    wallet: Remote<WalletInfo>,
}

impl HomeView {
    pub fn new(config: Arc<AppConfig>) -> Self {
        Self {
            config,
            wallet: Remote::new(),
        }
    }

    pub fn remote(&self) -> &Remote<WalletInfo> {
        &self.wallet
    }

    /// Latest wallet snapshot, empty until the first fetch succeeds
    pub fn wallet(&self) -> WalletInfo {
        self.wallet.value().cloned().unwrap_or_default()
    }

    pub fn refresh(&mut self) -> Request {
        self.wallet.begin();
        Request::Fetch(Resource::WalletInfo)
    }

    pub fn wallet_lines(&self) -> Vec<Line<'static>> {
        let wallet = self.wallet();
        let label = Style::default().fg(Color::DarkGray);
        vec![
            Line::from(vec![
                Span::styled("Address: ", label),
                Span::raw(wallet.address_display()),
            ]),
            Line::from(vec![
                Span::styled("Balance: ", label),
                Span::styled(wallet.balance_display(), Style::default().fg(Color::Green)),
            ]),
        ]
    }

    pub fn lines(&self) -> Vec<Line<'static>> {
        let mut lines = vec![
            Line::from(Span::styled(
                "Welcome to Pychain!",
                Style::default()
                    .fg(Color::LightCyan)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!("Ledger at {}", self.config.base_url()),
                Style::default().fg(Color::DarkGray),
            )),
            Line::default(),
        ];

        for route in Route::ALL.into_iter().filter(|r| *r != Route::Home) {
            lines.push(Line::from(vec![
                Span::styled(format!("  {}", route.shortcut()), Style::default().fg(Color::Yellow)),
                Span::raw(format!("  {}", route.title())),
            ]));
        }
        lines.push(Line::from("─".repeat(32)));

        if let Some(line) = status_line(&self.wallet, "wallet info") {
            lines.push(line);
        }
        lines.extend(self.wallet_lines());
        lines
    }
}

impl Module for HomeView {
    fn route(&self) -> Route {
        Route::Home
    }

    fn on_mount(&mut self) -> Vec<Request> {
        vec![self.refresh()]
    }

    fn handle_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Char('r') if !self.wallet.is_pending() => Action::Request(self.refresh()),
            _ => Action::None,
        }
    }

    fn apply(&mut self, request: &Request, outcome: Outcome) -> Action {
        match outcome {
            Ok(Payload::WalletInfo(wallet)) => {
                self.wallet.resolve::<String>(Ok(wallet));
                Action::None
            }
            Ok(other) => {
                warn!(?request, ?other, "unexpected payload for home view");
                Action::None
            }
            Err(err) => {
                let message = format!("Could not load wallet info: {err}");
                self.wallet.resolve(Err(err));
                Action::Notify(message, NotifyLevel::Error)
            }
        }
    }

    fn hints(&self) -> &'static str {
        "1-4 navigate  r refresh"
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let paragraph = Paragraph::new(self.lines())
            .block(panel("HOME"))
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, area);
    }
}
