//! Conduct a transaction - recipient/amount form

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
    Action, FetchStatus, Module, NotifyLevel, Outcome, Payload, Remote, Request, Route,
    Submission,
};
use crate::domain::{TransactRequest, Transaction};
use crate::modules::chain::TransactionView;
use crate::modules::panel;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Recipient,
    Amount,
}

pub struct TransactView {
    config: Arc<AppConfig>,
    recipient: String,
    amount: String,
    focus: Field,
    editing: bool,
    submission: Remote<Transaction>,
}

impl TransactView {
    pub fn new(config: Arc<AppConfig>) -> Self {
        Self {
            config,
            recipient: String::new(),
            amount: String::new(),
            focus: Field::Recipient,
            editing: true,
            submission: Remote::new(),
        }
    }

    pub fn recipient(&self) -> &str {
        &self.recipient
    }

    pub fn amount(&self) -> &str {
        &self.amount
    }

    pub fn focus(&self) -> Field {
        self.focus
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn submission(&self) -> &Remote<Transaction> {
        &self.submission
    }

    fn field_mut(&mut self) -> &mut String {
        match self.focus {
            Field::Recipient => &mut self.recipient,
            Field::Amount => &mut self.amount,
        }
    }

    fn switch_field(&mut self) {
        self.focus = match self.focus {
            Field::Recipient => Field::Amount,
            Field::Amount => Field::Recipient,
        };
    }

    /// Validate the form and build the submission
    pub fn submit(&mut self) -> Action {
        if self.submission.is_pending() {
            return Action::Notify(
                "A transaction is already being submitted".to_string(),
                NotifyLevel::Warn,
            );
        }
        let recipient = self.recipient.trim();
        if recipient.is_empty() {
            self.focus = Field::Recipient;
            return Action::Notify("Recipient is required".to_string(), NotifyLevel::Warn);
        }
        let amount = match self.amount.trim().parse::<u64>() {
            Ok(amount) if amount > 0 => amount,
            _ => {
                self.focus = Field::Amount;
                return Action::Notify(
                    "Amount must be a positive whole number".to_string(),
                    NotifyLevel::Warn,
                );
            }
        };

        let request = TransactRequest {
            recipient: recipient.to_string(),
            amount,
        };
        self.submission.begin();
        Action::Request(Request::Submit(Submission::Transact(request)))
    }

    fn field_line(&self, field: Field, label: &'static str, value: &str) -> Line<'static> {
        let focused = self.editing && self.focus == field;
        let value_style = if focused {
            Style::default()
                .fg(Color::LightCyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        let mut spans = vec![
            Span::styled(if focused { "> " } else { "  " }, value_style),
            Span::styled(label, Style::default().fg(Color::DarkGray)),
            Span::styled(value.to_string(), value_style),
        ];
        if focused {
            spans.push(Span::styled("_", value_style));
        }
        Line::from(spans)
    }

    pub fn lines(&self) -> Vec<Line<'static>> {
        let mut lines = vec![
            Line::from(Span::styled(
                format!("Sending from the wallet at {}", self.config.base_url()),
                Style::default().fg(Color::DarkGray),
            )),
            Line::default(),
            self.field_line(Field::Recipient, "Recipient: ", &self.recipient),
            self.field_line(Field::Amount, "Amount:    ", &self.amount),
            Line::default(),
        ];

        match (self.submission.status(), self.submission.value()) {
            (FetchStatus::Pending, _) => lines.push(Line::from(Span::styled(
                "Submitting…",
                Style::default().fg(Color::Yellow),
            ))),
            (FetchStatus::Failed(message), _) => lines.push(Line::from(Span::styled(
                format!("Submission failed: {message}"),
                Style::default().fg(Color::Red),
            ))),
            (FetchStatus::Ready, Some(tx)) => {
                lines.push(Line::from(vec![
                    Span::raw("Submitted transaction "),
                    Span::styled(tx.id.clone(), Style::default().fg(Color::Green)),
                ]));
                lines.extend(TransactionView::new(tx).lines());
                lines.push(Line::from(Span::styled(
                    "It will show up in the transaction pool once the backend accepts it.",
                    Style::default().fg(Color::DarkGray),
                )));
            }
            _ => {}
        }
        lines
    }
}

impl Module for TransactView {
    fn route(&self) -> Route {
        Route::ConductTransaction
    }

    fn on_mount(&mut self) -> Vec<Request> {
        Vec::new()
    }

    fn handle_key(&mut self, key: KeyEvent) -> Action {
        if !self.editing {
            return match key.code {
                KeyCode::Char('e') | KeyCode::Enter => {
                    self.editing = true;
                    Action::None
                }
                _ => Action::None,
            };
        }

        match key.code {
            KeyCode::Esc => {
                self.editing = false;
                Action::None
            }
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                self.switch_field();
                Action::None
            }
            KeyCode::Enter => match self.focus {
                Field::Recipient => {
                    self.focus = Field::Amount;
                    Action::None
                }
                Field::Amount => self.submit(),
            },
            KeyCode::Backspace => {
                self.field_mut().pop();
                Action::None
            }
            KeyCode::Char(c) => {
                self.field_mut().push(c);
                Action::None
            }
            _ => Action::None,
        }
    }

    fn apply(&mut self, request: &Request, outcome: Outcome) -> Action {
        match outcome {
            Ok(Payload::Transacted(tx)) => {
                let message = format!("Transaction {} submitted", tx.id);
                self.submission.resolve::<String>(Ok(tx));
                self.amount.clear();
                Action::Notify(message, NotifyLevel::Info)
            }
            Ok(other) => {
                warn!(?request, ?other, "unexpected payload for transaction form");
                Action::None
            }
            Err(err) => {
                let message = format!("Transaction failed: {err}");
                self.submission.resolve(Err(err));
                Action::Notify(message, NotifyLevel::Error)
            }
        }
    }

    fn captures_input(&self) -> bool {
        self.editing
    }

    fn hints(&self) -> &'static str {
        if self.editing {
            "tab switch field  enter submit  esc stop editing"
        } else {
            "e edit  1-4 navigate"
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let paragraph = Paragraph::new(self.lines())
            .block(panel("CONDUCT A TRANSACTION"))
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, area);
    }
}
