//! Application shell: the active route, its mounted view and the outbox of
//! commands for the runtime worker.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{debug, info};

use crate::config::AppConfig;
use crate::core::{Action, Module, MountCounter, MountId, NotifyLevel, Request, Route};
use crate::infrastructure::runtime::{RuntimeCommand, RuntimeEvent};
use crate::modules::{ChainView, HomeView, PoolView, TransactView};

/// Info and warning messages disappear after this long; errors stay until replaced
const STATUS_TTL: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warn,
    Error,
}

#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub level: StatusLevel,
    pub since: Instant,
}

/// The one view currently mounted
pub enum ActiveView {
    Home(HomeView),
    Blockchain(ChainView),
    ConductTransaction(TransactView),
    TransactionPool(PoolView),
}

impl ActiveView {
    fn new(route: Route, config: Arc<AppConfig>) -> Self {
        match route {
            Route::Home => ActiveView::Home(HomeView::new(config)),
            Route::Blockchain => ActiveView::Blockchain(ChainView::new(config)),
            Route::ConductTransaction => {
                ActiveView::ConductTransaction(TransactView::new(config))
            }
            Route::TransactionPool => ActiveView::TransactionPool(PoolView::new(config)),
        }
    }

    pub fn module(&self) -> &dyn Module {
        match self {
            ActiveView::Home(view) => view,
            ActiveView::Blockchain(view) => view,
            ActiveView::ConductTransaction(view) => view,
            ActiveView::TransactionPool(view) => view,
        }
    }

    fn module_mut(&mut self) -> &mut dyn Module {
        match self {
            ActiveView::Home(view) => view,
            ActiveView::Blockchain(view) => view,
            ActiveView::ConductTransaction(view) => view,
            ActiveView::TransactionPool(view) => view,
        }
    }
}

pub struct App {
    config: Arc<AppConfig>,
    view: ActiveView,
    mount: MountId,
    mounts: MountCounter,
    history: Vec<Route>,
    outbox: Vec<RuntimeCommand>,
    status: Option<StatusMessage>,
    pub help_open: bool,
    pub should_quit: bool,
}

impl App {
    /// Create the shell and mount the view for `route`
    pub fn new(config: Arc<AppConfig>, route: Route) -> Self {
        let mut mounts = MountCounter::new();
        let mount = mounts.next_id();
        let mut app = Self {
            view: ActiveView::new(route, Arc::clone(&config)),
            config,
            mount,
            mounts,
            history: Vec::new(),
            outbox: Vec::new(),
            status: None,
            help_open: false,
            should_quit: false,
        };
        app.mount_current();
        app
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn route(&self) -> Route {
        self.view.module().route()
    }

    pub fn view(&self) -> &ActiveView {
        &self.view
    }

    pub fn mount_id(&self) -> MountId {
        self.mount
    }

    pub fn history(&self) -> &[Route] {
        &self.history
    }

    /// Show `route`, remounting unless it is already active
    pub fn navigate(&mut self, route: Route) {
        if route == self.route() {
            return;
        }
        self.history.push(self.route());
        self.switch_to(route);
    }

    /// Return to the previous route, if any
    pub fn back(&mut self) {
        if let Some(route) = self.history.pop() {
            self.switch_to(route);
        }
    }

    fn switch_to(&mut self, route: Route) {
        let previous = self.mount;
        self.outbox.push(RuntimeCommand::Unmount { mount: previous });
        self.mount = self.mounts.next_id();
        self.view = ActiveView::new(route, Arc::clone(&self.config));
        info!(location = route.location(), unmounted = %previous, mount = %self.mount, "navigate");
        self.mount_current();
    }

    fn mount_current(&mut self) {
        for request in self.view.module_mut().on_mount() {
            self.dispatch(request);
        }
    }

    fn dispatch(&mut self, request: Request) {
        self.outbox.push(RuntimeCommand::Dispatch {
            mount: self.mount,
            request,
        });
    }

    /// Commands queued for the runtime since the last call
    pub fn take_commands(&mut self) -> Vec<RuntimeCommand> {
        std::mem::take(&mut self.outbox)
    }

    /// Route a worker event to the mounted view.
    ///
    /// Returns `false` when the result belongs to a view that has since been
    /// unmounted; such results are dropped without touching any state.
    pub fn apply_event(&mut self, event: RuntimeEvent) -> bool {
        match event {
            RuntimeEvent::Completed {
                mount,
                request,
                outcome,
            } => {
                if mount != self.mount {
                    debug!(%mount, current = %self.mount, ?request, "discarding result for unmounted view");
                    return false;
                }
                let action = self.view.module_mut().apply(&request, outcome);
                self.apply_action(action);
                true
            }
        }
    }

    /// Apply an action returned by a view
    pub fn apply_action(&mut self, action: Action) {
        match action {
            Action::None => {}
            Action::Navigate(route) => self.navigate(route),
            Action::Back => self.back(),
            Action::Request(request) => self.dispatch(request),
            Action::Notify(msg, level) => {
                let level = match level {
                    NotifyLevel::Info => StatusLevel::Info,
                    NotifyLevel::Warn => StatusLevel::Warn,
                    NotifyLevel::Error => StatusLevel::Error,
                };
                self.set_status(msg, level);
            }
            Action::Quit => self.should_quit = true,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }
        if self.help_open {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
                self.help_open = false;
            }
            return;
        }
        if self.view.module().captures_input() {
            let action = self.view.module_mut().handle_key(key);
            self.apply_action(action);
            return;
        }

        let action = match key.code {
            KeyCode::Char('q') => Action::Quit,
            KeyCode::Char('?') => {
                self.help_open = true;
                Action::None
            }
            KeyCode::Esc | KeyCode::Backspace => Action::Back,
            KeyCode::Tab => Action::Navigate(self.cycle_route(true)),
            KeyCode::BackTab => Action::Navigate(self.cycle_route(false)),
            KeyCode::Char(c) => match Route::from_shortcut(c) {
                Some(route) => Action::Navigate(route),
                None => self.view.module_mut().handle_key(key),
            },
            _ => self.view.module_mut().handle_key(key),
        };
        self.apply_action(action);
    }

    fn cycle_route(&self, forward: bool) -> Route {
        let len = Route::ALL.len();
        let index = Route::ALL
            .iter()
            .position(|route| *route == self.route())
            .unwrap_or(0);
        let next = if forward {
            (index + 1) % len
        } else {
            (index + len - 1) % len
        };
        Route::ALL[next]
    }

    pub fn on_tick(&mut self) {
        self.tick_at(Instant::now());
    }

    pub fn tick_at(&mut self, now: Instant) {
        if let Some(status) = self.status.as_ref() {
            if status.level != StatusLevel::Error && now.duration_since(status.since) > STATUS_TTL {
                self.status = None;
            }
        }
        if let Some(request) = self.view.module_mut().on_tick(now) {
            self.dispatch(request);
        }
    }

    pub fn set_status(&mut self, text: impl Into<String>, level: StatusLevel) {
        self.status = Some(StatusMessage {
            text: text.into(),
            level,
            since: Instant::now(),
        });
    }

    pub fn status_text(&self) -> Option<(&str, StatusLevel)> {
        self.status
            .as_ref()
            .map(|status| (status.text.as_str(), status.level))
    }
}
