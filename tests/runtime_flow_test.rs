//! Drive the shell against a scripted ledger through the real runtime bridge

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tokio::sync::Notify;

use pychain::app::{ActiveView, App};
use pychain::config::AppConfig;
use pychain::core::{Payload, Request, Resource, Route, Submission};
use pychain::domain::{Block, Pool, TransactRequest, Transaction, WalletInfo};
use pychain::infrastructure::{LedgerApi, LedgerError, RuntimeBridge, RuntimeEvent};
use pychain::modules::plain_text;

const WAIT: Duration = Duration::from_secs(5);

struct ScriptedLedger {
    chain: Vec<Block>,
    /// Chain requests block until this is notified
    chain_gate: Option<Arc<Notify>>,
    chain_served: AtomicUsize,
    mined: AtomicUsize,
}

impl ScriptedLedger {
    fn new(chain: Vec<Block>) -> Self {
        Self {
            chain,
            chain_gate: None,
            chain_served: AtomicUsize::new(0),
            mined: AtomicUsize::new(0),
        }
    }

    fn gated(chain: Vec<Block>, gate: Arc<Notify>) -> Self {
        Self {
            chain_gate: Some(gate),
            ..Self::new(chain)
        }
    }
}

#[async_trait::async_trait]
impl LedgerApi for ScriptedLedger {
    async fn wallet_info(&self) -> Result<WalletInfo, LedgerError> {
        Ok(serde_json::from_str(r#"{"address": "0xabc", "balance": 1000}"#)?)
    }

    async fn chain(&self) -> Result<Vec<Block>, LedgerError> {
        if let Some(gate) = &self.chain_gate {
            gate.notified().await;
        }
        self.chain_served.fetch_add(1, Ordering::SeqCst);
        Ok(self.chain.clone())
    }

    async fn pool(&self) -> Result<Pool, LedgerError> {
        Ok(Pool::default())
    }

    async fn transact(&self, request: TransactRequest) -> Result<Transaction, LedgerError> {
        Err(LedgerError::Rejected(format!(
            "Amount {} exceeds balance",
            request.amount
        )))
    }

    async fn mine(&self) -> Result<Block, LedgerError> {
        tokio::time::sleep(Duration::from_millis(100)).await;
        self.mined.fetch_add(1, Ordering::SeqCst);
        Ok(Block::default())
    }

    fn endpoint_name(&self) -> String {
        "scripted".to_string()
    }
}

fn block(hash: &str, txs: usize) -> Block {
    Block {
        hash: hash.to_string(),
        timestamp: 1_700_000_000_000_000_000,
        data: (0..txs)
            .map(|i| Transaction {
                id: format!("{hash}-tx{i}"),
                ..Transaction::default()
            })
            .collect(),
        ..Block::default()
    }
}

fn pump(app: &mut App, runtime: &RuntimeBridge) {
    for command in app.take_commands() {
        runtime.send(command).unwrap();
    }
}

fn next_event(runtime: &RuntimeBridge) -> RuntimeEvent {
    runtime.recv_timeout(WAIT).expect("worker should answer")
}

#[test]
fn test_home_shows_wallet_from_backend() {
    let runtime = RuntimeBridge::new(Arc::new(ScriptedLedger::new(Vec::new()))).unwrap();
    let mut app = App::new(Arc::new(AppConfig::default()), Route::Home);
    pump(&mut app, &runtime);

    assert!(app.apply_event(next_event(&runtime)));
    let ActiveView::Home(home) = app.view() else {
        panic!("home should be mounted");
    };
    assert_eq!(
        plain_text(&home.wallet_lines()),
        vec!["Address: 0xabc", "Balance: 1000"]
    );
}

#[test]
fn test_chain_toggle_round_trip() {
    let chain = vec![block("genesis", 0), block("b1", 2), block("b2", 1)];
    let runtime = RuntimeBridge::new(Arc::new(ScriptedLedger::new(chain))).unwrap();
    let mut app = App::new(Arc::new(AppConfig::default()), Route::Blockchain);
    pump(&mut app, &runtime);
    assert!(app.apply_event(next_event(&runtime)));

    let ActiveView::Blockchain(view) = app.view() else {
        panic!("chain should be mounted");
    };
    assert_eq!(view.block_views().len(), 3);
    assert!(view.block_views().iter().all(|b| !b.is_expanded()));

    app.handle_key(KeyEvent::new(KeyCode::Down, KeyModifiers::NONE));
    app.handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));
    let ActiveView::Blockchain(view) = app.view() else {
        panic!("chain should be mounted");
    };
    let expanded: Vec<bool> = view.block_views().iter().map(|b| b.is_expanded()).collect();
    assert_eq!(expanded, vec![false, true, false]);
    assert_eq!(view.block_views()[1].transaction_views().len(), 2);

    app.handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));
    let ActiveView::Blockchain(view) = app.view() else {
        panic!("chain should be mounted");
    };
    assert!(view.block_views()[1].transaction_views().is_empty());
}

#[test]
fn test_unmount_cancels_in_flight_fetch() {
    let gate = Arc::new(Notify::new());
    let ledger = Arc::new(ScriptedLedger::gated(vec![block("b1", 1)], Arc::clone(&gate)));
    let runtime = RuntimeBridge::new(Arc::clone(&ledger) as Arc<dyn LedgerApi>).unwrap();

    let mut app = App::new(Arc::new(AppConfig::default()), Route::Blockchain);
    pump(&mut app, &runtime);

    // leave before the chain answers
    app.handle_key(KeyEvent::new(KeyCode::Char('1'), KeyModifiers::NONE));
    pump(&mut app, &runtime);

    // the wallet answer proves the worker already handled the unmount
    let event = next_event(&runtime);
    assert!(matches!(
        &event,
        RuntimeEvent::Completed {
            request: Request::Fetch(Resource::WalletInfo),
            outcome: Ok(Payload::WalletInfo(_)),
            ..
        }
    ));
    assert!(app.apply_event(event));

    gate.notify_one();
    assert!(runtime.recv_timeout(Duration::from_millis(300)).is_none());
    assert_eq!(ledger.chain_served.load(Ordering::SeqCst), 0);
    assert_eq!(app.route(), Route::Home);
}

#[test]
fn test_rejected_transaction_reports_message() {
    let runtime = RuntimeBridge::new(Arc::new(ScriptedLedger::new(Vec::new()))).unwrap();
    let mut app = App::new(Arc::new(AppConfig::default()), Route::ConductTransaction);
    for c in "bob".chars() {
        app.handle_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE));
    }
    app.handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));
    app.handle_key(KeyEvent::new(KeyCode::Char('7'), KeyModifiers::NONE));
    app.handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));
    pump(&mut app, &runtime);

    assert!(app.apply_event(next_event(&runtime)));
    let (text, _) = app.status_text().expect("failure should be reported");
    assert!(text.contains("Amount 7 exceeds balance"), "{text}");
}

#[test]
fn test_mine_completes_after_leaving_pool() {
    let ledger = Arc::new(ScriptedLedger::new(Vec::new()));
    let runtime = RuntimeBridge::new(Arc::clone(&ledger) as Arc<dyn LedgerApi>).unwrap();
    let mut app = App::new(Arc::new(AppConfig::default()), Route::TransactionPool);
    pump(&mut app, &runtime);
    assert!(app.apply_event(next_event(&runtime)));

    app.handle_key(KeyEvent::new(KeyCode::Char('m'), KeyModifiers::NONE));
    app.handle_key(KeyEvent::new(KeyCode::Char('1'), KeyModifiers::NONE));
    pump(&mut app, &runtime);

    let mut saw_mined = false;
    let mut saw_wallet = false;
    while !(saw_mined && saw_wallet) {
        let event = next_event(&runtime);
        let is_mine = matches!(
            &event,
            RuntimeEvent::Completed {
                request: Request::Submit(Submission::Mine),
                ..
            }
        );
        if is_mine {
            saw_mined = true;
            // the pool view is gone, so its result is dropped
            assert!(!app.apply_event(event));
        } else {
            saw_wallet = true;
            assert!(app.apply_event(event));
        }
    }
    assert_eq!(ledger.mined.load(Ordering::SeqCst), 1);
    assert_eq!(app.route(), Route::Home);
}
