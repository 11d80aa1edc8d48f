//! Runtime bridge - connects sync TUI thread with async Tokio runtime
//!
//! The TUI thread never blocks on the network: it sends `RuntimeCommand`s to a
//! worker running on its own Tokio runtime and drains `RuntimeEvent`s once per
//! loop iteration.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use tokio::runtime::Builder;
use tokio::sync::mpsc::{unbounded_channel, UnboundedSender};
use tracing::info;

use crate::core::{MountId, Outcome, Request};
use crate::infrastructure::ledger::LedgerApi;
use crate::infrastructure::runtime::worker::run_async_worker;

/// Commands sent from the TUI to the async worker
#[derive(Debug, Clone)]
pub enum RuntimeCommand {
    /// Run a backend request on behalf of a mounted view
    Dispatch { mount: MountId, request: Request },
    /// The view is gone: abort its in-flight fetches
    Unmount { mount: MountId },
    /// Shutdown the worker
    Shutdown,
}

/// Events sent from the async worker to the TUI
#[derive(Debug)]
pub enum RuntimeEvent {
    /// A dispatched request finished
    Completed {
        mount: MountId,
        request: Request,
        outcome: Outcome,
    },
}

/// Bridge between sync TUI thread and async Tokio runtime
pub struct RuntimeBridge {
    cmd_tx: UnboundedSender<RuntimeCommand>,
    evt_rx: Receiver<RuntimeEvent>,
}

impl RuntimeBridge {
    /// Start the worker thread with its own Tokio runtime
    pub fn new(ledger: Arc<dyn LedgerApi>) -> anyhow::Result<Self> {
        let (cmd_tx, cmd_rx) = unbounded_channel::<RuntimeCommand>();
        let (evt_tx, evt_rx) = mpsc::channel::<RuntimeEvent>();

        let runtime = Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("pychain-runtime")
            .enable_all()
            .build()?;

        info!(endpoint = %ledger.endpoint_name(), "starting ledger worker");
        thread::Builder::new()
            .name("pychain-worker".to_string())
            .spawn(move || runtime.block_on(run_async_worker(ledger, cmd_rx, evt_tx)))?;

        Ok(Self { cmd_tx, evt_rx })
    }

    /// Send a command to the async worker
    pub fn send(&self, cmd: RuntimeCommand) -> anyhow::Result<()> {
        self.cmd_tx
            .send(cmd)
            .map_err(|_| anyhow::anyhow!("Worker channel closed"))
    }

    /// Poll for events (non-blocking)
    pub fn poll_events(&self) -> Vec<RuntimeEvent> {
        let mut events = Vec::new();
        while let Ok(evt) = self.evt_rx.try_recv() {
            events.push(evt);
        }
        events
    }

    /// Wait up to `timeout` for the next event
    pub fn recv_timeout(&self, timeout: Duration) -> Option<RuntimeEvent> {
        match self.evt_rx.recv_timeout(timeout) {
            Ok(evt) => Some(evt),
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => None,
        }
    }
}

impl Drop for RuntimeBridge {
    fn drop(&mut self) {
        let _ = self.cmd_tx.send(RuntimeCommand::Shutdown);
    }
}
