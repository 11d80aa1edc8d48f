//! Async worker - runs in Tokio runtime and executes backend requests

use std::collections::HashMap;
use std::sync::mpsc::Sender;
use std::sync::Arc;

use tokio::sync::mpsc::UnboundedReceiver;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::core::{MountId, Outcome, Payload, Request, Resource, Submission};
use crate::infrastructure::ledger::LedgerApi;
use crate::infrastructure::runtime::bridge::{RuntimeCommand, RuntimeEvent};

/// Run the async worker loop until shutdown or until the TUI side hangs up
pub async fn run_async_worker(
    ledger: Arc<dyn LedgerApi>,
    mut cmd_rx: UnboundedReceiver<RuntimeCommand>,
    evt_tx: Sender<RuntimeEvent>,
) {
    let mut in_flight: HashMap<MountId, Vec<JoinHandle<()>>> = HashMap::new();

    while let Some(cmd) = cmd_rx.recv().await {
        in_flight.retain(|_, handles| {
            handles.retain(|handle| !handle.is_finished());
            !handles.is_empty()
        });

        match cmd {
            RuntimeCommand::Shutdown => break,

            RuntimeCommand::Dispatch { mount, request } => {
                // Submissions are writes the user asked for: they outlive the view
                let abortable = matches!(request, Request::Fetch(_));
                let ledger = Arc::clone(&ledger);
                let evt_tx = evt_tx.clone();
                let handle = tokio::spawn(async move {
                    let outcome = execute(ledger.as_ref(), &request).await;
                    match &outcome {
                        Ok(_) => debug!(%mount, ?request, "request completed"),
                        Err(err) => warn!(%mount, ?request, error = %err, "request failed"),
                    }
                    let _ = evt_tx.send(RuntimeEvent::Completed {
                        mount,
                        request,
                        outcome,
                    });
                });
                if abortable {
                    in_flight.entry(mount).or_default().push(handle);
                }
            }

            RuntimeCommand::Unmount { mount } => {
                if let Some(handles) = in_flight.remove(&mount) {
                    debug!(%mount, aborted = handles.len(), "aborting fetches of unmounted view");
                    for handle in handles {
                        handle.abort();
                    }
                }
            }
        }
    }

    for handle in in_flight.into_values().flatten() {
        handle.abort();
    }
    debug!("runtime worker stopped");
}

/// Perform one request against the ledger
pub async fn execute(ledger: &dyn LedgerApi, request: &Request) -> Outcome {
    match request {
        Request::Fetch(Resource::WalletInfo) => ledger.wallet_info().await.map(Payload::WalletInfo),
        Request::Fetch(Resource::Chain) => ledger.chain().await.map(Payload::Chain),
        Request::Fetch(Resource::Pool) => ledger.pool().await.map(Payload::Pool),
        Request::Submit(Submission::Transact(body)) => {
            ledger.transact(body.clone()).await.map(Payload::Transacted)
        }
        Request::Submit(Submission::Mine) => ledger.mine().await.map(Payload::Mined),
    }
}
