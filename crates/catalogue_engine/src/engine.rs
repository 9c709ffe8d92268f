use std::io;
use std::sync::{mpsc, Arc};
use std::thread;

use catalogue_logging::{catalogue_info, catalogue_warn};

use crate::fetch::{CollectionClient, CollectionSettings, ReqwestCollectionClient};
use crate::{EngineEvent, FetchError, PageRequest, RequestId};

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("failed to start async runtime: {0}")]
    Runtime(#[from] io::Error),
    #[error("failed to build collection client: {0}")]
    Client(#[from] FetchError),
}

enum EngineCommand {
    FetchPage {
        request_id: RequestId,
        request: PageRequest,
    },
}

/// Runs collection fetches on a background runtime.
///
/// Fetches are independent: nothing is cancelled when a newer one is
/// queued, and results come back in completion order.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: CollectionSettings) -> Result<Self, EngineError> {
        let client = ReqwestCollectionClient::new(settings)?;
        Self::with_client(Arc::new(client))
    }

    pub fn with_client(client: Arc<dyn CollectionClient>) -> Result<Self, EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("catalogue-engine")
            .enable_all()
            .build()?;

        thread::spawn(move || {
            while let Ok(command) = cmd_rx.recv() {
                let client = client.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(client.as_ref(), command, event_tx).await;
                });
            }
        });

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn fetch_page(&self, request_id: RequestId, request: PageRequest) {
        let _ = self
            .cmd_tx
            .send(EngineCommand::FetchPage { request_id, request });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }
}

async fn handle_command(
    client: &dyn CollectionClient,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::FetchPage {
            request_id,
            request,
        } => {
            let result = client.fetch_page(&request).await;
            match &result {
                Ok(page) => catalogue_info!(
                    "Fetched request_id={} page={} records={} total={}",
                    request_id,
                    request.page_number,
                    page.data.len(),
                    page.meta.total
                ),
                Err(err) => catalogue_warn!("Fetch failed request_id={}: {}", request_id, err),
            }
            let _ = event_tx.send(EngineEvent::PageFetched { request_id, result });
        }
    }
}
