use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use import_logging::{import_error, import_warn};

use crate::context::ExecutionContext;
use crate::fetch::{FetchSettings, Fetcher, ReqwestFetcher};
use crate::pipeline::import_from_url;
use crate::{ImportEvent, JobId};

/// Runs imports on a background runtime so a synchronous host can fire them
/// and poll for results. Jobs run concurrently and are not deduplicated.
pub struct ImportHandle {
    job_tx: mpsc::Sender<(JobId, String)>,
    event_rx: mpsc::Receiver<ImportEvent>,
}

impl ImportHandle {
    pub fn new(settings: FetchSettings, context: Arc<dyn ExecutionContext>) -> Self {
        Self::with_fetcher(Arc::new(ReqwestFetcher::new(settings, context)))
    }

    pub fn with_fetcher(fetcher: Arc<dyn Fetcher>) -> Self {
        let (job_tx, job_rx) = mpsc::channel::<(JobId, String)>();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = match tokio::runtime::Runtime::new() {
                Ok(runtime) => runtime,
                Err(err) => {
                    import_error!("Failed to start import runtime: {}", err);
                    return;
                }
            };
            while let Ok((job_id, url)) = job_rx.recv() {
                let fetcher = fetcher.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    let result = import_from_url(fetcher.as_ref(), &url).await;
                    let _ = event_tx.send(ImportEvent::Completed {
                        job_id,
                        url,
                        result,
                    });
                });
            }
        });

        Self { job_tx, event_rx }
    }

    /// Queues an import. Returns `false` when the worker is gone and the job
    /// was dropped.
    pub fn enqueue(&self, job_id: JobId, url: impl Into<String>) -> bool {
        let url = url.into();
        match self.job_tx.send((job_id, url)) {
            Ok(()) => true,
            Err(mpsc::SendError((job_id, url))) => {
                import_warn!("Import worker stopped, dropping job {} ({})", job_id, url);
                false
            }
        }
    }

    pub fn try_recv(&self) -> Option<ImportEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<ImportEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}
