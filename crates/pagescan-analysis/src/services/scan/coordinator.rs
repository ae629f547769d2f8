//! Concurrent per-page OCR.
//!
//! Every page gets its own task. Tasks wait on a semaphore sized by the
//! worker count, run the engine on a blocking thread, and send the resolved
//! page back over a channel. A single collecting loop owns the [`OcrRun`]
//! and finishes once every page has reported, in whatever order they arrive.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, Semaphore};
use tracing::{debug, error, info, warn};

use pagescan::config::{OcrConfig, DEFAULT_OCR_WORKERS, DEFAULT_PAGE_TIMEOUT_SECS};
use pagescan::{OcrRun, PageFailure, PageOcrResult, ScanError, SortedPageResults};

use super::types::ScanEvent;
use crate::ocr::{OcrEngine, OcrError, PageImage, RecognitionOptions};

/// Runs an OCR engine over all pages of a scan concurrently.
#[derive(Clone)]
pub struct OcrCoordinator {
    engine: Arc<dyn OcrEngine>,
    options: RecognitionOptions,
    workers: usize,
    page_timeout: Option<Duration>,
}

impl OcrCoordinator {
    /// Create a coordinator with default options.
    pub fn new(engine: Arc<dyn OcrEngine>) -> Self {
        Self {
            engine,
            options: RecognitionOptions::default(),
            workers: DEFAULT_OCR_WORKERS,
            page_timeout: Some(Duration::from_secs(DEFAULT_PAGE_TIMEOUT_SECS)),
        }
    }

    pub fn from_config(engine: Arc<dyn OcrEngine>, config: &OcrConfig) -> Self {
        Self {
            engine,
            options: RecognitionOptions::from(config),
            workers: config.effective_workers(),
            page_timeout: config.page_timeout(),
        }
    }

    /// Maximum pages recognized at once. Clamped to at least 1.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    /// Per-page timeout; `None` waits indefinitely.
    pub fn with_page_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.page_timeout = timeout;
        self
    }

    /// Recognize every page and return the results in original page order.
    ///
    /// Per-page failures never abort the run; the page resolves with
    /// sentinel text instead. The only error is an empty page list.
    pub async fn run(
        &self,
        pages: Vec<PageImage>,
        events: Option<mpsc::Sender<ScanEvent>>,
    ) -> Result<SortedPageResults, ScanError> {
        let mut run = OcrRun::new(pages.len())?;
        let total_pages = run.page_count();

        info!(
            "Starting OCR run: {} pages, {} workers, engine {}",
            total_pages,
            self.workers,
            self.engine.engine_type()
        );
        emit(
            &events,
            ScanEvent::RunStarted {
                total_pages,
                workers: self.workers,
            },
        )
        .await;

        let semaphore = Arc::new(Semaphore::new(self.workers));
        let (result_tx, mut result_rx) = mpsc::channel::<PageOcrResult>(total_pages);

        for (index, image) in pages.into_iter().enumerate() {
            let task = PageTask {
                index,
                image,
                engine: self.engine.clone(),
                options: self.options.clone(),
                semaphore: semaphore.clone(),
                page_timeout: self.page_timeout,
                events: events.clone(),
            };
            let result_tx = result_tx.clone();
            tokio::spawn(async move {
                let result = task.recognize().await;
                let _ = result_tx.send(result).await;
            });
        }
        drop(result_tx);

        while let Some(result) = result_rx.recv().await {
            let index = result.original_index();
            if run.record(result) {
                debug!("Page {} resolved the run", index);
                break;
            }
        }

        // Tasks that vanished without reporting (runtime shutdown) still
        // resolve their page so the run can complete.
        for index in run.pending_indices() {
            warn!("Page {} produced no result, marking as failed", index);
            run.record(PageOcrResult::failed(
                index,
                PageFailure::Recognition("worker exited without a result".to_string()),
            ));
        }

        let results = run.into_sorted()?;
        let failed = results.iter().filter(|page| page.is_failed()).count();
        info!("OCR run complete: {} pages, {} failed", total_pages, failed);
        emit(&events, ScanEvent::OcrCompleted { failed }).await;

        Ok(results)
    }
}

/// One page's unit of work.
struct PageTask {
    index: usize,
    image: PageImage,
    engine: Arc<dyn OcrEngine>,
    options: RecognitionOptions,
    semaphore: Arc<Semaphore>,
    page_timeout: Option<Duration>,
    events: Option<mpsc::Sender<ScanEvent>>,
}

impl PageTask {
    async fn recognize(self) -> PageOcrResult {
        let PageTask {
            index,
            image,
            engine,
            options,
            semaphore,
            page_timeout,
            events,
        } = self;

        let permit = match semaphore.acquire_owned().await {
            Ok(permit) => permit,
            Err(_) => {
                return PageOcrResult::failed(
                    index,
                    PageFailure::Recognition("worker pool closed".to_string()),
                );
            }
        };

        emit(&events, ScanEvent::PageStarted { index }).await;
        let label = image.label();
        debug!("OCR page {} ({})", index, label);

        // The permit moves into the blocking call so an abandoned engine call
        // still occupies its worker slot until it returns.
        let options = RecognitionOptions {
            deadline: page_timeout,
            ..options
        };
        let handle = tokio::task::spawn_blocking(move || {
            let _permit = permit;
            engine.recognize(&image, &options)
        });

        let joined = match page_timeout {
            Some(limit) => match tokio::time::timeout(limit, handle).await {
                Ok(joined) => joined,
                Err(_) => {
                    // The engine call may still be running; its result is discarded.
                    warn!("OCR timed out for page {} ({}) after {:?}", index, label, limit);
                    let result = PageOcrResult::failed(index, PageFailure::TimedOut(limit));
                    report(&events, &result).await;
                    return result;
                }
            },
            None => handle.await,
        };

        let result = match joined {
            Ok(Ok(fragments)) if fragments.is_empty() => {
                warn!("OCR returned no text for page {} ({})", index, label);
                PageOcrResult::failed(index, OcrError::NoText.into_page_failure())
            }
            Ok(Ok(fragments)) => PageOcrResult::from_fragments(index, &fragments),
            Ok(Err(e)) => {
                warn!("OCR failed for page {} ({}): {}", index, label, e);
                PageOcrResult::failed(index, e.into_page_failure())
            }
            Err(e) => {
                error!("OCR worker for page {} ({}) panicked: {}", index, label, e);
                PageOcrResult::failed(
                    index,
                    PageFailure::Recognition("worker panicked".to_string()),
                )
            }
        };

        report(&events, &result).await;
        result
    }
}

async fn report(events: &Option<mpsc::Sender<ScanEvent>>, result: &PageOcrResult) {
    let index = result.original_index();
    let event = match result.failure() {
        Some(failure) => ScanEvent::PageFailed {
            index,
            error: failure.to_string(),
        },
        None => ScanEvent::PageCompleted {
            index,
            confidence: result.confidence(),
        },
    };
    emit(events, event).await;
}

async fn emit(events: &Option<mpsc::Sender<ScanEvent>>, event: ScanEvent) {
    if let Some(tx) = events {
        let _ = tx.send(event).await;
    }
}
