//! Test doubles for the tracker's collaborators.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tracker_core::error::{FetchError, NotifyError, StoreError};
use tracker_core::traits::{HistoryStore, Notifier, PageFetcher, PriceExtractor, ReportLevel, Reporter};
use tracker_core::types::{Observation, Price, ProductRef};
use tracker_data::MemoryHistoryStore;

use crate::Tracker;

pub const PRODUCT_URL: &str = "https://shop.example/p/macbook-air";

/// Serves scripted page bodies; `None` is a connection failure. Repeats the
/// last entry once the script runs out.
pub struct ScriptedFetcher {
    pages: Mutex<VecDeque<Option<String>>>,
    last: Mutex<Option<String>>,
    pub calls: AtomicUsize,
}

impl ScriptedFetcher {
    pub fn new(pages: &[Option<&str>]) -> Self {
        Self {
            pages: Mutex::new(pages.iter().map(|p| p.map(str::to_string)).collect()),
            last: Mutex::new(None),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn always(page: &str) -> Self {
        Self::new(&[Some(page)])
    }
}

#[async_trait]
impl PageFetcher for ScriptedFetcher {
    async fn fetch(&self, _product: &ProductRef) -> Result<String, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let next = self.pages.lock().unwrap().pop_front();
        let page = match next {
            Some(page) => {
                *self.last.lock().unwrap() = page.clone();
                page
            }
            None => self.last.lock().unwrap().clone(),
        };
        page.ok_or_else(|| FetchError::Connection("connection refused".to_string()))
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

/// Treats the whole page body as price text.
pub struct PlainExtractor;

impl PriceExtractor for PlainExtractor {
    fn extract(&self, content: &str) -> Option<Price> {
        Price::parse(content)
    }

    fn name(&self) -> &str {
        "plain"
    }
}

/// Records every alert, optionally failing or panicking on delivery.
#[derive(Default)]
pub struct RecordingNotifier {
    pub alerts: Mutex<Vec<(Price, String)>>,
    pub fail: bool,
    pub panic: bool,
}

impl RecordingNotifier {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn panicking() -> Self {
        Self {
            panic: true,
            ..Self::default()
        }
    }

    pub fn prices(&self) -> Vec<Price> {
        self.alerts.lock().unwrap().iter().map(|(p, _)| *p).collect()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, price: Price, product: &ProductRef) -> Result<(), NotifyError> {
        if self.panic {
            panic!("smtp client exploded");
        }
        self.alerts.lock().unwrap().push((price, product.to_string()));
        if self.fail {
            return Err(NotifyError::Authentication("535 bad credentials".to_string()));
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "recording"
    }
}

/// History that cannot be written, and optionally cannot be read either.
pub struct BrokenStore {
    pub unreadable: bool,
    pub append_attempts: AtomicUsize,
}

impl BrokenStore {
    pub fn write_only_failure() -> Self {
        Self {
            unreadable: false,
            append_attempts: AtomicUsize::new(0),
        }
    }

    pub fn corrupted() -> Self {
        Self {
            unreadable: true,
            append_attempts: AtomicUsize::new(0),
        }
    }
}

impl HistoryStore for BrokenStore {
    fn append(&self, _price: Price) -> Result<Observation, StoreError> {
        self.append_attempts.fetch_add(1, Ordering::SeqCst);
        Err(StoreError::Write("disk full".to_string()))
    }

    fn latest(&self) -> Result<Option<Observation>, StoreError> {
        if self.unreadable {
            Err(StoreError::Malformed {
                line: 2,
                reason: "invalid price format: \"N/A\"".to_string(),
            })
        } else {
            Ok(None)
        }
    }

    fn observations(&self) -> Result<Vec<Observation>, StoreError> {
        Ok(Vec::new())
    }
}

/// Keeps every report for later inspection.
#[derive(Default)]
pub struct CapturingReporter {
    pub messages: Mutex<Vec<(ReportLevel, String)>>,
}

impl CapturingReporter {
    pub fn at(&self, level: ReportLevel) -> Vec<String> {
        self.messages
            .lock()
            .unwrap()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.clone())
            .collect()
    }
}

impl Reporter for CapturingReporter {
    fn report(&self, level: ReportLevel, message: &str) {
        self.messages.lock().unwrap().push((level, message.to_string()));
    }
}

/// Handles to a tracker's collaborators.
pub struct Harness {
    pub tracker: Tracker,
    pub fetcher: Arc<ScriptedFetcher>,
    pub notifier: Arc<RecordingNotifier>,
    pub reporter: Arc<CapturingReporter>,
}

pub fn harness(
    fetcher: ScriptedFetcher,
    history: Arc<dyn HistoryStore>,
    notifier: RecordingNotifier,
) -> Harness {
    let fetcher = Arc::new(fetcher);
    let notifier = Arc::new(notifier);
    let reporter = Arc::new(CapturingReporter::default());

    let tracker = Tracker::new(
        ProductRef::new(PRODUCT_URL),
        fetcher.clone(),
        Arc::new(PlainExtractor),
        history,
        notifier.clone(),
        reporter.clone(),
    );

    Harness {
        tracker,
        fetcher,
        notifier,
        reporter,
    }
}

pub fn memory_store(prices: &[Price]) -> Arc<MemoryHistoryStore> {
    Arc::new(MemoryHistoryStore::with_observations(
        prices.iter().map(|p| Observation::now(*p)).collect(),
    ))
}
