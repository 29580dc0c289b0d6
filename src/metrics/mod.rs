//! Basic metrics instrumentation for the intake pipeline.
//!
//! Counters for extraction and merge outcomes plus HTTP traffic to the
//! profile service. Cheap to clone and share; all counters are atomic.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Metrics collector for the intake pipeline.
#[derive(Debug, Clone)]
pub struct Metrics {
    /// Messages scanned for contact info
    messages_processed_total: Arc<AtomicU64>,

    /// Messages in which an email candidate was found
    emails_extracted_total: Arc<AtomicU64>,

    /// Messages in which a phone candidate was found
    phones_extracted_total: Arc<AtomicU64>,

    /// Merges durably applied
    merges_saved_total: Arc<AtomicU64>,

    /// Merges rejected by the store's constraints
    merges_rejected_total: Arc<AtomicU64>,

    /// Merges abandoned after transient-failure retries
    merges_failed_total: Arc<AtomicU64>,

    /// Read-back mismatches between requested and stored fields
    merge_anomalies_total: Arc<AtomicU64>,

    /// Total number of HTTP requests made
    http_requests_total: Arc<AtomicU64>,

    /// Total number of HTTP errors
    http_errors_total: Arc<AtomicU64>,

    /// Total duration of all HTTP requests in milliseconds
    http_duration_total_ms: Arc<AtomicU64>,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    /// Create a new metrics collector.
    pub fn new() -> Self {
        Self {
            messages_processed_total: Arc::new(AtomicU64::new(0)),
            emails_extracted_total: Arc::new(AtomicU64::new(0)),
            phones_extracted_total: Arc::new(AtomicU64::new(0)),
            merges_saved_total: Arc::new(AtomicU64::new(0)),
            merges_rejected_total: Arc::new(AtomicU64::new(0)),
            merges_failed_total: Arc::new(AtomicU64::new(0)),
            merge_anomalies_total: Arc::new(AtomicU64::new(0)),
            http_requests_total: Arc::new(AtomicU64::new(0)),
            http_errors_total: Arc::new(AtomicU64::new(0)),
            http_duration_total_ms: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Record one scanned message and which candidate fields it yielded.
    pub fn record_message(&self, email_found: bool, phone_found: bool) {
        self.messages_processed_total.fetch_add(1, Ordering::Relaxed);
        if email_found {
            self.emails_extracted_total.fetch_add(1, Ordering::Relaxed);
        }
        if phone_found {
            self.phones_extracted_total.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Record a durably applied merge.
    pub fn record_merge_saved(&self) {
        self.merges_saved_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a store-rejected merge.
    pub fn record_merge_rejected(&self) {
        self.merges_rejected_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a merge abandoned after retry exhaustion.
    pub fn record_merge_failed(&self) {
        self.merges_failed_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a read-back consistency anomaly.
    pub fn record_merge_anomaly(&self) {
        self.merge_anomalies_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Record an HTTP request and its duration.
    pub fn record_http_request(&self, duration: Duration) {
        self.http_requests_total.fetch_add(1, Ordering::Relaxed);
        self.http_duration_total_ms
            .fetch_add(duration.as_millis() as u64, Ordering::Relaxed);
    }

    /// Record an HTTP error.
    pub fn record_http_error(&self) {
        self.http_errors_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Take a point-in-time snapshot of all counters.
    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            messages_processed: self.messages_processed_total.load(Ordering::Relaxed),
            emails_extracted: self.emails_extracted_total.load(Ordering::Relaxed),
            phones_extracted: self.phones_extracted_total.load(Ordering::Relaxed),
            merges_saved: self.merges_saved_total.load(Ordering::Relaxed),
            merges_rejected: self.merges_rejected_total.load(Ordering::Relaxed),
            merges_failed: self.merges_failed_total.load(Ordering::Relaxed),
            merge_anomalies: self.merge_anomalies_total.load(Ordering::Relaxed),
            http_requests: self.http_requests_total.load(Ordering::Relaxed),
            http_errors: self.http_errors_total.load(Ordering::Relaxed),
        }
    }
}

/// A point-in-time snapshot of the pipeline counters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricsSummary {
    pub messages_processed: u64,
    pub emails_extracted: u64,
    pub phones_extracted: u64,
    pub merges_saved: u64,
    pub merges_rejected: u64,
    pub merges_failed: u64,
    pub merge_anomalies: u64,
    pub http_requests: u64,
    pub http_errors: u64,
}
