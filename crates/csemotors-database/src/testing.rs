//! A recording, scriptable executor for exercising repositories without a
//! database.

use std::any::Any;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;

use csemotors_core::error::AppError;
use csemotors_core::result::AppResult;
use csemotors_core::traits::{RowFetcher, StatementExecutor};
use csemotors_core::types::SqlValue;

/// Which trait method a recorded call went through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallKind {
    Count,
    Rows,
    Execute,
}

/// One statement the executor was asked to run.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub kind: CallKind,
    pub sql: String,
    pub params: Vec<SqlValue>,
}

type ExecuteFn = dyn Fn(&str, &[SqlValue]) -> AppResult<u64> + Send + Sync;
type QueuedRows = AppResult<Box<dyn Any + Send>>;

#[derive(Default)]
struct FakeState {
    calls: Vec<RecordedCall>,
    counts: VecDeque<AppResult<i64>>,
    rows: VecDeque<QueuedRows>,
}

/// Records every statement and answers from queued results.
///
/// Counts and row sets are consumed in FIFO order; an empty count queue
/// answers `0` and an empty row queue answers no rows. `execute` answers
/// `Ok(1)` unless a handler is installed with [`FakeExecutor::on_execute`].
/// Clones share state.
#[derive(Clone, Default)]
pub struct FakeExecutor {
    state: Arc<Mutex<FakeState>>,
    execute_fn: Option<Arc<ExecuteFn>>,
    execute_delay: Option<Duration>,
    in_flight: Arc<AtomicUsize>,
    peak_in_flight: Arc<AtomicUsize>,
}

impl std::fmt::Debug for FakeExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FakeExecutor")
            .field("calls", &self.lock().calls.len())
            .finish()
    }
}

impl FakeExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `execute` calls with `handler`.
    pub fn on_execute<F>(mut self, handler: F) -> Self
    where
        F: Fn(&str, &[SqlValue]) -> AppResult<u64> + Send + Sync + 'static,
    {
        self.execute_fn = Some(Arc::new(handler));
        self
    }

    /// Make every `execute` sleep for `delay` before answering.
    pub fn with_execute_delay(mut self, delay: Duration) -> Self {
        self.execute_delay = Some(delay);
        self
    }

    /// Most `execute` calls that were running at the same time.
    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }

    /// Queue the result of the next `fetch_count`.
    pub fn push_count(&self, count: i64) {
        self.lock().counts.push_back(Ok(count));
    }

    /// Queue a failure for the next `fetch_count`.
    pub fn push_count_error(&self, err: AppError) {
        self.lock().counts.push_back(Err(err));
    }

    /// Queue the rows of the next `fetch_rows`.
    pub fn push_rows<R: Send + 'static>(&self, rows: Vec<R>) {
        self.lock().rows.push_back(Ok(Box::new(rows)));
    }

    /// Queue a failure for the next `fetch_rows`.
    pub fn push_rows_error(&self, err: AppError) {
        self.lock().rows.push_back(Err(err));
    }

    /// Every call so far, in order.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.lock().calls.clone()
    }

    pub fn call_count(&self) -> usize {
        self.lock().calls.len()
    }

    fn lock(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn record(&self, kind: CallKind, sql: &str, params: &[SqlValue]) {
        self.lock().calls.push(RecordedCall {
            kind,
            sql: sql.to_string(),
            params: params.to_vec(),
        });
    }
}

#[async_trait]
impl StatementExecutor for FakeExecutor {
    async fn fetch_count(&self, sql: &str, params: &[SqlValue]) -> AppResult<i64> {
        self.record(CallKind::Count, sql, params);
        self.lock().counts.pop_front().unwrap_or(Ok(0))
    }

    async fn execute(&self, sql: &str, params: &[SqlValue]) -> AppResult<u64> {
        self.record(CallKind::Execute, sql, params);
        if let Some(delay) = self.execute_delay {
            let running = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak_in_flight.fetch_max(running, Ordering::SeqCst);
            tokio::time::sleep(delay).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
        }
        match &self.execute_fn {
            Some(handler) => handler(sql, params),
            None => Ok(1),
        }
    }
}

#[async_trait]
impl<R> RowFetcher<R> for FakeExecutor
where
    R: Send + 'static,
{
    async fn fetch_rows(&self, sql: &str, params: &[SqlValue]) -> AppResult<Vec<R>> {
        self.record(CallKind::Rows, sql, params);
        let queued = self.lock().rows.pop_front();
        match queued {
            None => Ok(Vec::new()),
            Some(Err(err)) => Err(err),
            Some(Ok(rows)) => rows.downcast::<Vec<R>>().map(|rows| *rows).map_err(|_| {
                AppError::internal(format!(
                    "queued rows are not a Vec<{}>",
                    std::any::type_name::<R>()
                ))
            }),
        }
    }
}
