//! Analysis service lifecycle
//!
//! The language service is created on first use and torn down after a period without
//! requests or when settings change. The lifecycle is explicit:
//!
//! ```text
//! Unstarted --acquire--> Active --idle timeout--> IdleExpired --acquire--> Active
//!                          |
//!                          +--restart--> Unstarted
//! ```

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;

use crate::css::analyzer::StylesheetAnalyzer;
use crate::styled::service::StyledLanguageService;

/// How often idle workers are checked
pub const REAP_INTERVAL: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerState {
    Unstarted,
    Active,
    IdleExpired,
}

type AnalyzerFactory<A> = Box<dyn Fn() -> A + Send + Sync>;

struct WorkerInner<A> {
    state: WorkerState,
    service: Option<Arc<StyledLanguageService<A>>>,
    last_used: Instant,
    idle_timeout: Duration,
    factory: AnalyzerFactory<A>,
}

/// Owns the lazily created language service
pub struct ServiceWorker<A> {
    inner: Mutex<WorkerInner<A>>,
}

impl<A: StylesheetAnalyzer + 'static> ServiceWorker<A> {
    pub fn new(factory: impl Fn() -> A + Send + Sync + 'static, idle_timeout: Duration) -> Self {
        Self {
            inner: Mutex::new(WorkerInner {
                state: WorkerState::Unstarted,
                service: None,
                last_used: Instant::now(),
                idle_timeout,
                factory: Box::new(factory),
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, WorkerInner<A>> {
        // The guarded data stays consistent even if a holder panicked
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn state(&self) -> WorkerState {
        self.lock().state
    }

    /// The running service, created if needed
    pub fn acquire(&self) -> Arc<StyledLanguageService<A>> {
        let mut inner = self.lock();
        inner.last_used = Instant::now();

        if let Some(service) = &inner.service {
            return Arc::clone(service);
        }

        log::info!("Starting analysis service (was {:?})", inner.state);
        let service = Arc::new(StyledLanguageService::new((inner.factory)()));
        inner.service = Some(Arc::clone(&service));
        inner.state = WorkerState::Active;
        service
    }

    /// Tear the service down if it has been idle for the timeout, returns whether it was
    pub fn reap_idle(&self, now: Instant) -> bool {
        let mut inner = self.lock();
        if inner.state != WorkerState::Active
            || now.saturating_duration_since(inner.last_used) < inner.idle_timeout
        {
            return false;
        }

        log::info!("Stopping idle analysis service");
        inner.service = None;
        inner.state = WorkerState::IdleExpired;
        true
    }

    /// Tear the service down and build future ones with `factory`
    pub fn restart(&self, factory: impl Fn() -> A + Send + Sync + 'static, idle_timeout: Duration) {
        let mut inner = self.lock();
        if inner.service.take().is_some() {
            log::info!("Restarting analysis service");
        }
        inner.factory = Box::new(factory);
        inner.idle_timeout = idle_timeout;
        inner.state = WorkerState::Unstarted;
    }

    /// Periodically reap the worker while the returned task runs
    pub fn spawn_reaper(self: &Arc<Self>) -> JoinHandle<()> {
        let worker = Arc::clone(self);
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(REAP_INTERVAL);
            loop {
                interval.tick().await;
                worker.reap_idle(Instant::now());
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::css::analyzer::CssAnalyzer;
    use crate::css::diagnostics::LintOptions;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const TIMEOUT: Duration = Duration::from_secs(120);

    fn counting_worker(created: Arc<AtomicUsize>) -> ServiceWorker<CssAnalyzer> {
        ServiceWorker::new(
            move || {
                created.fetch_add(1, Ordering::SeqCst);
                CssAnalyzer::default()
            },
            TIMEOUT,
        )
    }

    #[test]
    fn test_service_is_created_lazily_once() {
        let created = Arc::new(AtomicUsize::new(0));
        let worker = counting_worker(Arc::clone(&created));
        assert_eq!(worker.state(), WorkerState::Unstarted);
        assert_eq!(created.load(Ordering::SeqCst), 0);

        let first = worker.acquire();
        let second = worker.acquire();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(worker.state(), WorkerState::Active);
        assert_eq!(created.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_idle_expiry_and_recreation() {
        let created = Arc::new(AtomicUsize::new(0));
        let worker = counting_worker(Arc::clone(&created));
        worker.acquire();

        assert!(!worker.reap_idle(Instant::now()));
        assert_eq!(worker.state(), WorkerState::Active);

        assert!(worker.reap_idle(Instant::now() + TIMEOUT + Duration::from_secs(1)));
        assert_eq!(worker.state(), WorkerState::IdleExpired);
        assert!(!worker.reap_idle(Instant::now() + TIMEOUT * 2));

        worker.acquire();
        assert_eq!(worker.state(), WorkerState::Active);
        assert_eq!(created.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_unstarted_worker_is_not_reaped() {
        let worker = counting_worker(Arc::new(AtomicUsize::new(0)));
        assert!(!worker.reap_idle(Instant::now() + TIMEOUT * 2));
        assert_eq!(worker.state(), WorkerState::Unstarted);
    }

    #[test]
    fn test_restart_uses_new_factory() {
        let created = Arc::new(AtomicUsize::new(0));
        let worker = counting_worker(Arc::clone(&created));
        let before = worker.acquire();

        worker.restart(
            || CssAnalyzer::new(LintOptions { unknown_properties: None }),
            Duration::from_secs(5),
        );
        assert_eq!(worker.state(), WorkerState::Unstarted);

        let after = worker.acquire();
        assert!(!Arc::ptr_eq(&before, &after));
        assert_eq!(created.load(Ordering::SeqCst), 1);
        assert!(worker.reap_idle(Instant::now() + Duration::from_secs(6)));
    }
}
