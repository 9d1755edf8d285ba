//! Rotating fact banner with its progress bar.
//!
//! Two independent interval tasks share one cancellation token, so disposing
//! the banner (or dropping it) stops both at once.

use std::{sync::Arc, time::Duration};

use parking_lot::Mutex;
use tokio::{
    task::JoinHandle,
    time::{Instant, MissedTickBehavior, interval_at},
};
use tokio_util::sync::CancellationToken;

use crate::config::BannerConfig;

const PROGRESS_MAX: u8 = 100;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BannerState {
    pub fact_index: usize,
    /// Percent, 0..=100.
    pub progress: u8,
}

#[derive(Debug)]
pub struct Banner {
    facts: Arc<[String]>,
    state: Arc<Mutex<BannerState>>,
    cancel: CancellationToken,
    tasks: Vec<JoinHandle<()>>,
}

impl Banner {
    /// Spawn both timers on the current tokio runtime.
    pub fn start(config: &BannerConfig) -> Self {
        let facts: Arc<[String]> = config.facts.clone().into();
        let state = Arc::new(Mutex::new(BannerState::default()));
        let cancel = CancellationToken::new();
        let now = Instant::now();

        let fact_task = tokio::spawn(rotate_facts(
            Arc::clone(&state),
            facts.len(),
            now,
            config.fact_interval(),
            cancel.clone(),
        ));
        let progress_task = tokio::spawn(advance_progress(
            Arc::clone(&state),
            config.progress_step,
            now,
            config.progress_interval(),
            cancel.clone(),
        ));

        tracing::debug!(facts = facts.len(), "banner started");

        Self {
            facts,
            state,
            cancel,
            tasks: vec![fact_task, progress_task],
        }
    }

    pub fn state(&self) -> BannerState {
        *self.state.lock()
    }

    pub fn current_fact(&self) -> Option<&str> {
        let index = self.state.lock().fact_index;
        self.facts.get(index).map(String::as_str)
    }

    /// Stop both timers. The last state stays readable.
    pub fn dispose(&self) {
        if !self.cancel.is_cancelled() {
            tracing::debug!("banner disposed");
        }
        self.cancel.cancel();
    }

    pub fn is_disposed(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// True once both timer tasks have exited.
    pub fn is_stopped(&self) -> bool {
        self.tasks.iter().all(JoinHandle::is_finished)
    }
}

impl Drop for Banner {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

async fn rotate_facts(
    state: Arc<Mutex<BannerState>>,
    fact_count: usize,
    start: Instant,
    period: Duration,
    cancel: CancellationToken,
) {
    let mut ticker = interval_at(start + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = ticker.tick() => {
                if fact_count == 0 {
                    continue;
                }
                let mut s = state.lock();
                s.fact_index = (s.fact_index + 1) % fact_count;
                s.progress = 0;
            }
        }
    }
}

async fn advance_progress(
    state: Arc<Mutex<BannerState>>,
    step: u8,
    start: Instant,
    period: Duration,
    cancel: CancellationToken,
) {
    let mut ticker = interval_at(start + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = ticker.tick() => {
                let mut s = state.lock();
                s.progress = s.progress.saturating_add(step).min(PROGRESS_MAX);
            }
        }
    }
}
