//! Background matching scheduler.
//!
//! One task, one ticker: every `pass_interval_ms` the scheduler locks
//! the ledger, runs a full matching pass, and releases the lock. Missed
//! ticks are delayed rather than bursted, so a slow pass shifts the
//! cadence instead of stacking passes. Shutdown is a watch signal; the
//! in-flight pass always completes before the task exits.

use chrono::Utc;
use intentswap_matchcore::{PassReport, run_pass};
use intentswap_types::{EngineConfig, PassId};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Duration, MissedTickBehavior};

use crate::SharedLedger;

/// The background matching loop, ready to be spawned.
pub struct Scheduler {
    ledger: SharedLedger,
    config: EngineConfig,
}

impl Scheduler {
    #[must_use]
    pub fn new(ledger: SharedLedger, config: EngineConfig) -> Self {
        Self { ledger, config }
    }

    /// Spawn the matching loop onto the current runtime. The first pass
    /// runs immediately, then one per interval.
    #[must_use]
    pub fn spawn(self) -> SchedulerHandle {
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
        let (report_tx, report_rx) = watch::channel(PassReport::default());

        let task = tokio::spawn(async move {
            let mut ticker =
                tokio::time::interval(Duration::from_millis(self.config.pass_interval_ms));
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let mut pass = PassId(0);

            tracing::info!(
                interval_ms = self.config.pass_interval_ms,
                peer = self.config.peer_matching,
                pool = self.config.pool_matching,
                "Scheduler started"
            );

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        pass = pass.next();
                        let report = {
                            let mut store = self.ledger.lock().await;
                            run_pass(&mut store, &self.config, pass, Utc::now())
                        };
                        if !report.supply_ok {
                            tracing::error!(pass = %pass, "Supply conservation violated, venue state suspect");
                        }
                        let _ = report_tx.send(report);
                    }
                    changed = shutdown_rx.changed() => {
                        if changed.is_err() || *shutdown_rx.borrow() {
                            tracing::info!(last_pass = %pass, "Scheduler stopping");
                            break;
                        }
                    }
                }
            }
        });

        SchedulerHandle {
            shutdown: shutdown_tx,
            reports: report_rx,
            task,
        }
    }
}

/// Handle to a running scheduler: observe pass reports, request shutdown.
pub struct SchedulerHandle {
    shutdown: watch::Sender<bool>,
    reports: watch::Receiver<PassReport>,
    task: JoinHandle<()>,
}

impl SchedulerHandle {
    /// The most recent completed pass report.
    #[must_use]
    pub fn last_report(&self) -> PassReport {
        *self.reports.borrow()
    }

    /// Wait until at least one more pass completes.
    pub async fn next_report(&mut self) -> PassReport {
        // The sender lives as long as the task; a closed channel just
        // means the scheduler already stopped.
        let _ = self.reports.changed().await;
        *self.reports.borrow_and_update()
    }

    /// Signal shutdown and wait for the in-flight pass to finish.
    pub async fn shutdown(self) {
        let _ = self.shutdown.send(true);
        if let Err(err) = self.task.await {
            tracing::error!(error = %err, "Scheduler task panicked");
        }
    }
}
