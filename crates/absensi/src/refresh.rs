//! Periodic refresh for open screens.
//!
//! A live clock ticks every second and dashboards refetch every thirty
//! seconds while they are visible. Each timer owns one Tokio task that is
//! aborted when the timer is cancelled or dropped.

use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::config::RefreshSettings;

pub struct RefreshTimer {
    period: Duration,
    handle: JoinHandle<()>,
}

impl RefreshTimer {
    /// Calls `tick` every `period`, starting one period from now. Must be
    /// called inside a Tokio runtime.
    pub fn start<F, Fut>(period: Duration, mut tick: F) -> Self
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            interval.tick().await; // skip immediate first tick

            loop {
                interval.tick().await;
                tick().await;
            }
        });

        log::debug!("Refresh timer started with period {:?}", period);
        Self { period, handle }
    }

    /// One-second clock tick from settings.
    pub fn clock<F, Fut>(settings: &RefreshSettings, tick: F) -> Self
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        Self::start(settings.clock_tick(), tick)
    }

    /// Dashboard refetch timer from settings.
    pub fn dashboard<F, Fut>(settings: &RefreshSettings, tick: F) -> Self
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        Self::start(settings.dashboard_refresh(), tick)
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }

    /// Stops the timer. A tick already in progress is aborted at its next
    /// await point.
    pub fn cancel(self) {
        drop(self);
    }
}

impl Drop for RefreshTimer {
    fn drop(&mut self) {
        self.handle.abort();
        log::debug!("Refresh timer with period {:?} stopped", self.period);
    }
}
