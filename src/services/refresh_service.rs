// src/services/refresh_service.rs
// RefreshService owns the periodic poll of the backend.
// It gets its own thread so network calls never block the frame loop.
// Results flow back over a channel that the UI drains once per frame.

use std::{
    sync::{
        mpsc::{channel, Receiver, RecvTimeoutError, Sender},
        Arc,
    },
    thread::{self, JoinHandle},
    time::{Duration, Instant},
};

use super::api_client::DashboardSource;
use crate::models::{
    Conflict, OptimizationResult, ScenarioRequest, ScenarioResult, SystemMetrics, TrainStatus,
};

// How long stop() waits for a worker that is still inside a request
const SHUTDOWN_GRACE: Duration = Duration::from_millis(250);

/// A finished backend call. Errors are already rendered to text.
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardUpdate {
    Metrics(Result<SystemMetrics, String>),
    Trains(Result<Vec<TrainStatus>, String>),
    Conflicts(Result<Vec<Conflict>, String>),
    Optimization(Result<OptimizationResult, String>),
    Scenario(Result<ScenarioResult, String>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshScope {
    /// metrics, trains and conflicts
    All,
    /// trains and metrics, as the manual refresh button does
    Trains,
}

#[derive(Debug)]
enum Control {
    Refresh(RefreshScope),
    Optimize,
    Scenario(ScenarioRequest),
    Shutdown,
}

struct WorkerThread {
    thread_handle: JoinHandle<()>,
    control_sender: Sender<Control>,
}

pub struct RefreshService {
    worker: Option<WorkerThread>,
    update_receiver: Receiver<DashboardUpdate>,
    interval: Duration,
}

impl RefreshService {
    /// Spawns the worker. It polls once immediately, then every `interval`.
    pub fn start(source: Arc<dyn DashboardSource>, interval: Duration) -> Self {
        let (control_sender, control_receiver) = channel();
        let (update_sender, update_receiver) = channel();

        let thread_handle = thread::Builder::new()
            .name("railvis-refresh".to_string())
            .spawn(move || run_worker(source, interval, control_receiver, update_sender))
            .map_err(|e| log::error!("failed to spawn refresh worker: {}", e))
            .ok();

        let worker = thread_handle.map(|thread_handle| WorkerThread {
            thread_handle,
            control_sender,
        });

        log::info!("refresh service started, interval {:?}", interval);
        Self {
            worker,
            update_receiver,
            interval,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_running(&self) -> bool {
        self.worker.is_some()
    }

    /// Everything that arrived since the last call. Never blocks.
    pub fn take_updates(&self) -> Vec<DashboardUpdate> {
        self.update_receiver.try_iter().collect()
    }

    pub fn request_refresh(&self, scope: RefreshScope) {
        self.send(Control::Refresh(scope));
    }

    pub fn request_optimization(&self) {
        self.send(Control::Optimize);
    }

    pub fn request_scenario(&self, request: ScenarioRequest) {
        self.send(Control::Scenario(request));
    }

    fn send(&self, control: Control) {
        match &self.worker {
            Some(worker) => {
                if worker.control_sender.send(control).is_err() {
                    log::warn!("refresh worker is gone, request dropped");
                }
            }
            None => log::warn!("refresh service is stopped, request dropped"),
        }
    }

    /// Cancels the timer and joins the worker. Safe to call twice.
    ///
    /// A worker stuck in a slow request is detached after a short grace
    /// period; it exits on its own once the request returns.
    pub fn stop(&mut self) {
        if let Some(worker) = self.worker.take() {
            let _ = worker.control_sender.send(Control::Shutdown);

            let deadline = Instant::now() + SHUTDOWN_GRACE;
            while !worker.thread_handle.is_finished() && Instant::now() < deadline {
                thread::sleep(Duration::from_millis(5));
            }

            if worker.thread_handle.is_finished() {
                if worker.thread_handle.join().is_err() {
                    log::error!("refresh worker panicked");
                }
                log::info!("refresh service stopped");
            } else {
                log::warn!("refresh worker busy with a request, detaching it");
            }
        }
    }
}

impl Drop for RefreshService {
    fn drop(&mut self) {
        self.stop();
    }
}

fn run_worker(
    source: Arc<dyn DashboardSource>,
    interval: Duration,
    controls: Receiver<Control>,
    updates: Sender<DashboardUpdate>,
) {
    poll(source.as_ref(), RefreshScope::All, &updates);
    let mut next_poll = Instant::now() + interval;

    // Requests are served in between without moving the periodic deadline
    loop {
        let wait = next_poll.saturating_duration_since(Instant::now());
        match controls.recv_timeout(wait) {
            Err(RecvTimeoutError::Timeout) => {
                poll(source.as_ref(), RefreshScope::All, &updates);
                next_poll += interval;
                let now = Instant::now();
                if next_poll <= now {
                    next_poll = now + interval;
                }
            }
            Ok(Control::Refresh(scope)) => poll(source.as_ref(), scope, &updates),
            Ok(Control::Optimize) => {
                let result = source.optimize().map_err(|e| {
                    log::error!("Error running optimization: {}", e);
                    "Error running optimization".to_string()
                });
                let _ = updates.send(DashboardUpdate::Optimization(result));
            }
            Ok(Control::Scenario(request)) => {
                let result = source.run_scenario(&request).map_err(|e| {
                    log::error!("Error running scenario '{}': {}", request.name, e);
                    "Error running scenario".to_string()
                });
                let _ = updates.send(DashboardUpdate::Scenario(result));
            }
            Ok(Control::Shutdown) | Err(RecvTimeoutError::Disconnected) => break,
        }
    }
}

fn poll(source: &dyn DashboardSource, scope: RefreshScope, updates: &Sender<DashboardUpdate>) {
    let metrics = source.metrics().map_err(|e| {
        log::error!("Error loading metrics: {}", e);
        "Error loading metrics".to_string()
    });
    let trains = source.trains().map_err(|e| {
        log::error!("Error loading trains: {}", e);
        "Error loading train data".to_string()
    });

    let _ = updates.send(DashboardUpdate::Metrics(metrics));
    let _ = updates.send(DashboardUpdate::Trains(trains));

    if scope == RefreshScope::All {
        let conflicts = source.conflicts().map_err(|e| {
            log::error!("Error detecting conflicts: {}", e);
            "Error detecting conflicts".to_string()
        });
        let _ = updates.send(DashboardUpdate::Conflicts(conflicts));
    }
}
