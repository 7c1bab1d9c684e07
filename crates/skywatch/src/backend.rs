//! Detection backend status monitor.
//!
//! Polls `GET /model-info` on a background thread so the status line can
//! show whether the model behind the demo is loaded. The response is only
//! displayed; nothing here affects the starfield or the simulated scan.

use std::sync::{Arc, RwLock};
use std::thread;
use std::time::{Duration, Instant};

use serde::Deserialize;
use skywatch_config::BackendSettings;

/// Granularity of the stop-flag check between polls.
const POLL_SLICE: Duration = Duration::from_millis(500);

/// Backend state as last observed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum BackendStatus {
    /// No response yet.
    #[default]
    Unknown,
    /// Model, scaler and encoders are loaded.
    Ready,
    /// Backend answered but some artifacts are missing.
    NotReady,
    /// Backend answered with an error message.
    Error(String),
    /// Request failed.
    Offline,
}

impl BackendStatus {
    pub fn label(&self) -> &str {
        match self {
            BackendStatus::Unknown => "checking",
            BackendStatus::Ready => "model ready",
            BackendStatus::NotReady => "model not ready",
            BackendStatus::Error(_) => "backend error",
            BackendStatus::Offline => "offline",
        }
    }
}

/// `/model-info` response body (either shape).
#[derive(Debug, Deserialize)]
struct ModelInfoResponse {
    #[serde(default)]
    model_loaded: bool,
    #[serde(default)]
    scaler_loaded: bool,
    #[serde(default)]
    encoders_loaded: bool,
    status: Option<String>,
    error: Option<String>,
}

impl From<ModelInfoResponse> for BackendStatus {
    fn from(info: ModelInfoResponse) -> Self {
        if let Some(error) = info.error {
            return BackendStatus::Error(error);
        }
        let loaded = info.model_loaded && info.scaler_loaded && info.encoders_loaded;
        match info.status.as_deref() {
            Some("ready") if loaded => BackendStatus::Ready,
            None if loaded => BackendStatus::Ready,
            _ => BackendStatus::NotReady,
        }
    }
}

/// Polls the backend in a background thread.
#[derive(Debug)]
pub struct BackendMonitor {
    settings: BackendSettings,
    status: Arc<RwLock<BackendStatus>>,
    /// Last status copied out of `status`, read when that lock is busy.
    cached_status: Arc<RwLock<BackendStatus>>,
    /// Flag to signal thread termination.
    running: Arc<RwLock<bool>>,
}

impl BackendMonitor {
    pub fn new(settings: BackendSettings) -> Self {
        Self {
            settings,
            status: Arc::new(RwLock::new(BackendStatus::Unknown)),
            cached_status: Arc::new(RwLock::new(BackendStatus::Unknown)),
            running: Arc::new(RwLock::new(false)),
        }
    }

    /// Start the background polling thread.
    pub fn start(&self) {
        if let Ok(mut running) = self.running.write() {
            if *running {
                return;
            }
            *running = true;
        }

        let status = self.status.clone();
        let cached = self.cached_status.clone();
        let running = self.running.clone();
        let url = model_info_url(&self.settings.base_url);
        let timeout = Duration::from_secs(self.settings.timeout_secs.max(1));
        let interval = Duration::from_secs(self.settings.poll_secs.max(1));

        thread::spawn(move || {
            let agent = ureq::Agent::config_builder()
                .timeout_global(Some(timeout))
                .build()
                .new_agent();

            let mut last_fetch: Option<Instant> = None;
            loop {
                if let Ok(is_running) = running.read()
                    && !*is_running
                {
                    break;
                }

                if last_fetch.is_none_or(|at| at.elapsed() >= interval) {
                    record_status(&status, &cached, fetch_status(&agent, &url));
                    last_fetch = Some(Instant::now());
                }

                thread::sleep(POLL_SLICE);
            }
        });
    }

    /// Stop the background thread.
    pub fn stop(&self) {
        if let Ok(mut running) = self.running.write() {
            *running = false;
        }
    }

    /// Latest observed status.
    /// Uses try_read with fallback to the cached copy to avoid blocking.
    pub fn status(&self) -> BackendStatus {
        if let Ok(status) = self.status.try_read() {
            return status.clone();
        }
        if let Ok(cached) = self.cached_status.read() {
            return cached.clone();
        }
        BackendStatus::Unknown
    }
}

impl Drop for BackendMonitor {
    fn drop(&mut self) {
        self.stop();
    }
}

fn record_status(
    status: &Arc<RwLock<BackendStatus>>,
    cached: &Arc<RwLock<BackendStatus>>,
    observed: BackendStatus,
) {
    if let Ok(mut current) = status.write() {
        if *current == observed {
            return;
        }
        tracing::info!(status = observed.label(), "backend status changed");
        *current = observed.clone();
    }
    if let Ok(mut cb) = cached.write() {
        *cb = observed;
    }
}

fn model_info_url(base_url: &str) -> String {
    format!("{}/model-info", base_url.trim_end_matches('/'))
}

fn fetch_status(agent: &ureq::Agent, url: &str) -> BackendStatus {
    // The backend reports failures as JSON with a 500, so read the body either way.
    let response = agent
        .get(url)
        .config()
        .http_status_as_error(false)
        .build()
        .call();

    match response {
        Ok(mut response) => match response.body_mut().read_json::<ModelInfoResponse>() {
            Ok(info) => info.into(),
            Err(e) => {
                tracing::debug!(error = %e, "unreadable model-info body");
                BackendStatus::Error(format!("bad response: {e}"))
            }
        },
        Err(e) => {
            tracing::debug!(error = %e, url, "backend unreachable");
            BackendStatus::Offline
        }
    }
}
