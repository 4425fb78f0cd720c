//! Rebuild the manifest whenever its inputs change.
//!
//! Three things feed the loop: filesystem events from the asset directory,
//! a poller that notices when the published CSV changes, and completion
//! notices from spawned builds. Changes are debounced into a single pending
//! deadline, and [`BuildGate`] keeps builds from overlapping.

use std::ffi::OsString;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use chara_reel_sources::config::public_csv_url;
use chara_reel_sources::{SourcePaths, fetch_csv_text, http_client};
use notify::{Event, EventKind, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tokio::time::{Instant, MissedTickBehavior};

use crate::error::{ManifestError, WatchError};
use crate::manifest::{BuildReport, build_manifest};
use crate::settings::Settings;

/// Timing knobs for the watch loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WatchOptions {
    /// Quiet period before a change triggers a build
    pub debounce: Duration,
    /// Events are ignored for this long after a build finishes
    pub cooldown: Duration,
    /// How often the published CSV is fetched
    pub poll_interval: Duration,
}

impl From<&Settings> for WatchOptions {
    fn from(settings: &Settings) -> Self {
        Self {
            debounce: settings.debounce,
            cooldown: settings.cooldown,
            poll_interval: settings.poll_interval,
        }
    }
}

/// Decides which filesystem events count as input changes.
///
/// The builder's own output (the manifest and its temp file) never counts,
/// and nothing counts during the cooldown that follows a build.
#[derive(Debug, Clone)]
pub struct ChangeFilter {
    ignored: Vec<OsString>,
    cooldown: Duration,
    quiet_until: Option<Instant>,
}

impl ChangeFilter {
    pub fn new(output_file: &str, temp_file: &str, cooldown: Duration) -> Self {
        Self {
            ignored: vec![OsString::from(output_file), OsString::from(temp_file)],
            cooldown,
            quiet_until: None,
        }
    }

    pub fn for_settings(settings: &Settings) -> Self {
        Self::new(
            &settings.output_file,
            &settings.temp_output_file(),
            settings.cooldown,
        )
    }

    /// Start the post-build cooldown.
    pub fn build_finished(&mut self, now: Instant) {
        self.quiet_until = Some(now + self.cooldown);
    }

    pub fn in_cooldown(&self, now: Instant) -> bool {
        self.quiet_until.is_some_and(|until| now < until)
    }

    fn is_output(&self, path: &Path) -> bool {
        path.file_name()
            .is_some_and(|name| self.ignored.iter().any(|i| i == name))
    }

    /// True if `event` should schedule a rebuild.
    pub fn accepts(&self, event: &Event, now: Instant) -> bool {
        if self.in_cooldown(now) {
            return false;
        }
        if !matches!(
            event.kind,
            EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_) | EventKind::Any
        ) {
            return false;
        }
        // Some backends report directory-level events without paths
        event.paths.is_empty() || event.paths.iter().any(|p| !self.is_output(p))
    }
}

/// Single-slot debounce: a new trigger replaces the pending deadline.
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    pub fn trigger(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Clear and return true if the deadline has passed.
    pub fn take_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(d) if d <= now => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

/// Guard that allows at most one build at a time.
#[derive(Debug, Clone, Default)]
pub struct BuildGate {
    busy: Arc<AtomicBool>,
}

/// Held for the duration of a build; releases the gate on drop.
#[derive(Debug)]
pub struct BuildPermit {
    busy: Arc<AtomicBool>,
}

impl BuildGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the gate, or `None` if a build is already running.
    pub fn try_acquire(&self) -> Option<BuildPermit> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| BuildPermit {
                busy: Arc::clone(&self.busy),
            })
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

impl Drop for BuildPermit {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}

/// Remembers the last published CSV text.
///
/// The first observation only records a baseline; later ones report whether
/// the text differs from the previous fetch.
#[derive(Debug, Default)]
pub struct RemoteBaseline {
    last: Option<String>,
}

impl RemoteBaseline {
    pub fn observe(&mut self, text: String) -> bool {
        match &self.last {
            None => {
                self.last = Some(text);
                false
            }
            Some(prev) if *prev == text => false,
            Some(_) => {
                self.last = Some(text);
                true
            }
        }
    }
}

enum Signal {
    Fs(Event),
    RemoteChanged,
    BuildDone(Result<BuildReport, ManifestError>),
}

fn log_build_result(result: &Result<BuildReport, ManifestError>) {
    match result {
        Ok(report) => log::info!(
            "Wrote manifest with {} characters -> {} (source: {})",
            report.characters,
            report.output.display(),
            report
                .source
                .map(|k| k.to_string())
                .unwrap_or_else(|| "sidecars only".to_string())
        ),
        Err(e) => log::error!("Manifest build failed: {}", e),
    }
}

async fn poll_remote_csv(
    paths: SourcePaths,
    http: reqwest::Client,
    interval: Duration,
    tx: mpsc::UnboundedSender<Signal>,
) {
    let mut baseline = RemoteBaseline::default();
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;
        let Some(url) = public_csv_url(&paths) else {
            continue;
        };
        match fetch_csv_text(&http, &url).await {
            Ok(text) => {
                if baseline.observe(text) && tx.send(Signal::RemoteChanged).is_err() {
                    return;
                }
            }
            Err(e) => log::debug!("CSV poll failed: {}", e),
        }
    }
}

/// Build once, then rebuild on every input change until the process exits.
///
/// Only setup problems (the file watcher, the HTTP client) are returned as
/// errors. Build failures are logged and the loop keeps going.
pub async fn watch(settings: &Settings) -> Result<(), WatchError> {
    let options = WatchOptions::from(settings);
    let asset_dir = settings.asset_path();
    let gate = BuildGate::new();
    let mut filter = ChangeFilter::for_settings(settings);
    let mut debouncer = Debouncer::new(options.debounce);

    log::info!("Watching {} for changes...", asset_dir.display());
    let first = build_manifest(settings).await;
    log_build_result(&first);
    filter.build_finished(Instant::now());

    let (tx, mut rx) = mpsc::unbounded_channel::<Signal>();

    let fs_tx = tx.clone();
    let mut watcher = notify::recommended_watcher(move |result: notify::Result<Event>| {
        match result {
            Ok(event) => {
                let _ = fs_tx.send(Signal::Fs(event));
            }
            Err(e) => log::warn!("File watcher error: {}", e),
        }
    })?;
    watcher.watch(&asset_dir, RecursiveMode::NonRecursive)?;

    let local_csv = settings.source_paths().local_csv();
    if local_csv.is_file() {
        if let Err(e) = watcher.watch(&local_csv, RecursiveMode::NonRecursive) {
            log::warn!("Cannot watch {}: {}", local_csv.display(), e);
        }
    }

    let http = http_client(settings.http_timeout)?;
    tokio::spawn(poll_remote_csv(
        settings.source_paths(),
        http,
        options.poll_interval,
        tx.clone(),
    ));

    loop {
        let deadline = debouncer.deadline();
        tokio::select! {
            signal = rx.recv() => {
                let Some(signal) = signal else { break };
                let now = Instant::now();
                match signal {
                    Signal::Fs(event) => {
                        if filter.accepts(&event, now) {
                            log::debug!("Change detected: {:?}", event.paths);
                            debouncer.trigger(now);
                        }
                    }
                    Signal::RemoteChanged => {
                        log::info!("Published CSV changed");
                        debouncer.trigger(now);
                    }
                    Signal::BuildDone(result) => {
                        log_build_result(&result);
                        filter.build_finished(now);
                    }
                }
            }
            _ = tokio::time::sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                let now = Instant::now();
                if !debouncer.take_due(now) {
                    continue;
                }
                match gate.try_acquire() {
                    Some(permit) => {
                        let settings = settings.clone();
                        let done = tx.clone();
                        tokio::spawn(async move {
                            let result = build_manifest(&settings).await;
                            drop(permit);
                            let _ = done.send(Signal::BuildDone(result));
                        });
                    }
                    None => {
                        log::debug!("Build in progress, rescheduling");
                        debouncer.trigger(now);
                    }
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "tests/watch_tests.rs"]
mod tests;
