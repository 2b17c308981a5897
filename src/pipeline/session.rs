use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    thread,
};

use anyhow::{Context, Result};
use crossbeam_channel::{SendTimeoutError, Sender};

use super::{
    readout::Readout,
    source::{LandmarkSource, POLL_INTERVAL, SourceError},
};
use crate::tally::{FrameReport, tally_frame};

/// A running counting loop. Stopping (or dropping) joins the worker, so no
/// report is produced after `stop` returns.
#[derive(Debug)]
pub struct CountingSession {
    stop: Arc<AtomicBool>,
    handle: Option<thread::JoinHandle<()>>,
}

impl CountingSession {
    pub fn is_finished(&self) -> bool {
        self.handle
            .as_ref()
            .map(|handle| handle.is_finished())
            .unwrap_or(true)
    }

    pub fn stop(mut self) {
        self.shutdown();
    }

    /// Blocks until the source is exhausted or the consumer hangs up.
    pub fn join(mut self) {
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }

    fn shutdown(&mut self) {
        self.stop.store(true, Ordering::SeqCst);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for CountingSession {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Pulls one frame at a time from `source`, counts it and sends the report.
///
/// Frames are handled strictly in order. A full report channel delays the
/// next frame instead of dropping the current report.
pub fn start_counting_session<S>(
    source: S,
    report_tx: Sender<FrameReport>,
) -> Result<CountingSession>
where
    S: LandmarkSource + Send + 'static,
{
    let stop = Arc::new(AtomicBool::new(false));
    let stop_flag = stop.clone();

    let handle = thread::Builder::new()
        .name("finger-counter".into())
        .spawn(move || run_loop(source, report_tx, &stop_flag))
        .context("failed to spawn counting thread")?;

    Ok(CountingSession {
        stop,
        handle: Some(handle),
    })
}

fn run_loop<S>(mut source: S, report_tx: Sender<FrameReport>, stop: &AtomicBool)
where
    S: LandmarkSource,
{
    let mut frames = 0usize;

    while !stop.load(Ordering::Relaxed) {
        let frame = match source.next_frame() {
            Ok(Some(frame)) => frame,
            Ok(None) => {
                log::info!("landmark source exhausted after {frames} frames");
                break;
            }
            Err(SourceError::Idle) => continue,
            Err(err) if err.is_recoverable() => {
                log::warn!("skipping frame: {err}");
                continue;
            }
            Err(err) => {
                log::error!("landmark source failed: {err}");
                break;
            }
        };

        let report = tally_frame(&frame.hands, frame.size);
        log::debug!(
            "frame {frames}: {} | {:?}",
            report.total_text(),
            report.per_hand_lines()
        );
        frames += 1;

        if !deliver(&report_tx, report, stop) {
            break;
        }
    }
}

fn deliver(report_tx: &Sender<FrameReport>, report: FrameReport, stop: &AtomicBool) -> bool {
    let mut pending = report;
    loop {
        match report_tx.send_timeout(pending, POLL_INTERVAL) {
            Ok(()) => return true,
            Err(SendTimeoutError::Timeout(report)) => {
                if stop.load(Ordering::Relaxed) {
                    return false;
                }
                pending = report;
            }
            Err(SendTimeoutError::Disconnected(_)) => {
                log::info!("report consumer disconnected, stopping");
                return false;
            }
        }
    }
}

/// Start/stop guard around a [`CountingSession`]. Starting while running and
/// stopping while stopped are both no-ops.
#[derive(Debug, Default)]
pub struct SessionController {
    session: Option<CountingSession>,
    readout: Readout,
}

impl SessionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.session
            .as_ref()
            .map(|session| !session.is_finished())
            .unwrap_or(false)
    }

    /// Returns `false` when a session was already running.
    pub fn start<S>(&mut self, source: S, report_tx: Sender<FrameReport>) -> Result<bool>
    where
        S: LandmarkSource + Send + 'static,
    {
        if self.is_running() {
            log::debug!("start ignored, session already running");
            return Ok(false);
        }

        // A previous session may have ended on its own.
        if let Some(finished) = self.session.take() {
            finished.join();
        }

        self.session = Some(start_counting_session(source, report_tx)?);
        log::info!("counting session started");
        Ok(true)
    }

    /// Stops the session and clears the readout. Returns `false` when there
    /// was nothing to stop.
    pub fn stop(&mut self) -> bool {
        let Some(session) = self.session.take() else {
            log::debug!("stop ignored, no session");
            return false;
        };

        session.stop();
        self.readout.reset();
        log::info!("counting session stopped");
        true
    }

    pub fn readout(&self) -> &Readout {
        &self.readout
    }

    pub fn apply(&mut self, report: &FrameReport) {
        self.readout.apply(report);
    }
}
