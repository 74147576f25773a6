// Studio runtime: one tokio task owns the Studio and multiplexes its clocks
//
// The task selects over user commands, the countdown interval, the frame
// interval and the encoder chunk stream. Timers only exist while their status
// is current, so a superseded status can never fire an effect.

use super::{Studio, StudioError, StudioSnapshot};
use crate::capture::{ArtifactInfo, ChunkStream};
use crate::config::ConfigEdit;
use crate::events::StudioEventEmitter;
use crate::recording::SessionStatus;
use crate::studio_constants::{frame_interval, COUNTDOWN_TICK};
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::{Instant, Interval, MissedTickBehavior};

/// Reply channel for a command
pub type Responder<T> = oneshot::Sender<Result<T, StudioError>>;

/// Commands sent to the studio task
pub enum StudioCommand {
    Acquire(Responder<()>),
    StartRecording(Responder<u8>),
    StopRecording(Responder<bool>),
    Download(Responder<(ArtifactInfo, PathBuf)>),
    Dismiss(Responder<ArtifactInfo>),
    UpdateConfig(ConfigEdit, Responder<()>),
    Snapshot(oneshot::Sender<StudioSnapshot>),
    /// Stop an active recording, or cancel a countdown, without a reply
    /// (signal handlers)
    RequestStop,
    /// Tear everything down and end the task
    Shutdown(oneshot::Sender<()>),
}

/// Cloneable handle to a running studio task
#[derive(Clone)]
pub struct StudioHandle {
    sender: mpsc::UnboundedSender<StudioCommand>,
    status: watch::Receiver<SessionStatus>,
}

/// Spawn the studio task on the current tokio runtime
pub fn spawn<E: StudioEventEmitter + 'static>(studio: Studio<E>) -> (StudioHandle, JoinHandle<()>) {
    let (sender, receiver) = mpsc::unbounded_channel();
    let (status_tx, status_rx) = watch::channel(studio.status());
    let task = tokio::spawn(studio_task(studio, receiver, status_tx));
    (
        StudioHandle {
            sender,
            status: status_rx,
        },
        task,
    )
}

impl StudioHandle {
    pub async fn acquire(&self) -> Result<(), StudioError> {
        self.request(StudioCommand::Acquire).await
    }

    pub async fn start_recording(&self) -> Result<u8, StudioError> {
        self.request(StudioCommand::StartRecording).await
    }

    /// Returns true if the encoder is finalizing a recording
    pub async fn stop_recording(&self) -> Result<bool, StudioError> {
        self.request(StudioCommand::StopRecording).await
    }

    pub async fn download(&self) -> Result<(ArtifactInfo, PathBuf), StudioError> {
        self.request(StudioCommand::Download).await
    }

    pub async fn dismiss(&self) -> Result<ArtifactInfo, StudioError> {
        self.request(StudioCommand::Dismiss).await
    }

    pub async fn update_config(&self, edit: ConfigEdit) -> Result<(), StudioError> {
        self.request(|reply| StudioCommand::UpdateConfig(edit, reply))
            .await
    }

    pub async fn snapshot(&self) -> Result<StudioSnapshot, StudioError> {
        let (reply, rx) = oneshot::channel();
        self.send(StudioCommand::Snapshot(reply))?;
        rx.await.map_err(|_| StudioError::RuntimeClosed)
    }

    /// Ask an active recording to stop or a countdown to cancel; safe to call
    /// from any thread
    pub fn request_stop(&self) -> bool {
        self.sender.send(StudioCommand::RequestStop).is_ok()
    }

    /// Shut the studio down and wait for the teardown to complete
    pub async fn shutdown(&self) -> Result<(), StudioError> {
        let (reply, rx) = oneshot::channel();
        self.send(StudioCommand::Shutdown(reply))?;
        rx.await.map_err(|_| StudioError::RuntimeClosed)
    }

    /// Latest status published by the studio task
    pub fn status(&self) -> SessionStatus {
        *self.status.borrow()
    }

    /// Wait until the studio reaches `status`
    pub async fn wait_for_status(&self, status: SessionStatus) -> Result<(), StudioError> {
        let mut rx = self.status.clone();
        rx.wait_for(|s| *s == status)
            .await
            .map(|_| ())
            .map_err(|_| StudioError::RuntimeClosed)
    }

    /// Wait until the studio leaves `status`
    pub async fn wait_while_status(&self, status: SessionStatus) -> Result<(), StudioError> {
        let mut rx = self.status.clone();
        rx.wait_for(|s| *s != status)
            .await
            .map(|_| ())
            .map_err(|_| StudioError::RuntimeClosed)
    }

    async fn request<T>(
        &self,
        command: impl FnOnce(Responder<T>) -> StudioCommand,
    ) -> Result<T, StudioError> {
        let (reply, rx) = oneshot::channel();
        self.send(command(reply))?;
        rx.await.map_err(|_| StudioError::RuntimeClosed)?
    }

    fn send(&self, command: StudioCommand) -> Result<(), StudioError> {
        self.sender
            .send(command)
            .map_err(|_| StudioError::RuntimeClosed)
    }
}

/// Timers and streams that only exist in specific statuses
#[derive(Default)]
struct Clocks {
    countdown: Option<Interval>,
    frames: Option<Interval>,
    chunks: Option<ChunkStream>,
}

impl Clocks {
    /// Create or drop the timers so they match the current status
    fn sync(&mut self, status: SessionStatus, scrolling: bool, frame_period: Duration) {
        match (status == SessionStatus::Starting, self.countdown.is_some()) {
            (true, false) => {
                self.countdown = Some(tokio::time::interval_at(
                    Instant::now() + COUNTDOWN_TICK,
                    COUNTDOWN_TICK,
                ));
            }
            (false, true) => self.countdown = None,
            _ => {}
        }

        match (status == SessionStatus::Recording && scrolling, self.frames.is_some()) {
            (true, false) => {
                let mut frames =
                    tokio::time::interval_at(Instant::now() + frame_period, frame_period);
                frames.set_missed_tick_behavior(MissedTickBehavior::Skip);
                self.frames = Some(frames);
            }
            (false, true) => self.frames = None,
            _ => {}
        }
    }
}

async fn tick(interval: &mut Option<Interval>) -> Instant {
    match interval {
        Some(interval) => interval.tick().await,
        None => std::future::pending().await,
    }
}

async fn next_chunk(stream: &mut Option<ChunkStream>) -> Option<Vec<u8>> {
    match stream {
        Some(stream) => stream.next().await,
        None => std::future::pending().await,
    }
}

async fn studio_task<E: StudioEventEmitter>(
    mut studio: Studio<E>,
    mut commands: mpsc::UnboundedReceiver<StudioCommand>,
    status_tx: watch::Sender<SessionStatus>,
) {
    let frame_period = frame_interval(studio.options().refresh_hz);
    let mut clocks = Clocks::default();
    crate::debug!("Studio task started (frame period {:?})", frame_period);

    loop {
        clocks.sync(studio.status(), studio.is_scrolling(), frame_period);

        tokio::select! {
            command = commands.recv() => {
                match command {
                    Some(StudioCommand::Shutdown(reply)) => {
                        studio.shutdown(Instant::now());
                        status_tx.send_replace(studio.status());
                        let _ = reply.send(());
                        break;
                    }
                    Some(command) => {
                        handle_command(&mut studio, &mut clocks, &status_tx, command).await
                    }
                    None => {
                        crate::debug!("All studio handles dropped");
                        studio.shutdown(Instant::now());
                        status_tx.send_replace(studio.status());
                        break;
                    }
                }
            }
            now = tick(&mut clocks.countdown) => {
                match studio.tick_countdown(now) {
                    Ok(Some(stream)) => clocks.chunks = Some(stream),
                    Ok(None) => {}
                    Err(e) => crate::warn!("Stale countdown tick: {}", e),
                }
            }
            now = tick(&mut clocks.frames) => {
                studio.on_frame(now);
            }
            chunk = next_chunk(&mut clocks.chunks) => {
                match chunk {
                    Some(chunk) => {
                        studio.push_chunk(chunk);
                    }
                    None => {
                        clocks.chunks = None;
                        if let Err(e) = studio.on_encoder_finished(Instant::now()) {
                            crate::error!("Failed to finish recording: {}", e);
                        }
                    }
                }
            }
        }

        status_tx.send_replace(studio.status());
    }
    crate::debug!("Studio task exited");
}

/// Apply one command
///
/// The new status is published before the reply is sent, so a caller that
/// awaits the reply never observes a stale status.
async fn handle_command<E: StudioEventEmitter>(
    studio: &mut Studio<E>,
    clocks: &mut Clocks,
    status_tx: &watch::Sender<SessionStatus>,
    command: StudioCommand,
) {
    match command {
        StudioCommand::Acquire(reply) => {
            let result = studio.acquire().await;
            let _ = reply.send(result);
        }
        StudioCommand::StartRecording(reply) => {
            let result = studio.start_recording();
            status_tx.send_replace(studio.status());
            let _ = reply.send(result);
        }
        StudioCommand::StopRecording(reply) => {
            let result = stop(studio, clocks);
            status_tx.send_replace(studio.status());
            let _ = reply.send(result);
        }
        StudioCommand::RequestStop => {
            let result = match studio.status() {
                SessionStatus::Recording => stop(studio, clocks).map(|_| ()),
                SessionStatus::Starting => studio.cancel_countdown(),
                status => {
                    crate::debug!("Stop request ignored in {:?}", status);
                    Ok(())
                }
            };
            if let Err(e) = result {
                crate::warn!("Stop request failed: {}", e);
            }
        }
        StudioCommand::Download(reply) => {
            let result = studio.download().await;
            let _ = reply.send(result);
        }
        StudioCommand::Dismiss(reply) => {
            let _ = reply.send(studio.dismiss());
        }
        StudioCommand::UpdateConfig(edit, reply) => {
            let _ = reply.send(studio.update_config(edit, Instant::now()));
        }
        StudioCommand::Snapshot(reply) => {
            let _ = reply.send(studio.snapshot(Instant::now()));
        }
        // Handled by the loop itself
        StudioCommand::Shutdown(_) => {}
    }
}

/// Stop the session, dropping the frame clock before any further tick
fn stop<E: StudioEventEmitter>(studio: &mut Studio<E>, clocks: &mut Clocks) -> Result<bool, StudioError> {
    let pending = studio.stop_recording(Instant::now())?;
    clocks.frames = None;
    if !pending {
        clocks.chunks = None;
    }
    Ok(pending)
}

#[cfg(test)]
#[path = "runtime_test.rs"]
mod tests;
