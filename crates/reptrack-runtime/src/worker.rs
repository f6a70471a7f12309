//! Frame worker - one task owns the session, frames arrive on a bounded queue
//!
//! Capture and processing can run at different paces; the queue decouples
//! them while keeping exactly one frame in the pipeline at a time.

use std::sync::Arc;

use tokio::sync::{mpsc, Notify};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use reptrack_core::{LandmarkFrame, RepTrackError, RepTrackResult};

use crate::{FrameSnapshot, Session};

/// Frame sender channel
pub type FrameSender = mpsc::Sender<LandmarkFrame>;

/// Snapshot receiver channel
pub type SnapshotReceiver = mpsc::Receiver<FrameSnapshot>;

/// Handle to a running frame worker
pub struct FrameWorker {
    frames: FrameSender,
    snapshots: SnapshotReceiver,
    shutdown_notify: Arc<Notify>,
    handle: JoinHandle<Session>,
}

/// Move `session` onto a background task fed by a queue of `capacity` frames
pub fn spawn_worker(mut session: Session, capacity: usize) -> FrameWorker {
    let capacity = capacity.max(1);
    let (frame_tx, mut frame_rx) = mpsc::channel::<LandmarkFrame>(capacity);
    let (snapshot_tx, snapshot_rx) = mpsc::channel(capacity);
    let shutdown_notify = Arc::new(Notify::new());
    let worker_shutdown = shutdown_notify.clone();

    let handle = tokio::spawn(async move {
        let mut listening = true;
        let mut closing = false;
        loop {
            let frame = tokio::select! {
                biased;

                // Refuse new frames, keep the queued ones
                _ = worker_shutdown.notified(), if !closing => {
                    frame_rx.close();
                    closing = true;
                    continue;
                }

                frame = frame_rx.recv() => frame,
            };
            let Some(frame) = frame else {
                break;
            };

            let snapshot = session.process_frame(&frame);
            if listening && snapshot_tx.send(snapshot).await.is_err() {
                debug!("snapshot receiver dropped");
                listening = false;
            }
        }
        debug!(frames = session.stats().frames, "frame worker stopped");
        session
    });

    FrameWorker {
        frames: frame_tx,
        snapshots: snapshot_rx,
        shutdown_notify,
        handle,
    }
}

impl FrameWorker {
    /// Queue a frame, waiting for room
    pub async fn submit(&self, frame: LandmarkFrame) -> RepTrackResult<()> {
        self.frames
            .send(frame)
            .await
            .map_err(|_| RepTrackError::WorkerStopped)
    }

    /// Queue a frame if there is room; a full queue drops the frame
    pub fn try_submit(&self, frame: LandmarkFrame) -> RepTrackResult<bool> {
        match self.frames.try_send(frame) {
            Ok(()) => Ok(true),
            Err(mpsc::error::TrySendError::Full(_)) => Ok(false),
            Err(mpsc::error::TrySendError::Closed(_)) => Err(RepTrackError::WorkerStopped),
        }
    }

    /// Next processed snapshot; `None` once the worker has stopped
    pub async fn next_snapshot(&mut self) -> Option<FrameSnapshot> {
        self.snapshots.recv().await
    }

    /// A cloneable sender for a capture task
    pub fn sender(&self) -> FrameSender {
        self.frames.clone()
    }

    /// Stop accepting frames, finish the queued ones and hand the session back
    ///
    /// Senders handed out by [`FrameWorker::sender`] see
    /// [`RepTrackError::WorkerStopped`] from then on. Snapshots not yet read
    /// are discarded.
    pub async fn shutdown(self) -> RepTrackResult<Session> {
        let FrameWorker {
            frames,
            snapshots,
            shutdown_notify,
            handle,
        } = self;
        shutdown_notify.notify_one();
        drop(frames);
        drop(snapshots);
        handle.await.map_err(|err| {
            warn!(error = %err, "frame worker failed");
            RepTrackError::WorkerStopped
        })
    }
}
