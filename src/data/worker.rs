//! Background worker for file loading
//!
//! Keeps the UI responsive while large tables are parsed. The worker only
//! produces [`DataSource`] values; the plot registry is never touched off the
//! UI thread.

use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, Sender, TryRecvError};
use std::thread::{self, JoinHandle};

use super::source::DataSource;
use crate::error::PlotError;

/// Requests that can be sent to the load worker
pub enum LoadRequest {
    LoadFile { path: PathBuf },
    Shutdown,
}

/// Results returned from the load worker
pub enum LoadResult {
    Loaded { path: PathBuf, source: DataSource },
    Failed { path: PathBuf, error: PlotError },
}

/// Background worker that loads tables off the main thread
pub struct LoadWorker {
    tx: Sender<LoadRequest>,
    rx: Receiver<LoadResult>,
    handle: Option<JoinHandle<()>>,
    pending: usize,
}

impl LoadWorker {
    pub fn spawn() -> Self {
        let (req_tx, req_rx) = channel::<LoadRequest>();
        let (res_tx, res_rx) = channel::<LoadResult>();

        let handle = thread::Builder::new()
            .name("graph-oxide-loader".to_string())
            .spawn(move || Self::worker_loop(req_rx, res_tx))
            .map_err(|e| log::error!("failed to spawn load worker: {}", e))
            .ok();

        Self {
            tx: req_tx,
            rx: res_rx,
            handle,
            pending: 0,
        }
    }

    fn worker_loop(rx: Receiver<LoadRequest>, tx: Sender<LoadResult>) {
        while let Ok(request) = rx.recv() {
            let result = match request {
                LoadRequest::LoadFile { path } => match DataSource::load(&path) {
                    Ok(source) => LoadResult::Loaded { path, source },
                    Err(error) => {
                        log::warn!("failed to load {}: {}", path.display(), error);
                        LoadResult::Failed { path, error }
                    }
                },
                LoadRequest::Shutdown => break,
            };

            if tx.send(result).is_err() {
                break;
            }
        }
        log::debug!("load worker stopped");
    }

    /// Queue a file for loading (non-blocking)
    pub fn request_load(&mut self, path: PathBuf) {
        log::debug!("queued load of {}", path.display());
        if self.tx.send(LoadRequest::LoadFile { path }).is_ok() {
            self.pending += 1;
        }
    }

    /// Poll for a completed load (non-blocking)
    pub fn poll(&mut self) -> Option<LoadResult> {
        match self.rx.try_recv() {
            Ok(result) => {
                self.pending = self.pending.saturating_sub(1);
                Some(result)
            }
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }

    pub fn is_busy(&self) -> bool {
        self.pending > 0
    }
}

impl Drop for LoadWorker {
    fn drop(&mut self) {
        let _ = self.tx.send(LoadRequest::Shutdown);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Default for LoadWorker {
    fn default() -> Self {
        Self::spawn()
    }
}
