//! Bridge between background tasks and the UI thread
//!
//! Work running on the tokio runtime never touches UI state directly. It
//! sends an `AsyncMessage` through the bridge, and the main loop drains the
//! bridge once per iteration via `try_recv_all()`.

use crate::model::filesystem::FsResult;
use crate::model::operation::FileOperation;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};

/// Messages sent from background tasks to the UI thread
#[derive(Debug)]
pub enum AsyncMessage {
    /// A filesystem operation completed (successfully or not)
    OperationFinished {
        operation: FileOperation,
        result: FsResult<()>,
    },
}

/// Cloneable handle owning both ends of the channel
///
/// The receiver sits behind a mutex only so the bridge can be cloned and
/// shared; it is drained from one thread.
#[derive(Debug, Clone)]
pub struct AsyncBridge {
    sender: mpsc::Sender<AsyncMessage>,
    receiver: Arc<Mutex<mpsc::Receiver<AsyncMessage>>>,
}

impl Default for AsyncBridge {
    fn default() -> Self {
        Self::new()
    }
}

impl AsyncBridge {
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            sender,
            receiver: Arc::new(Mutex::new(receiver)),
        }
    }

    /// Sender to move into a background task
    pub fn sender(&self) -> mpsc::Sender<AsyncMessage> {
        self.sender.clone()
    }

    /// Take every message currently queued, without blocking
    pub fn try_recv_all(&self) -> Vec<AsyncMessage> {
        let Ok(receiver) = self.receiver.lock() else {
            return Vec::new();
        };
        receiver.try_iter().collect()
    }
}
