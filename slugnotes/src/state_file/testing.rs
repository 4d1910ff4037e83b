use std::io;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use async_trait::async_trait;
use crate::state_file::{StateFileError, StateFileIo};

/// Keeps the "file" in memory and counts the writes.
pub struct MemoryStateFile<T> {
    state: Mutex<Option<T>>,
    writes: AtomicUsize,
    failing_writes: AtomicBool,
}

impl<T: Clone> MemoryStateFile<T> {
    pub fn new(initial: Option<T>) -> Arc<Self> {
        Arc::new(
            MemoryStateFile {
                state: Mutex::new(initial),
                writes: AtomicUsize::new(0),
                failing_writes: AtomicBool::new(false),
            }
        )
    }

    pub fn stored(&self) -> Option<T> {
        self.state.lock().unwrap().clone()
    }

    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::Relaxed)
    }

    pub fn fail_writes(&self) {
        self.failing_writes.store(true, Ordering::Relaxed)
    }
}

#[async_trait]
impl<T: Clone + Send + Sync> StateFileIo<T> for MemoryStateFile<T> {
    async fn read_state(&self) -> Result<Option<T>, StateFileError> {
        Ok(self.stored())
    }

    async fn write_state(&self, data: &T) -> Result<(), StateFileError> {
        if self.failing_writes.load(Ordering::Relaxed) {
            return Err(io::Error::other("write failed").into())
        }
        self.writes.fetch_add(1, Ordering::Relaxed);
        *self.state.lock().unwrap() = Some(data.clone());
        Ok(())
    }
}

#[async_trait]
impl<T: Send + Sync, Io: StateFileIo<T>> StateFileIo<T> for Arc<Io> {
    async fn read_state(&self) -> Result<Option<T>, StateFileError> {
        self.as_ref().read_state().await
    }

    async fn write_state(&self, data: &T) -> Result<(), StateFileError> {
        self.as_ref().write_state(data).await
    }
}
