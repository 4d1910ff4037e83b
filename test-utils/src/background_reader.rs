use std::{io, thread};
use std::io::Read;
use std::os::fd::AsRawFd;
use std::string::FromUtf8Error;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};
use thiserror::Error;
use crate::constants::{BACKGROUND_READER_BUF_SIZE, BACKGROUND_READER_CHECK_INTERVAL};
use crate::process::FdNonblockExt;

pub trait Reader: AsRawFd + Read + Send + Sync + 'static {}
impl<T: AsRawFd + Read + Send + Sync + 'static> Reader for T {}

/// Collects the output of a child process on a separate thread, so that
/// the tests can wait for specific log lines.
pub struct BackgroundReader<R: Reader> {
    thread: Option<JoinHandle<Result<(), BackgroundReaderError>>>,
    inner: Arc<Inner<R>>,
}

struct Inner<R: Reader> {
    mutable: Mutex<InnerMut<R>>,
    shutdown_notice: AtomicBool,
    timeout: Option<Duration>,
}

struct InnerMut<R: Reader> {
    reader: R,
    buf: Vec<u8>,
}

impl<R: Reader> BackgroundReader<R> {
    pub fn new(
        reader: R,
        timeout: Option<u64>,
    ) -> Result<Self, BackgroundReaderError> {
        let inner = Arc::new(
            Inner {
                mutable: Mutex::new(
                    InnerMut {
                        reader,
                        buf: Vec::with_capacity(BACKGROUND_READER_BUF_SIZE),
                    }
                ),
                shutdown_notice: AtomicBool::new(false),
                timeout: timeout.map(Duration::from_millis),
            }
        );
        let inner2 = inner.clone();
        let thread = thread::spawn(move || Self::read_loop(inner2));
        Ok(
            Self {
                thread: Some(thread),
                inner,
            }
        )
    }

    fn read_loop(inner: Arc<Inner<R>>) -> Result<(), BackgroundReaderError> {
        let mut read_buf = [0u8; BACKGROUND_READER_BUF_SIZE];

        inner.mutable.lock()
            .expect("couldn't lock the reader's state")
            .reader
            .set_nonblock(true)
            .map_err(BackgroundReaderError::Io)?;

        loop {
            if inner.shutdown_notice.load(Ordering::Relaxed) {
                return Ok(());
            }
            let mut mutables = inner.mutable.lock()
                .expect("couldn't lock the reader's state");
            match mutables.reader.read(&mut read_buf) {
                Ok(0) => return Ok(()),

                Ok(bytes_read)
                => mutables.buf.extend_from_slice(&read_buf[..bytes_read]),

                Err(e) if e.kind() != io::ErrorKind::WouldBlock
                    && e.kind() != io::ErrorKind::Interrupted
                => return Err(BackgroundReaderError::Io(e)),

                Err(_) => {
                    drop(mutables);
                    thread::sleep(BACKGROUND_READER_CHECK_INTERVAL)
                },
            }
        }
    }

    /// Waits for the child to close its end, returns everything not yet
    /// consumed by [`Self::wait_until`].
    pub fn read_to_end(mut self) -> Result<String, BackgroundReaderError> {
        let Some(thread) = self.thread.take() else {
            return Ok(String::new())
        };
        thread.join().expect("background reader thread panicked")?;
        let buf = std::mem::take(&mut self.lock().buf);
        Ok(String::from_utf8(buf)?)
    }

    /// Returns the output up to and including `needle`, panics on timeout.
    pub fn wait_until(
        &mut self,
        needle: &str,
    ) -> Result<String, BackgroundReaderError> {
        let needle = needle.as_bytes();
        let started = Instant::now();
        let mut searched_from = 0usize;

        loop {
            let mut mutables = self.lock();
            let found = mutables.buf[searched_from..]
                .windows(needle.len())
                .position(|window| window == needle)
                .map(|pos| searched_from + pos + needle.len());
            match found {
                Some(end) => {
                    let rest = mutables.buf.split_off(end);
                    let consumed = std::mem::replace(&mut mutables.buf, rest);
                    return Ok(String::from_utf8(consumed)?)
                },
                None => {
                    searched_from = mutables.buf.len()
                        .saturating_sub(needle.len().saturating_sub(1));
                },
            }

            if let Some(timeout) = self.inner.timeout
                && started.elapsed() > timeout
            {
                eprintln!(
                    "last log messages: {}",
                    String::from_utf8_lossy(&mutables.buf),
                );
                panic!("timeout expired while waiting for the log output")
            }
            drop(mutables);
            thread::sleep(BACKGROUND_READER_CHECK_INTERVAL);
        }
    }

    fn lock(&self) -> MutexGuard<'_, InnerMut<R>> {
        self.inner.mutable.lock()
            .unwrap_or_else(|e|
                panic!("background reader thread panicked: {e}")
            )
    }
}

impl<R: Reader> Drop for BackgroundReader<R> {
    fn drop(&mut self) {
        let Some(thread) = self.thread.take() else {
            return
        };
        self.inner.shutdown_notice.store(true, Ordering::Relaxed);
        thread.join()
            .expect("background reader thread panicked")
            .unwrap_or_else(|e|
                panic!("background reader thread failed: {e}")
            )
    }
}

#[derive(Debug, Error)]
pub enum BackgroundReaderError {
    #[error(transparent)]
    Io(io::Error),

    #[error(transparent)]
    FromUtf8(#[from] FromUtf8Error),
}
