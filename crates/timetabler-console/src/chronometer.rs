//! Elapsed-time ticker running beside a solve.

use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use owo_colors::OwoColorize;

/// Upper bound on how long the ticker sleeps between checks of its flag.
const POLL_INTERVAL: Duration = Duration::from_millis(25);

/// How long `stop` waits for the ticker thread before detaching it.
const JOIN_TIMEOUT: Duration = Duration::from_secs(1);

/// Prints the elapsed time at a fixed interval on its own thread until
/// stopped.
///
/// The thread shares a single `Arc<AtomicBool>` running flag with its owner.
/// Dropping the chronometer clears the flag without waiting.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use timetabler_console::Chronometer;
///
/// let chronometer = Chronometer::start_with_writer(Duration::from_secs(1), std::io::sink());
/// assert!(chronometer.is_running());
/// let elapsed = chronometer.stop();
/// assert!(elapsed < Duration::from_secs(5));
/// ```
pub struct Chronometer {
    running: Arc<AtomicBool>,
    started: Instant,
    handle: Option<JoinHandle<()>>,
}

impl Chronometer {
    /// Starts ticking to stdout.
    pub fn start(interval: Duration) -> Self {
        Self::start_with_writer(interval, io::stdout())
    }

    /// Starts ticking to `writer`.
    pub fn start_with_writer<W>(interval: Duration, mut writer: W) -> Self
    where
        W: Write + Send + 'static,
    {
        let running = Arc::new(AtomicBool::new(true));
        let started = Instant::now();
        let interval = interval.max(Duration::from_millis(1));

        let flag = Arc::clone(&running);
        let spawned = thread::Builder::new()
            .name("timetabler-chronometer".to_string())
            .spawn(move || {
                let mut next_tick = interval;
                while flag.load(Ordering::Acquire) {
                    thread::sleep(POLL_INTERVAL.min(interval));
                    let elapsed = started.elapsed();
                    if elapsed >= next_tick && flag.load(Ordering::Acquire) {
                        let _ = writeln!(writer, "{}", format_tick(elapsed));
                        let _ = writer.flush();
                        next_tick += interval;
                    }
                }
            });

        let handle = match spawned {
            Ok(handle) => Some(handle),
            Err(err) => {
                tracing::warn!(error = %err, "Could not start chronometer thread");
                running.store(false, Ordering::Release);
                None
            }
        };

        Self {
            running,
            started,
            handle,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Clears the running flag and waits a bounded time for the thread.
    ///
    /// Returns the elapsed time since start.
    pub fn stop(mut self) -> Duration {
        self.running.store(false, Ordering::Release);
        let elapsed = self.started.elapsed();

        if let Some(handle) = self.handle.take() {
            let deadline = Instant::now() + JOIN_TIMEOUT;
            while !handle.is_finished() && Instant::now() < deadline {
                thread::sleep(Duration::from_millis(5));
            }
            if handle.is_finished() {
                let _ = handle.join();
            } else {
                tracing::warn!("Chronometer thread did not stop in time, detaching");
            }
        }
        elapsed
    }
}

impl Drop for Chronometer {
    fn drop(&mut self) {
        self.running.store(false, Ordering::Release);
    }
}

fn format_tick(elapsed: Duration) -> String {
    format!(
        "{} Elapsed time: {}",
        "⏱".bright_black(),
        format!("{}s", elapsed.as_secs()).bright_white()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl SharedBuffer {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    #[test]
    fn test_ticks_while_running() {
        let buffer = SharedBuffer::default();
        let chronometer = Chronometer::start_with_writer(Duration::from_millis(10), buffer.clone());
        thread::sleep(Duration::from_millis(120));
        chronometer.stop();

        let output = buffer.contents();
        assert!(output.lines().count() >= 2, "output: {:?}", output);
        assert!(output.contains("Elapsed time"));
    }

    #[test]
    fn test_stop_silences_ticker() {
        let buffer = SharedBuffer::default();
        let chronometer = Chronometer::start_with_writer(Duration::from_millis(10), buffer.clone());
        let elapsed = chronometer.stop();
        assert!(elapsed < JOIN_TIMEOUT);

        let lines = buffer.contents().lines().count();
        thread::sleep(Duration::from_millis(50));
        assert_eq!(buffer.contents().lines().count(), lines);
    }

    #[test]
    fn test_drop_clears_flag() {
        let chronometer = Chronometer::start_with_writer(Duration::from_secs(1), io::sink());
        let flag = Arc::clone(&chronometer.running);
        assert!(flag.load(Ordering::Acquire));
        drop(chronometer);
        assert!(!flag.load(Ordering::Acquire));
    }
}
