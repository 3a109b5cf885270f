//! Background filter I/O
//!
//! Load and save run off the UI thread so the event loop never blocks on
//! disk. Results come back over mpsc channels drained from the Tick
//! handler. There is at most one load (fired on startup) and one
//! in-flight save; a newer save simply replaces the tracking of an older
//! one, since saves are fire-and-forget.

use crate::services::FilterBackend;
use anyhow::{anyhow, Result};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use std::thread;

/// Tracks in-flight background filter I/O.
#[derive(Default)]
pub struct IoJobs {
    load: Option<Receiver<Result<Vec<String>>>>,
    save: Option<Receiver<Result<()>>>,
}

impl IoJobs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Kick off the one-shot initial load.
    pub fn spawn_load(&mut self, backend: Arc<dyn FilterBackend>) {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let _ = tx.send(backend.load());
        });
        self.load = Some(rx);
    }

    /// Kick off a fire-and-forget save of the exported lines.
    pub fn spawn_save(&mut self, backend: Arc<dyn FilterBackend>, lines: Vec<String>) {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let _ = tx.send(backend.save(&lines));
        });
        self.save = Some(rx);
    }

    /// Completed load result, if the worker has finished.
    pub fn poll_load(&mut self) -> Option<Result<Vec<String>>> {
        let outcome = Self::poll(self.load.as_ref()?, "load");
        if outcome.is_some() {
            self.load = None;
        }
        outcome
    }

    /// Completed save result, if the worker has finished.
    pub fn poll_save(&mut self) -> Option<Result<()>> {
        let outcome = Self::poll(self.save.as_ref()?, "save");
        if outcome.is_some() {
            self.save = None;
        }
        outcome
    }

    fn poll<T>(rx: &Receiver<Result<T>>, what: &str) -> Option<Result<T>> {
        match rx.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                Some(Err(anyhow!("{} worker exited without a result", what)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::time::{Duration, Instant};

    struct FakeBackend {
        lines: Vec<String>,
        saved: Mutex<Option<Vec<String>>>,
        fail: bool,
    }

    impl FakeBackend {
        fn new(lines: &[&str]) -> Self {
            Self {
                lines: lines.iter().map(|s| s.to_string()).collect(),
                saved: Mutex::new(None),
                fail: false,
            }
        }
    }

    impl FilterBackend for FakeBackend {
        fn load(&self) -> Result<Vec<String>> {
            if self.fail {
                return Err(anyhow!("backend unavailable"));
            }
            Ok(self.lines.clone())
        }

        fn save(&self, lines: &[String]) -> Result<()> {
            if self.fail {
                return Err(anyhow!("backend unavailable"));
            }
            *self.saved.lock().unwrap() = Some(lines.to_vec());
            Ok(())
        }

        fn describe(&self) -> String {
            "fake".to_string()
        }
    }

    fn wait_for<T>(mut poll: impl FnMut() -> Option<T>) -> T {
        let deadline = Instant::now() + Duration::from_secs(2);
        loop {
            if let Some(value) = poll() {
                return value;
            }
            assert!(Instant::now() < deadline, "worker did not finish in time");
            thread::sleep(Duration::from_millis(1));
        }
    }

    #[test]
    fn test_load_delivers_lines() {
        let mut jobs = IoJobs::new();
        jobs.spawn_load(Arc::new(FakeBackend::new(&["+ /a", "- /b"])));

        let lines = wait_for(|| jobs.poll_load()).unwrap();
        assert_eq!(lines, vec!["+ /a".to_string(), "- /b".to_string()]);
        // The result is consumed; later polls stay quiet.
        assert!(jobs.poll_load().is_none());
    }

    #[test]
    fn test_load_failure_is_reported() {
        let mut jobs = IoJobs::new();
        let mut backend = FakeBackend::new(&[]);
        backend.fail = true;
        jobs.spawn_load(Arc::new(backend));

        let result = wait_for(|| jobs.poll_load());
        assert!(result.is_err());
    }

    #[test]
    fn test_save_reaches_backend() {
        let mut jobs = IoJobs::new();
        let backend = Arc::new(FakeBackend::new(&[]));
        jobs.spawn_save(backend.clone(), vec!["+ /x".to_string()]);

        wait_for(|| jobs.poll_save()).unwrap();
        assert_eq!(
            backend.saved.lock().unwrap().as_deref(),
            Some(&["+ /x".to_string()][..])
        );
    }

    #[test]
    fn test_poll_without_jobs_is_quiet() {
        let mut jobs = IoJobs::new();
        assert!(jobs.poll_load().is_none());
        assert!(jobs.poll_save().is_none());
    }
}
