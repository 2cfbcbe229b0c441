//! Forwarding of interrupt signals from the dispatcher to a running child

#[cfg(not(unix))]
pub use fallback::SignalRelay;
#[cfg(unix)]
pub use unix::SignalRelay;

#[cfg(unix)]
mod unix {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread::JoinHandle;

    use log::{debug, warn};
    use nix::sys::signal::{Signal, kill};
    use nix::unistd::Pid;
    use signal_hook::consts::{SIGINT, SIGTERM};
    use signal_hook::iterator::Signals;
    use signal_hook::iterator::backend::Handle;

    use crate::style::Paint;

    /// Listens for `SIGINT`/`SIGTERM` on a background thread and relays the
    /// first one to the child process. Armed after spawn; must be stopped as
    /// soon as the child has been waited on so no listener outlives it.
    pub struct SignalRelay {
        handle: Handle,
        thread: Option<JoinHandle<()>>,
        forwards: Arc<AtomicUsize>,
    }

    impl SignalRelay {
        /// Start the listener thread, relaying to the process `pid`.
        ///
        /// # Errors
        ///
        /// Returns an error if the signal iterator cannot be registered.
        pub fn arm(pid: u32) -> std::io::Result<Self> {
            #[allow(clippy::cast_possible_wrap)]
            let child = Pid::from_raw(pid as i32);
            let mut signals = Signals::new([SIGINT, SIGTERM])?;
            let handle = signals.handle();
            let forwards = Arc::new(AtomicUsize::new(0));
            let counter = Arc::clone(&forwards);
            let thread = std::thread::spawn(move || {
                let mut relayed = false;
                for sig in signals.forever() {
                    if relayed {
                        debug!("Ignoring additional signal {sig}");
                        continue;
                    }
                    relayed = true;
                    counter.fetch_add(1, Ordering::SeqCst);
                    let Ok(signal) = Signal::try_from(sig) else {
                        warn!("Received unknown signal {sig}");
                        continue;
                    };
                    let paint = Paint::new();
                    eprintln!("\n{}", paint.note(&format!("Received signal: {signal}")));
                    if let Err(e) = kill(child, signal) {
                        // The child may already be gone; nothing to do
                        warn!("Unable to forward {signal} to {child}: {e}");
                    }
                }
            });
            Ok(Self {
                handle,
                thread: Some(thread),
                forwards,
            })
        }

        /// Number of signals relayed to the child so far.
        #[must_use]
        pub fn forward_count(&self) -> usize {
            self.forwards.load(Ordering::SeqCst)
        }

        /// Stop listening and join the listener thread.
        pub fn stop(mut self) {
            self.handle.close();
            if let Some(thread) = self.thread.take() {
                let _ = thread.join();
            }
        }
    }
}

#[cfg(not(unix))]
mod fallback {
    /// Signal forwarding is only available on unix targets; elsewhere the
    /// relay keeps the same surface and does nothing.
    pub struct SignalRelay;

    impl SignalRelay {
        /// Start a relay for the process `pid`.
        ///
        /// # Errors
        ///
        /// Never fails on this target.
        pub fn arm(_pid: u32) -> std::io::Result<Self> {
            Ok(Self)
        }

        /// Number of signals relayed to the child so far.
        #[must_use]
        pub fn forward_count(&self) -> usize {
            0
        }

        /// Stop listening.
        pub fn stop(self) {}
    }
}

// Raising real signals here would race the other unit tests in this
// process; forwarding itself is exercised end to end in tests/integration.rs
#[cfg(all(test, unix))]
mod tests {
    use std::process::Command;

    use super::SignalRelay;

    #[test]
    fn test_stop_terminates_listener() {
        let mut child = Command::new("sleep").arg("5").spawn().unwrap();
        let relay = SignalRelay::arm(child.id()).unwrap();
        assert_eq!(relay.forward_count(), 0);
        // Joins the listener thread; hangs here if close() does not end it
        relay.stop();
        child.kill().unwrap();
        child.wait().unwrap();
    }
}
