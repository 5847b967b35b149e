use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use tracing::{debug, warn};

const STOP_POLL_SLICE: Duration = Duration::from_millis(20);

/// A recurring tick owned by exactly one timer view or session.
///
/// The callback runs on a dedicated thread once per `period`. Stopping or
/// dropping the ticker signals the thread and joins it, so no tick fires
/// after the owner is gone.
pub struct Ticker {
    stop: Arc<AtomicBool>,
    join: Option<JoinHandle<()>>,
}

impl Ticker {
    pub fn start<F>(period: Duration, on_tick: F) -> Result<Self>
    where
        F: FnMut() + Send + 'static,
    {
        let period = period.max(Duration::from_millis(1));
        let stop = Arc::new(AtomicBool::new(false));
        let stop_for_thread = Arc::clone(&stop);
        let join = thread::Builder::new()
            .name("beatsomnia-ticker".to_string())
            .spawn(move || run_tick_loop(period, stop_for_thread, on_tick))
            .context("failed to spawn ticker thread")?;
        debug!(period_ms = period.as_millis() as u64, "ticker started");
        Ok(Self {
            stop,
            join: Some(join),
        })
    }

    pub fn is_running(&self) -> bool {
        self.join.is_some()
    }

    pub fn stop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(join) = self.join.take() {
            match join.join() {
                Ok(()) => debug!("ticker stopped"),
                Err(_) => warn!("ticker thread panicked"),
            }
        }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.stop();
    }
}

fn run_tick_loop<F>(period: Duration, stop: Arc<AtomicBool>, mut on_tick: F)
where
    F: FnMut(),
{
    let mut next_tick = Instant::now() + period;
    while !stop.load(Ordering::Relaxed) {
        let now = Instant::now();
        if now < next_tick {
            thread::sleep(next_tick.saturating_duration_since(now).min(STOP_POLL_SLICE));
            continue;
        }
        on_tick();
        next_tick += period;
        // a stalled thread resumes from now instead of firing a burst
        if next_tick < now {
            next_tick = now + period;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;
    use std::sync::mpsc;

    use super::*;

    #[test]
    fn delivers_ticks_until_dropped() {
        let (tx, rx) = mpsc::channel();
        let ticker = Ticker::start(Duration::from_millis(5), move || {
            let _ = tx.send(());
        })
        .expect("ticker starts");
        for _ in 0..3 {
            rx.recv_timeout(Duration::from_secs(2)).expect("tick arrives");
        }
        drop(ticker);

        // the callback (and its sender) is gone once the thread is joined
        while rx.try_recv().is_ok() {}
        assert_eq!(rx.try_recv(), Err(mpsc::TryRecvError::Disconnected));
    }

    #[test]
    fn stop_is_idempotent_and_halts_ticks() {
        let count = Arc::new(AtomicUsize::new(0));
        let count_for_tick = Arc::clone(&count);
        let mut ticker = Ticker::start(Duration::from_millis(2), move || {
            count_for_tick.fetch_add(1, Ordering::Relaxed);
        })
        .expect("ticker starts");
        thread::sleep(Duration::from_millis(30));
        ticker.stop();
        ticker.stop();
        assert!(!ticker.is_running());

        let after_stop = count.load(Ordering::Relaxed);
        thread::sleep(Duration::from_millis(30));
        assert_eq!(count.load(Ordering::Relaxed), after_stop);
    }

    #[test]
    fn panicking_callback_still_releases_the_thread() {
        let mut ticker = Ticker::start(Duration::from_millis(1), || panic!("tick failed"))
            .expect("ticker starts");
        thread::sleep(Duration::from_millis(20));
        ticker.stop();
        assert!(!ticker.is_running());
    }
}
