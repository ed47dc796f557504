use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

/// Called from the clock task after each tick is queued, e.g. to wake a UI loop.
pub type TickHook = Arc<dyn Fn() + Send + Sync>;

/// A running tick source. Dropping it cancels the timer task and discards undelivered ticks.
///
/// Must be started from within a tokio runtime.
pub struct GameClock {
    handle: JoinHandle<()>,
    interval_tx: watch::Sender<Duration>,
    tick_rx: mpsc::UnboundedReceiver<()>,
}

impl GameClock {
    pub fn start(period: Duration, on_tick: Option<TickHook>) -> Self {
        let (interval_tx, interval_rx) = watch::channel(period);
        let (tick_tx, tick_rx) = mpsc::unbounded_channel();
        let handle = tokio::spawn(run_clock(interval_rx, tick_tx, on_tick));
        Self {
            handle,
            interval_tx,
            tick_rx,
        }
    }

    /// Changes the period. The next tick is scheduled one new period from now.
    pub fn set_interval(&self, period: Duration) {
        self.interval_tx.send_if_modified(|current| {
            if *current == period {
                return false;
            }
            *current = period;
            true
        });
    }

    pub fn interval(&self) -> Duration {
        *self.interval_tx.borrow()
    }

    /// Takes every tick delivered so far and returns how many there were.
    pub fn drain(&mut self) -> usize {
        let mut ticks = 0;
        while self.tick_rx.try_recv().is_ok() {
            ticks += 1;
        }
        ticks
    }

    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }
}

impl Drop for GameClock {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn run_clock(
    mut interval_rx: watch::Receiver<Duration>,
    tick_tx: mpsc::UnboundedSender<()>,
    on_tick: Option<TickHook>,
) {
    loop {
        let period = *interval_rx.borrow_and_update();
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if tick_tx.send(()).is_err() {
                        return;
                    }
                    if let Some(hook) = &on_tick {
                        hook();
                    }
                }
                changed = interval_rx.changed() => {
                    if changed.is_err() {
                        return;
                    }
                    break;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test(start_paused = true)]
    async fn test_ticks_at_interval() {
        let mut clock = GameClock::start(Duration::from_millis(100), None);
        tokio::time::sleep(Duration::from_millis(350)).await;
        assert_eq!(clock.drain(), 3);
        assert_eq!(clock.drain(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_hook_runs_per_tick() {
        let counter = Arc::new(AtomicUsize::new(0));
        let hook_counter = counter.clone();
        let hook: TickHook = Arc::new(move || {
            hook_counter.fetch_add(1, Ordering::SeqCst);
        });
        let _clock = GameClock::start(Duration::from_millis(50), Some(hook));
        tokio::time::sleep(Duration::from_millis(220)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_interval_change_applies() {
        let mut clock = GameClock::start(Duration::from_millis(100), None);
        tokio::time::sleep(Duration::from_millis(150)).await;
        assert_eq!(clock.drain(), 1);

        clock.set_interval(Duration::from_millis(20));
        assert_eq!(clock.interval(), Duration::from_millis(20));
        tokio::time::sleep(Duration::from_millis(110)).await;
        assert_eq!(clock.drain(), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_stops_ticking() {
        let counter = Arc::new(AtomicUsize::new(0));
        let hook_counter = counter.clone();
        let hook: TickHook = Arc::new(move || {
            hook_counter.fetch_add(1, Ordering::SeqCst);
        });
        let clock = GameClock::start(Duration::from_millis(10), Some(hook));
        tokio::time::sleep(Duration::from_millis(35)).await;
        drop(clock);
        let seen = counter.load(Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(counter.load(Ordering::SeqCst), seen);
    }
}
