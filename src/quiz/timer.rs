//! Per-question countdown
//!
//! A tokio task that emits one [`CountdownTick`] per period, tagged with the
//! countdown's id and the question it was started for. Dropping the
//! [`Countdown`] handle stops it.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::debug;

static NEXT_COUNTDOWN_ID: AtomicU64 = AtomicU64::new(1);

/// One elapsed period for the question at `question`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountdownTick {
    /// Id of the countdown that sent this tick
    pub countdown: u64,
    pub question: usize,
}

/// Handle to a running countdown task
#[derive(Debug)]
pub struct Countdown {
    id: u64,
    question: usize,
    cancel_tx: Option<oneshot::Sender<()>>,
    handle: JoinHandle<()>,
}

impl Countdown {
    /// Spawn a countdown for `question`. The first tick is sent one `period` after start.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(question: usize, period: Duration, tick_tx: mpsc::Sender<CountdownTick>) -> Self {
        let id = NEXT_COUNTDOWN_ID.fetch_add(1, Ordering::Relaxed);
        let (cancel_tx, mut cancel_rx) = oneshot::channel::<()>();

        let handle = tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = &mut cancel_rx => break,
                    _ = interval.tick() => {
                        if tick_tx.send(CountdownTick { countdown: id, question }).await.is_err() {
                            break;
                        }
                    }
                }
            }
            debug!("Countdown for question {} stopped", question + 1);
        });

        debug!(
            "Countdown for question {} started ({}ms period)",
            question + 1,
            period.as_millis()
        );

        Self {
            id,
            question,
            cancel_tx: Some(cancel_tx),
            handle,
        }
    }

    /// Unique id carried by every tick this countdown sends
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Whether `tick` was sent by this countdown
    pub fn owns(&self, tick: &CountdownTick) -> bool {
        tick.countdown == self.id && tick.question == self.question
    }

    /// Question index this countdown was started for
    pub fn question(&self) -> usize {
        self.question
    }

    /// Stop the countdown. Equivalent to dropping the handle.
    pub fn cancel(self) {}
}

impl Drop for Countdown {
    fn drop(&mut self) {
        if let Some(tx) = self.cancel_tx.take() {
            let _ = tx.send(());
        }
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::timeout;

    #[tokio::test]
    async fn test_ticks_carry_question_index() {
        let (tx, mut rx) = mpsc::channel(16);
        let countdown = Countdown::start(2, Duration::from_millis(10), tx);
        assert_eq!(countdown.question(), 2);

        for _ in 0..3 {
            let tick = timeout(Duration::from_secs(2), rx.recv())
                .await
                .expect("tick should arrive")
                .expect("channel open");
            assert_eq!(
                tick,
                CountdownTick {
                    countdown: countdown.id(),
                    question: 2
                }
            );
            assert!(countdown.owns(&tick));
        }
    }

    #[tokio::test]
    async fn test_ids_are_unique() {
        let (tx, _rx) = mpsc::channel(16);
        let first = Countdown::start(0, Duration::from_secs(1), tx.clone());
        let second = Countdown::start(0, Duration::from_secs(1), tx);
        assert_ne!(first.id(), second.id());

        let stale = CountdownTick {
            countdown: first.id(),
            question: 0,
        };
        assert!(!second.owns(&stale));
    }

    #[tokio::test]
    async fn test_first_tick_waits_one_period() {
        let (tx, mut rx) = mpsc::channel(16);
        let _countdown = Countdown::start(0, Duration::from_millis(200), tx);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_drop_stops_ticks() {
        let (tx, mut rx) = mpsc::channel(16);
        let countdown = Countdown::start(0, Duration::from_millis(10), tx);
        timeout(Duration::from_secs(2), rx.recv())
            .await
            .expect("tick should arrive");

        drop(countdown);

        // Already-queued ticks may still drain, then the sender is gone.
        let closed = timeout(Duration::from_secs(2), async {
            while rx.recv().await.is_some() {}
        })
        .await;
        assert!(closed.is_ok());
    }

    #[tokio::test]
    async fn test_cancel_closes_channel() {
        let (tx, mut rx) = mpsc::channel(16);
        let countdown = Countdown::start(1, Duration::from_millis(10), tx);
        countdown.cancel();

        let closed = timeout(Duration::from_secs(2), async {
            while rx.recv().await.is_some() {}
        })
        .await;
        assert!(closed.is_ok());
    }
}
