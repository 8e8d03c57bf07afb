//! Fixed inter-call pacing for rate-limited providers.

use std::future::Future;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;

/// Enforces a fixed delay between successive calls to one provider.
///
/// Calls go through [`Throttle::pace`], which holds an internal lock for the
/// whole call, so a `Throttle` shared behind an `Arc` serializes every caller
/// (a cron run and an HTTP-triggered run alike). The first call starts
/// immediately; every later one starts a full interval after the previous
/// call finished, whatever that call's outcome was.
#[derive(Debug)]
pub struct Throttle {
    interval: Duration,
    state: Mutex<ThrottleState>,
}

#[derive(Debug, Default)]
struct ThrottleState {
    last_finished: Option<Instant>,
    calls: u64,
}

impl Throttle {
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            state: Mutex::new(ThrottleState::default()),
        }
    }

    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Waits for the pacing slot, then runs `call` while holding it.
    pub async fn pace<F>(&self, call: F) -> F::Output
    where
        F: Future,
    {
        let mut state = self.state.lock().await;
        if let Some(finished) = state.last_finished {
            tokio::time::sleep_until(finished + self.interval).await;
        }
        state.calls += 1;

        let output = call.await;
        state.last_finished = Some(Instant::now());
        output
    }

    /// Number of calls admitted so far.
    pub async fn calls(&self) -> u64 {
        self.state.lock().await.calls
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[tokio::test(start_paused = true)]
    async fn first_call_is_not_delayed() {
        let throttle = Throttle::new(Duration::from_millis(1_100));
        let start = Instant::now();
        throttle.pace(async {}).await;
        assert_eq!(start.elapsed(), Duration::ZERO);
        assert_eq!(throttle.calls().await, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn later_calls_wait_the_full_interval() {
        let throttle = Throttle::new(Duration::from_millis(1_100));
        let start = Instant::now();
        for _ in 0..3 {
            throttle.pace(async {}).await;
        }
        assert!(start.elapsed() >= Duration::from_millis(2_200));
        assert!(start.elapsed() < Duration::from_millis(3_300));
    }

    #[tokio::test(start_paused = true)]
    async fn interval_counts_from_the_end_of_a_slow_call() {
        let throttle = Throttle::new(Duration::from_millis(1_000));
        let start = Instant::now();
        throttle
            .pace(tokio::time::sleep(Duration::from_millis(5_000)))
            .await;
        throttle.pace(async {}).await;
        assert!(start.elapsed() >= Duration::from_millis(6_000));
    }

    #[tokio::test(start_paused = true)]
    async fn shared_throttle_spaces_concurrent_callers() {
        let throttle = Arc::new(Throttle::new(Duration::from_millis(1_100)));
        let starts = Arc::new(Mutex::new(Vec::new()));

        let worker = |throttle: Arc<Throttle>, starts: Arc<Mutex<Vec<Instant>>>| async move {
            for _ in 0..2 {
                throttle
                    .pace(async {
                        starts.lock().await.push(Instant::now());
                    })
                    .await;
            }
        };
        tokio::join!(
            worker(Arc::clone(&throttle), Arc::clone(&starts)),
            worker(Arc::clone(&throttle), Arc::clone(&starts)),
        );

        let mut starts = starts.lock().await.clone();
        starts.sort();
        assert_eq!(starts.len(), 4);
        for pair in starts.windows(2) {
            assert!(pair[1] - pair[0] >= Duration::from_millis(1_100));
        }
    }
}
