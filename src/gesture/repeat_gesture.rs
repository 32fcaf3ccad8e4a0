//! Press-and-hold adapter over a shared repeat timer

use std::{sync::Arc, time::Duration};
use tracing::{debug, info};

use super::RepeatGestureTimer;

/// Turns press/release gesture events into timer start/stop calls.
///
/// A press fires the action once right away and keeps firing it every repeat
/// interval until the gesture is released.
#[derive(Debug, Clone)]
pub struct RepeatGesture {
    timer: Arc<RepeatGestureTimer>,
}

impl RepeatGesture {
    pub fn new(timer: Arc<RepeatGestureTimer>) -> Self {
        Self { timer }
    }

    pub fn timer(&self) -> &Arc<RepeatGestureTimer> {
        &self.timer
    }

    /// Begin a hold. Returns `false` and does nothing if a hold is already in
    /// flight; the action of a dropped press never runs.
    pub fn press<F>(&self, action: F) -> bool
    where
        F: FnMut() + Send + 'static,
    {
        if !self.timer.try_start_immediate(action) {
            debug!("Gesture already held, ignoring press");
            return false;
        }

        info!(
            "Gesture pressed, repeating every {:?}",
            self.timer.repeat_interval()
        );
        true
    }

    /// End the hold and report how long it lasted
    pub fn release(&self) -> Option<Duration> {
        let held = self.timer.elapsed();
        self.timer.stop();

        match held {
            Some(held) => info!("Gesture released after {:?}", held),
            None => debug!("Release without an active hold"),
        }
        held
    }

    /// Release the hold only if it has lasted at least `max_held`. A hold
    /// pressed after the caller last checked is left alone.
    pub fn release_if_held_longer(&self, max_held: Duration) -> Option<Duration> {
        let held = self.timer.stop_if_held_longer(max_held)?;
        info!("Gesture released after {:?}, limit {:?}", held, max_held);
        Some(held)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::time::sleep;

    fn gesture(interval_ms: u64) -> RepeatGesture {
        RepeatGesture::new(RepeatGestureTimer::shared(Duration::from_millis(interval_ms)))
    }

    #[tokio::test(start_paused = true)]
    async fn press_fires_immediately_then_repeats() {
        let gesture = gesture(100);
        let count = Arc::new(AtomicUsize::new(0));

        let ticks = Arc::clone(&count);
        assert!(gesture.press(move || {
            ticks.fetch_add(1, Ordering::SeqCst);
        }));
        tokio::task::yield_now().await;
        assert_eq!(count.load(Ordering::SeqCst), 1);

        sleep(Duration::from_millis(250)).await;
        assert_eq!(count.load(Ordering::SeqCst), 3);

        let held = gesture.release().unwrap();
        assert!(held >= Duration::from_millis(250));
        assert!(!gesture.timer().is_active());
    }

    #[tokio::test(start_paused = true)]
    async fn second_press_is_dropped() {
        let gesture = gesture(100);
        let other = Arc::new(AtomicUsize::new(0));

        assert!(gesture.press(|| {}));

        let ticks = Arc::clone(&other);
        assert!(!gesture.press(move || {
            ticks.fetch_add(1, Ordering::SeqCst);
        }));

        sleep(Duration::from_millis(300)).await;
        gesture.release();
        assert_eq!(other.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn release_without_press_is_none() {
        let gesture = gesture(100);
        assert!(gesture.release().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn clones_share_one_timer() {
        let first = gesture(100);
        let second = first.clone();

        assert!(first.press(|| {}));
        assert!(second.timer().is_active());
        assert!(second.release().is_some());
        assert!(!first.timer().is_active());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn overlapping_presses_start_one_hold() {
        let gesture = gesture(1000);
        let (first_calls, second_calls) = (Arc::new(AtomicUsize::new(0)), Arc::new(AtomicUsize::new(0)));

        // The first tap is slow so the second press lands while it runs
        let ticks = Arc::clone(&first_calls);
        let first = gesture.press(move || {
            if ticks.fetch_add(1, Ordering::SeqCst) == 0 {
                std::thread::sleep(Duration::from_millis(200));
            }
        });

        sleep(Duration::from_millis(50)).await;
        let other = gesture.clone();
        let ticks = Arc::clone(&second_calls);
        let second = tokio::task::spawn_blocking(move || {
            other.press(move || {
                ticks.fetch_add(1, Ordering::SeqCst);
            })
        })
        .await
        .unwrap();

        assert!(first);
        assert!(!second);

        sleep(Duration::from_millis(300)).await;
        gesture.release();
        assert_eq!(first_calls.load(Ordering::SeqCst), 1);
        assert_eq!(second_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn release_if_held_longer_respects_limit() {
        let gesture = gesture(100);

        assert!(gesture.press(|| {}));
        sleep(Duration::from_millis(500)).await;
        assert!(gesture.release_if_held_longer(Duration::from_secs(1)).is_none());
        assert!(gesture.timer().is_active());

        sleep(Duration::from_millis(600)).await;
        assert!(gesture.release_if_held_longer(Duration::from_secs(1)).is_some());
        assert!(!gesture.timer().is_active());
    }
}
