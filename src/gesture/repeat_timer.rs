//! Repeating timer for press-and-hold gesture actions

use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Mutex, MutexGuard,
    },
    time::Duration,
};
use chrono::{DateTime, Utc};
use tokio::{
    task::JoinHandle,
    time::{interval_at, Instant, MissedTickBehavior},
};
use tracing::{debug, warn};

use crate::state::TimerState;

/// Default time between two ticks of a held gesture
pub const DEFAULT_REPEAT_INTERVAL: Duration = Duration::from_millis(400);

/// Shortest interval the timer will schedule; smaller values are clamped
pub const MIN_REPEAT_INTERVAL: Duration = Duration::from_millis(10);

/// One registered recurring schedule
#[derive(Debug)]
struct Registration {
    started_at: Instant,
    started_at_utc: DateTime<Utc>,
    /// Cleared on stop; checked before every tick
    live: Arc<AtomicBool>,
    ticker: JoinHandle<()>,
}

impl Registration {
    fn cancel(self) {
        self.live.store(false, Ordering::Release);
        self.ticker.abort();
    }
}

/// Repeatedly invokes an action at a fixed interval while active.
///
/// The timer is either idle or active. `start` while active and `stop` while
/// idle are no-ops, so at most one schedule is ever registered. Dropping the
/// timer cancels the schedule.
///
/// Hold the timer in an `Arc` (see [`RepeatGestureTimer::shared`]) when it must
/// be reachable from several gesture handlers, or from inside its own action.
/// A shared timer is meant for one outstanding gesture at a time; two
/// independent gestures must not drive the same instance.
#[derive(Debug)]
pub struct RepeatGestureTimer {
    repeat_interval: Mutex<Duration>,
    registration: Mutex<Option<Registration>>,
}

impl RepeatGestureTimer {
    /// Create an idle timer with the given repeat interval
    pub fn new(repeat_interval: Duration) -> Self {
        Self {
            repeat_interval: Mutex::new(clamp_interval(repeat_interval)),
            registration: Mutex::new(None),
        }
    }

    /// Create the shared instance handed out by the composition point
    pub fn shared(repeat_interval: Duration) -> Arc<Self> {
        Arc::new(Self::new(repeat_interval))
    }

    pub fn repeat_interval(&self) -> Duration {
        *lock(&self.repeat_interval)
    }

    /// Change the repeat interval. An active schedule keeps its interval
    /// until it is stopped and started again.
    pub fn set_repeat_interval(&self, repeat_interval: Duration) {
        *lock(&self.repeat_interval) = clamp_interval(repeat_interval);
    }

    pub fn is_active(&self) -> bool {
        lock(&self.registration).is_some()
    }

    /// Time since the timer was started, or `None` while idle
    pub fn elapsed(&self) -> Option<Duration> {
        lock(&self.registration)
            .as_ref()
            .map(|registration| registration.started_at.elapsed())
    }

    /// Start invoking `action` every repeat interval.
    ///
    /// The first tick fires one interval after the call. Does nothing if the
    /// timer is already active. Must be called within a Tokio runtime.
    pub fn start<F>(&self, action: F)
    where
        F: FnMut() + Send + 'static,
    {
        self.try_start(action);
    }

    /// Like [`start`](Self::start), but reports whether this call registered
    /// the schedule. `false` means the timer was already active and `action`
    /// was dropped without running.
    pub fn try_start<F>(&self, action: F) -> bool
    where
        F: FnMut() + Send + 'static,
    {
        self.register(action, false)
    }

    /// Register a schedule whose first tick fires right away, then every
    /// repeat interval. The immediate tick runs on the tick task, so it never
    /// overlaps later ticks. Returns `false` if the timer was already active.
    pub fn try_start_immediate<F>(&self, action: F) -> bool
    where
        F: FnMut() + Send + 'static,
    {
        self.register(action, true)
    }

    fn register<F>(&self, mut action: F, immediate: bool) -> bool
    where
        F: FnMut() + Send + 'static,
    {
        let mut registration = lock(&self.registration);
        if registration.is_some() {
            debug!("Repeat timer already active, ignoring start");
            return false;
        }

        let period = self.repeat_interval();
        let started_at = Instant::now();
        let first_tick = if immediate { started_at } else { started_at + period };
        let live = Arc::new(AtomicBool::new(true));

        let ticker_live = Arc::clone(&live);
        let ticker = tokio::spawn(async move {
            let mut ticks = interval_at(first_tick, period);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                ticks.tick().await;
                if !ticker_live.load(Ordering::Acquire) {
                    break;
                }
                action();
            }
        });

        debug!("Repeat timer started with interval {:?}", period);
        *registration = Some(Registration {
            started_at,
            started_at_utc: Utc::now(),
            live,
            ticker,
        });
        true
    }

    /// Cancel the active schedule, if any
    pub fn stop(&self) {
        // Take the registration out before cancelling so the lock is not held
        // while aborting, which may be the calling task itself.
        let registration = lock(&self.registration).take();
        if let Some(registration) = registration {
            debug!(
                "Repeat timer stopped after {:?}",
                registration.started_at.elapsed()
            );
            registration.cancel();
        }
    }

    /// Cancel the active schedule only if it has been running for at least
    /// `max_held`. The check and the cancellation happen under one lock, so a
    /// schedule registered after the caller last looked is never affected.
    /// Returns how long the cancelled schedule ran.
    pub fn stop_if_held_longer(&self, max_held: Duration) -> Option<Duration> {
        let registration = {
            let mut registration = lock(&self.registration);
            let expired = registration
                .as_ref()
                .map_or(false, |active| active.started_at.elapsed() >= max_held);
            if expired { registration.take() } else { None }
        }?;

        let held = registration.started_at.elapsed();
        debug!("Repeat timer stopped after {:?}, limit {:?}", held, max_held);
        registration.cancel();
        Some(held)
    }

    /// Serializable view of the timer
    pub fn snapshot(&self) -> TimerState {
        let repeat_interval = self.repeat_interval();
        match lock(&self.registration).as_ref() {
            Some(registration) => TimerState::active(
                registration.started_at.elapsed(),
                repeat_interval,
                registration.started_at_utc,
            ),
            None => TimerState::inactive(repeat_interval),
        }
    }
}

impl Default for RepeatGestureTimer {
    fn default() -> Self {
        Self::new(DEFAULT_REPEAT_INTERVAL)
    }
}

impl Drop for RepeatGestureTimer {
    fn drop(&mut self) {
        let registration = match self.registration.get_mut() {
            Ok(registration) => registration.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };
        if let Some(registration) = registration {
            registration.cancel();
        }
    }
}

fn clamp_interval(repeat_interval: Duration) -> Duration {
    if repeat_interval < MIN_REPEAT_INTERVAL {
        warn!(
            "Repeat interval {:?} is below the minimum, using {:?}",
            repeat_interval, MIN_REPEAT_INTERVAL
        );
        MIN_REPEAT_INTERVAL
    } else {
        repeat_interval
    }
}

// Actions never run under these locks, so a poisoned guard still holds consistent state.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
