//! Main application state management

use std::{
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc, Mutex,
    },
    time::{Duration, Instant},
};
use chrono::{DateTime, Utc};
use tokio::sync::broadcast;
use tracing::{info, warn};

use crate::gesture::{RepeatGesture, RepeatGestureTimer, MIN_REPEAT_INTERVAL};
use super::{TickEvent, TimerState};

/// Top-level state of the gesture host. Owns the one shared repeat timer and
/// hands it to every handler by reference.
#[derive(Debug)]
pub struct AppState {
    /// Press-and-hold gesture driving the shared timer
    pub gesture: RepeatGesture,
    /// Holds longer than this are released by the watchdog
    pub max_hold: Option<Duration>,
    /// Tick counter of the current (or last) hold
    pub hold_ticks: Mutex<Arc<AtomicU64>>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
    /// Channel for tick notifications
    pub tick_tx: broadcast::Sender<TickEvent>,
}

impl AppState {
    /// Create a new AppState with an idle shared timer
    pub fn new(port: u16, host: String, repeat_interval: Duration, max_hold: Option<Duration>) -> Self {
        let (tick_tx, _) = broadcast::channel(100);

        Self {
            gesture: RepeatGesture::new(RepeatGestureTimer::shared(repeat_interval)),
            max_hold,
            hold_ticks: Mutex::new(Arc::new(AtomicU64::new(0))),
            start_time: Instant::now(),
            port,
            host,
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
            tick_tx,
        }
    }

    /// The shared repeat timer
    pub fn timer(&self) -> &Arc<RepeatGestureTimer> {
        self.gesture.timer()
    }

    /// Press the gesture. Returns `Ok(false)` if a hold is already in flight.
    pub fn press(&self) -> Result<bool, String> {
        let ticks = Arc::new(AtomicU64::new(0));
        let tick_tx = self.tick_tx.clone();

        let counter = Arc::clone(&ticks);
        let pressed = self.gesture.press(move || {
            let sequence = counter.fetch_add(1, Ordering::SeqCst) + 1;
            // No subscribers is fine
            let _ = tick_tx.send(TickEvent::new(sequence));
        });

        if pressed {
            *self.hold_ticks.lock()
                .map_err(|e| format!("Failed to lock hold ticks: {}", e))? = ticks;
            self.record_action("press")?;
        }
        Ok(pressed)
    }

    /// Release the gesture, returning how long it was held
    pub fn release(&self, reason: &str) -> Result<Option<Duration>, String> {
        let held = self.gesture.release();
        if held.is_some() {
            info!("Hold ended ({}) after {} ticks", reason, self.tick_count()?);
            self.record_action(reason)?;
        }
        Ok(held)
    }

    /// Release the hold only if it has run for at least `max_hold`
    pub fn release_overlong(&self, max_hold: Duration) -> Result<Option<Duration>, String> {
        let held = self.gesture.release_if_held_longer(max_hold);
        if held.is_some() {
            info!("Hold auto-released after {} ticks", self.tick_count()?);
            self.record_action("auto-release")?;
        }
        Ok(held)
    }

    /// Change the repeat interval used by the next hold
    pub fn set_repeat_interval(&self, repeat_interval: Duration) -> Result<(), String> {
        if repeat_interval < MIN_REPEAT_INTERVAL {
            return Err(format!(
                "Repeat interval must be at least {}ms",
                MIN_REPEAT_INTERVAL.as_millis()
            ));
        }

        info!("Setting repeat interval to {:?}", repeat_interval);
        self.timer().set_repeat_interval(repeat_interval);
        self.record_action("interval")
    }

    /// Get current timer state
    pub fn get_timer_state(&self) -> TimerState {
        self.timer().snapshot()
    }

    /// Ticks fired during the current (or last) hold
    pub fn tick_count(&self) -> Result<u64, String> {
        self.hold_ticks.lock()
            .map(|ticks| ticks.load(Ordering::SeqCst))
            .map_err(|e| format!("Failed to lock hold ticks: {}", e))
    }

    /// Subscribe to tick notifications
    pub fn subscribe_ticks(&self) -> broadcast::Receiver<TickEvent> {
        self.tick_tx.subscribe()
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        format_uptime(self.start_time.elapsed())
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }

    fn record_action(&self, action: &str) -> Result<(), String> {
        let mut last_action = self.last_action.lock()
            .map_err(|e| format!("Failed to lock last action: {}", e))?;
        *last_action = Some(action.to_string());
        drop(last_action);

        match self.last_action_time.lock() {
            Ok(mut last_time) => *last_time = Some(Utc::now()),
            Err(e) => warn!("Failed to record last action time: {}", e),
        }
        Ok(())
    }
}

fn format_uptime(duration: Duration) -> String {
    let hours = duration.as_secs() / 3600;
    let minutes = (duration.as_secs() % 3600) / 60;
    let seconds = duration.as_secs() % 60;

    if hours > 0 {
        format!("{}h {}m {}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}
