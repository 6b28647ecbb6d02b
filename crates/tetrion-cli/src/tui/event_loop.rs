use std::time::{Duration, Instant};

use crossterm::event;

use crate::tui::event::TuiEvent;

/// Event loop state management.
///
/// Manages the tick interval and returns the next event via `next()`.
/// Each tick reports the real time elapsed since the previous one, so a
/// slow frame is caught up on the next tick instead of being lost. A render
/// is requested after every tick or crossterm event.
#[derive(Debug)]
pub(super) struct EventLoop {
    tick_interval: Option<Duration>,
    last_tick: Instant,
    dirty: bool,
}

impl Default for EventLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl EventLoop {
    /// Creates a new `EventLoop` with tick events disabled.
    pub fn new() -> Self {
        Self {
            tick_interval: None,
            last_tick: Instant::now(),
            dirty: true, // Initial render is required on startup
        }
    }

    /// Sets the tick interval.
    ///
    /// Pass `None` to disable tick events.
    pub(super) fn set_tick_interval(&mut self, interval: Option<Duration>) {
        self.tick_interval = interval;
        self.last_tick = Instant::now();
    }

    /// Returns the next event.
    ///
    /// Blocks until the next tick is due or a crossterm event occurs.
    /// Without a tick interval, only waits for crossterm events.
    pub(super) fn next(&mut self) -> anyhow::Result<TuiEvent> {
        loop {
            let now = Instant::now();
            if let Some(tick_interval) = self.tick_interval {
                let elapsed = now.duration_since(self.last_tick);
                if elapsed >= tick_interval {
                    self.last_tick = now;
                    self.dirty = true;
                    return Ok(TuiEvent::Tick(elapsed));
                }
            }

            if self.dirty {
                self.dirty = false;
                return Ok(TuiEvent::Render);
            }

            if let Some(timeout) = self.compute_timeout(now)
                && !event::poll(timeout)?
            {
                continue;
            }

            self.dirty = true;
            return Ok(event::read()?.into());
        }
    }

    fn compute_timeout(&self, now: Instant) -> Option<Duration> {
        let next_tick_at = self.last_tick + self.tick_interval?;
        Some(next_tick_at.saturating_duration_since(now))
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;

    #[test]
    fn test_first_event_is_render() {
        let mut events = EventLoop::new();
        events.set_tick_interval(Some(Duration::from_secs(60)));
        assert!(events.next().unwrap().is_render());
    }

    #[test]
    fn test_tick_reports_elapsed_time() {
        let mut events = EventLoop::new();
        events.set_tick_interval(Some(Duration::from_millis(5)));
        events.dirty = false;
        thread::sleep(Duration::from_millis(10));
        let TuiEvent::Tick(elapsed) = events.next().unwrap() else {
            panic!("expected a tick");
        };
        assert!(elapsed >= Duration::from_millis(10));
        assert!(events.next().unwrap().is_render());
    }
}
