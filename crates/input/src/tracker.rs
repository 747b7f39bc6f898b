//! Held-key tracking for terminal environments.
//!
//! Terminals that do not emit key release events are handled with a timeout:
//! a held action expires when neither a press nor a repeat has refreshed it
//! recently. As soon as one release event arrives the terminal is known to
//! report them and the timeout is no longer applied.
//!
//! Auto-repeat on such terminals also arrives as plain presses, so a toggle
//! press inside the hold window of the previous one is ignored.

use arrayvec::ArrayVec;

use crate::types::{InputState, MoveAction, DEFAULT_KEY_HOLD_TIMEOUT_MS};

#[derive(Debug, Clone, Copy)]
struct Held {
    action: MoveAction,
    last_seen_ms: u64,
}

/// Tracks which movement actions are held and samples them once per frame.
#[derive(Debug, Clone)]
pub struct InputTracker {
    held: ArrayVec<Held, 6>,
    /// Last press of each toggle still inside its hold window.
    toggles: ArrayVec<Held, 2>,
    hold_timeout_ms: u32,
    release_events_seen: bool,
}

impl InputTracker {
    pub fn new() -> Self {
        Self::with_hold_timeout_ms(DEFAULT_KEY_HOLD_TIMEOUT_MS)
    }

    pub fn with_hold_timeout_ms(hold_timeout_ms: u32) -> Self {
        Self {
            held: ArrayVec::new(),
            toggles: ArrayVec::new(),
            hold_timeout_ms,
            release_events_seen: false,
        }
    }

    pub fn hold_timeout_ms(&self) -> u32 {
        self.hold_timeout_ms
    }

    /// True once the terminal has delivered a key release event.
    pub fn reports_releases(&self) -> bool {
        self.release_events_seen
    }

    /// Record a key press.
    ///
    /// Toggles are returned so the caller can apply them once; movement
    /// actions become held and return `None`. A toggle pressed again before
    /// its hold window lapses is treated as a repeat and returns `None`.
    pub fn press(&mut self, action: MoveAction, now_ms: u64) -> Option<MoveAction> {
        if action.is_toggle() {
            return self.press_toggle(action, now_ms);
        }
        self.refresh(action, now_ms);
        None
    }

    /// Record an auto-repeat. Keeps a held action alive; toggles do not
    /// fire again.
    pub fn repeat(&mut self, action: MoveAction, now_ms: u64) {
        if action.is_toggle() {
            if let Some(t) = self.toggles.iter_mut().find(|t| t.action == action) {
                t.last_seen_ms = now_ms;
            }
        } else {
            self.refresh(action, now_ms);
        }
    }

    pub fn release(&mut self, action: MoveAction) {
        self.release_events_seen = true;
        self.held.retain(|h| h.action != action);
        self.toggles.retain(|t| t.action != action);
    }

    pub fn is_held(&self, action: MoveAction) -> bool {
        self.held.iter().any(|h| h.action == action)
    }

    /// Sample the held state for this frame, expiring stale holds first when
    /// the terminal does not report releases.
    pub fn snapshot(&mut self, now_ms: u64) -> InputState {
        if !self.release_events_seen {
            let timeout = self.hold_timeout_ms as u64;
            self.held
                .retain(|h| now_ms.saturating_sub(h.last_seen_ms) <= timeout);
        }

        let mut state = InputState::default();
        for h in &self.held {
            state.set(h.action, true);
        }
        state
    }

    /// Drop every held action (e.g. on focus loss).
    pub fn reset(&mut self) {
        self.held.clear();
        self.toggles.clear();
    }

    fn press_toggle(&mut self, action: MoveAction, now_ms: u64) -> Option<MoveAction> {
        let timeout = self.hold_timeout_ms as u64;
        if let Some(t) = self.toggles.iter_mut().find(|t| t.action == action) {
            let repeated = now_ms.saturating_sub(t.last_seen_ms) <= timeout;
            t.last_seen_ms = now_ms;
            return if repeated { None } else { Some(action) };
        }
        // Two toggle actions fit exactly.
        let _ = self.toggles.try_push(Held {
            action,
            last_seen_ms: now_ms,
        });
        Some(action)
    }

    fn refresh(&mut self, action: MoveAction, now_ms: u64) {
        if let Some(h) = self.held.iter_mut().find(|h| h.action == action) {
            h.last_seen_ms = now_ms;
            return;
        }
        // Six movement actions fit exactly; toggles never reach here.
        let _ = self.held.try_push(Held {
            action,
            last_seen_ms: now_ms,
        });
    }
}

impl Default for InputTracker {
    fn default() -> Self {
        Self::new()
    }
}
