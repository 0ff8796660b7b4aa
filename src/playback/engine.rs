//! Cursor-based playback over a finished run

use super::clock::{Clock, SystemClock};
use crate::trace::{RunResult, Step, Summary};
use std::time::{Duration, Instant};
use tracing::{debug, trace, warn};

/// Delay between auto-advance ticks at 1x speed
pub const BASE_DELAY: Duration = Duration::from_millis(1000);
pub const MIN_SPEED: f64 = 0.25;
pub const MAX_SPEED: f64 = 3.0;
pub const DEFAULT_SPEED: f64 = 1.0;

/// Timing knobs for a [`PlaybackEngine`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackSettings {
    pub base_delay: Duration,
    pub default_speed: f64,
    pub min_speed: f64,
    pub max_speed: f64,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        PlaybackSettings {
            base_delay: BASE_DELAY,
            default_speed: DEFAULT_SPEED,
            min_speed: MIN_SPEED,
            max_speed: MAX_SPEED,
        }
    }
}

impl PlaybackSettings {
    /// Repair settings a caller built by hand.
    ///
    /// Speed bounds that are not finite and positive fall back to the
    /// defaults, inverted bounds are swapped, and a zero delay becomes
    /// [`BASE_DELAY`].
    pub fn normalized(self) -> Self {
        let valid = |s: f64| s.is_finite() && s > 0.0;
        let (mut min_speed, mut max_speed) = if valid(self.min_speed) && valid(self.max_speed) {
            (self.min_speed, self.max_speed)
        } else {
            (MIN_SPEED, MAX_SPEED)
        };
        if min_speed > max_speed {
            std::mem::swap(&mut min_speed, &mut max_speed);
        }
        let default_speed = if valid(self.default_speed) {
            self.default_speed
        } else {
            DEFAULT_SPEED
        };
        PlaybackSettings {
            base_delay: if self.base_delay.is_zero() { BASE_DELAY } else { self.base_delay },
            default_speed: default_speed.clamp(min_speed, max_speed),
            min_speed,
            max_speed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    /// Nothing loaded
    Idle,
    /// Loaded, paused before the last step
    Ready,
    Playing,
    /// Loaded, paused on the last step
    Finished,
}

/// Handle to the single armed auto-advance tick.
///
/// A token is only honoured while it is still the engine's pending tick;
/// every cancellation moves the engine to a new epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickToken {
    epoch: u64,
    due: Instant,
}

impl TickToken {
    pub fn due(&self) -> Instant {
        self.due
    }
}

/// Time-travel playback over the steps of one [`RunResult`]
#[derive(Debug)]
pub struct PlaybackEngine<C: Clock = SystemClock> {
    clock: C,
    settings: PlaybackSettings,
    /// Loaded run; `None` while idle
    run: Option<RunResult>,
    /// Position in the step list
    cursor: usize,
    playing: bool,
    speed: f64,
    /// Bumped on every cancellation so stale tokens are ignored
    epoch: u64,
    pending: Option<TickToken>,
}

impl PlaybackEngine<SystemClock> {
    pub fn new(settings: PlaybackSettings) -> Self {
        Self::with_clock(settings, SystemClock)
    }
}

impl Default for PlaybackEngine<SystemClock> {
    fn default() -> Self {
        Self::new(PlaybackSettings::default())
    }
}

impl<C: Clock> PlaybackEngine<C> {
    pub fn with_clock(settings: PlaybackSettings, clock: C) -> Self {
        let normalized = settings.normalized();
        if normalized != settings {
            warn!(?settings, "playback settings adjusted");
        }
        PlaybackEngine {
            clock,
            settings: normalized,
            run: None,
            cursor: 0,
            playing: false,
            speed: normalized.default_speed,
            epoch: 0,
            pending: None,
        }
    }

    /// Take ownership of a run and rewind to its first step
    pub fn load(&mut self, run: RunResult) {
        self.stop();
        self.cursor = 0;
        if run.is_empty() {
            debug!("loaded an empty run, engine is idle");
            self.run = None;
        } else {
            debug!(steps = run.len(), "run loaded");
            self.run = Some(run);
        }
    }

    /// Drop the loaded run
    pub fn unload(&mut self) {
        self.stop();
        self.cursor = 0;
        self.run = None;
        debug!("run unloaded");
    }

    pub fn play(&mut self) {
        let Some(last) = self.last_index() else {
            return;
        };
        if self.playing || self.cursor >= last {
            return;
        }
        self.playing = true;
        self.arm(self.clock.now());
        debug!(cursor = self.cursor, "playback started");
    }

    pub fn pause(&mut self) {
        if self.playing {
            self.stop();
            debug!(cursor = self.cursor, "playback paused");
        }
    }

    pub fn toggle(&mut self) {
        if self.playing {
            self.pause();
        } else {
            self.play();
        }
    }

    pub fn step_forward(&mut self) {
        self.move_to(self.cursor.saturating_add(1));
    }

    pub fn step_backward(&mut self) {
        self.move_to(self.cursor.saturating_sub(1));
    }

    /// Move the cursor to `index`, clamped to the loaded run
    pub fn seek(&mut self, index: usize) {
        self.move_to(index);
    }

    pub fn jump_to_end(&mut self) {
        self.move_to(usize::MAX);
    }

    /// Rewind to the first step and stop playback
    pub fn reset(&mut self) {
        self.stop();
        self.cursor = 0;
    }

    /// Change the playback multiplier; applies from the next armed tick
    pub fn set_speed(&mut self, multiplier: f64) {
        if !multiplier.is_finite() || multiplier <= 0.0 {
            warn!(multiplier, "ignoring invalid playback speed");
            return;
        }
        self.speed = multiplier.clamp(self.settings.min_speed, self.settings.max_speed);
        trace!(speed = self.speed, "speed changed");
    }

    /// Fire every tick that is due according to the clock.
    ///
    /// Returns the number of ticks fired.
    pub fn poll(&mut self) -> usize {
        let now = self.clock.now();
        let mut fired = 0;
        while let Some(token) = self.pending {
            if token.due > now {
                break;
            }
            if !self.fire(token) {
                break;
            }
            fired += 1;
        }
        fired
    }

    /// Fire one tick. Stale tokens are ignored and return `false`.
    pub fn fire(&mut self, token: TickToken) -> bool {
        if self.pending != Some(token) {
            trace!("stale tick ignored");
            return false;
        }
        self.pending = None;
        let Some(last) = self.last_index() else {
            self.stop();
            return true;
        };
        if self.cursor >= last {
            self.stop();
            return true;
        }
        self.cursor += 1;
        if self.cursor >= last {
            self.stop();
            debug!("playback reached the last step");
        } else {
            self.arm(token.due);
        }
        true
    }

    // ========== Getter methods for UI ==========

    /// Step under the cursor, `None` while idle
    pub fn current_step(&self) -> Option<&Step> {
        self.run.as_ref().and_then(|run| run.step(self.cursor))
    }

    /// Summary of the loaded run
    pub fn summary(&self) -> Option<Summary> {
        self.run.as_ref().map(RunResult::summary)
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of steps in the loaded run
    pub fn len(&self) -> usize {
        self.run.as_ref().map_or(0, RunResult::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn settings(&self) -> PlaybackSettings {
        self.settings
    }

    pub fn state(&self) -> PlaybackState {
        match self.last_index() {
            None => PlaybackState::Idle,
            Some(_) if self.playing => PlaybackState::Playing,
            Some(last) if self.cursor >= last => PlaybackState::Finished,
            Some(_) => PlaybackState::Ready,
        }
    }

    /// Interval between ticks at the current speed
    pub fn delay(&self) -> Duration {
        Duration::try_from_secs_f64(self.settings.base_delay.as_secs_f64() / self.speed).unwrap_or(Duration::MAX)
    }

    pub fn pending_tick(&self) -> Option<TickToken> {
        self.pending
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    // ========== Internals ==========

    fn last_index(&self) -> Option<usize> {
        self.run.as_ref().and_then(|run| run.len().checked_sub(1))
    }

    fn move_to(&mut self, target: usize) {
        let Some(last) = self.last_index() else {
            return;
        };
        self.cursor = target.min(last);
        if self.playing {
            if self.cursor >= last {
                self.stop();
            } else {
                self.arm(self.clock.now());
            }
        }
    }

    /// Replace any pending tick with one due a delay after `from`
    fn arm(&mut self, from: Instant) {
        let Some(due) = from.checked_add(self.delay()) else {
            warn!("tick deadline out of range, stopping playback");
            self.stop();
            return;
        };
        self.epoch += 1;
        self.pending = Some(TickToken { epoch: self.epoch, due });
    }

    fn stop(&mut self) {
        self.playing = false;
        self.epoch += 1;
        self.pending = None;
    }
}
