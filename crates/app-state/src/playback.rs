//! Playback transport: play/pause, scrubbing, rate. Times are effective.

use rc_common::{PlaybackConfig, TimeCode};
use serde::{Deserialize, Serialize};

/// Current playback mode.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackMode {
    /// Playhead parked, nothing running.
    #[default]
    Stopped,
    /// Playing forward at the configured rate.
    Playing,
    /// Paused at the current position.
    Paused,
    /// User is dragging the playhead.
    Scrubbing,
}

/// Playback state on the edited timeline.
///
/// `current_time` is always in effective time; the media player's own
/// position is derived from it through the edit mapping.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlaybackState {
    pub mode: PlaybackMode,
    pub current_time: TimeCode,
    /// Speed multiplier: 1.0 = normal.
    pub playback_rate: f64,
    /// Whether playback should resume when the current scrub ends.
    #[serde(skip)]
    resume_after_scrub: bool,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self::new()
    }
}

impl PlaybackState {
    /// Stopped at time 0, normal speed.
    pub fn new() -> Self {
        Self {
            mode: PlaybackMode::Stopped,
            current_time: TimeCode::ZERO,
            playback_rate: 1.0,
            resume_after_scrub: false,
        }
    }

    pub fn play(&mut self) {
        self.mode = PlaybackMode::Playing;
        tracing::debug!(time = %self.current_time, rate = self.playback_rate, "Playback started");
    }

    pub fn pause(&mut self) {
        self.mode = PlaybackMode::Paused;
        tracing::debug!(time = %self.current_time, "Playback paused");
    }

    /// Stop and park the playhead at the start.
    pub fn stop(&mut self) {
        self.mode = PlaybackMode::Stopped;
        self.current_time = TimeCode::ZERO;
        self.resume_after_scrub = false;
        tracing::debug!("Playback stopped");
    }

    /// Toggle between playing and paused. Stopped or scrubbing starts playing.
    pub fn toggle_play_pause(&mut self) {
        match self.mode {
            PlaybackMode::Playing => self.pause(),
            PlaybackMode::Paused | PlaybackMode::Stopped | PlaybackMode::Scrubbing => self.play(),
        }
    }

    /// Move the playhead, clamped into `[0, duration]`. A stopped transport
    /// becomes paused.
    pub fn seek(&mut self, time: TimeCode, duration: f64) {
        self.current_time = time.clamp(0.0, duration.max(0.0));
        if self.mode == PlaybackMode::Stopped {
            self.mode = PlaybackMode::Paused;
        }
        tracing::debug!(time = %self.current_time, "Seeked");
    }

    /// Begin scrubbing at `time`. Playback is suspended until [`end_scrub`].
    ///
    /// [`end_scrub`]: Self::end_scrub
    pub fn start_scrub(&mut self, time: TimeCode, duration: f64) {
        if self.mode != PlaybackMode::Scrubbing {
            self.resume_after_scrub = self.mode == PlaybackMode::Playing;
        }
        self.mode = PlaybackMode::Scrubbing;
        self.current_time = time.clamp(0.0, duration.max(0.0));
    }

    /// Update position during scrubbing. Ignored outside a scrub.
    pub fn scrub_to(&mut self, time: TimeCode, duration: f64) {
        if self.mode == PlaybackMode::Scrubbing {
            self.current_time = time.clamp(0.0, duration.max(0.0));
        }
    }

    /// End scrubbing; resume playing if the scrub interrupted playback.
    pub fn end_scrub(&mut self) {
        if self.mode != PlaybackMode::Scrubbing {
            return;
        }
        self.mode = if self.resume_after_scrub {
            PlaybackMode::Playing
        } else {
            PlaybackMode::Paused
        };
        self.resume_after_scrub = false;
        tracing::debug!(time = %self.current_time, mode = ?self.mode, "Scrub ended");
    }

    /// Set the playback rate, clamped to the configured range.
    pub fn set_rate(&mut self, rate: f64, limits: &PlaybackConfig) {
        let rate = if rate.is_finite() { rate } else { 1.0 };
        self.playback_rate = rate.clamp(limits.min_rate, limits.max_rate);
        tracing::debug!(rate = self.playback_rate, "Playback rate set");
    }

    /// Whether the transport is moving the playhead (playing or scrubbing).
    pub fn is_active(&self) -> bool {
        matches!(self.mode, PlaybackMode::Playing | PlaybackMode::Scrubbing)
    }

    pub fn is_at_end(&self, duration: f64) -> bool {
        self.current_time.as_secs() >= duration
    }
}
