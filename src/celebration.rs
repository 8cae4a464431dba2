//! Completion celebration: the "ta-dah" fanfare and the decorative scene.
//!
//! DESIGN
//! ======
//! The celebration owns its audio resource. An [`AudioBackend`] is handed in
//! at construction and asked for an [`AudioOutput`] the first time a sound is
//! needed; the output is then reused for the lifetime of the component. A
//! second trigger inside the debounce window is ignored.
//!
//! Audio failures are logged and reported as [`CelebrationOutcome::Failed`];
//! they never reach the game engine.

#[cfg(test)]
#[path = "celebration_test.rs"]
mod celebration_test;

use std::time::{Duration, Instant};

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::consts::{
    BALLOON_COUNT, CELEBRATION_DEBOUNCE_MS, COMPLETE_REVEAL_DELAY_MS, NOTE_ATTACK_SECS, NOTE_PEAK_GAIN,
    STAR_COUNT,
};
use crate::engine::Action;

// =============================================================================
// ERROR TYPE
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum AudioError {
    #[error("audio output unavailable: {0}")]
    Unavailable(String),
    #[error("failed to resume audio output: {0}")]
    Resume(String),
    #[error("failed to schedule note: {0}")]
    Schedule(String),
}

// =============================================================================
// NOTES
// =============================================================================

/// Oscillator shape of a note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Waveform {
    Sine,
    Square,
}

/// One scheduled tone on the output's clock.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Note {
    pub frequency_hz: f64,
    /// Start time in seconds on the output clock.
    pub start_secs: f64,
    pub duration_secs: f64,
    pub waveform: Waveform,
    pub peak_gain: f64,
}

impl Note {
    #[must_use]
    pub fn new(frequency_hz: f64, start_secs: f64, duration_secs: f64, waveform: Waveform) -> Self {
        Self { frequency_hz, start_secs, duration_secs, waveform, peak_gain: NOTE_PEAK_GAIN }
    }

    /// Envelope gain at time `t`: a linear ramp from 0 to `peak_gain` over the
    /// attack, then a linear ramp back to 0 at the end of the note.
    #[must_use]
    pub fn gain_at(&self, t: f64) -> f64 {
        let end = self.start_secs + self.duration_secs;
        if t <= self.start_secs || t >= end {
            return 0.0;
        }
        let attack_end = self.start_secs + NOTE_ATTACK_SECS.min(self.duration_secs);
        if t < attack_end {
            self.peak_gain * (t - self.start_secs) / (attack_end - self.start_secs)
        } else {
            self.peak_gain * (end - t) / (end - attack_end)
        }
    }
}

/// The fanfare: C5, E5, then G5 held with a C6 harmony, then five random
/// high sparkles.
pub fn fanfare<R: Rng + ?Sized>(start: f64, rng: &mut R) -> Vec<Note> {
    let mut notes = vec![
        Note::new(523.25, start, 0.15, Waveform::Square),
        Note::new(659.25, start + 0.15, 0.15, Waveform::Square),
        Note::new(783.99, start + 0.3, 0.5, Waveform::Square),
        Note::new(1046.5, start + 0.3, 0.5, Waveform::Sine),
    ];
    for i in 0..5u32 {
        let frequency = 1500.0 + rng.random::<f64>() * 1000.0;
        notes.push(Note::new(frequency, start + 0.5 + f64::from(i) * 0.1, 0.1, Waveform::Sine));
    }
    notes
}

/// Inaudible blip used to unlock audio on platforms that require a
/// user-gesture-initiated sound.
#[must_use]
pub fn silent_blip(start: f64) -> Note {
    Note { peak_gain: 0.0, ..Note::new(440.0, start, 0.001, Waveform::Sine) }
}

// =============================================================================
// AUDIO SEAM
// =============================================================================

/// An open audio output (for example a browser audio context).
pub trait AudioOutput {
    /// Whether the platform has suspended the output.
    fn is_suspended(&self) -> bool;
    /// Resume a suspended output.
    ///
    /// # Errors
    ///
    /// Returns `Resume` when the platform refuses.
    fn resume(&mut self) -> Result<(), AudioError>;
    /// Current time on the output clock, in seconds.
    fn current_time(&self) -> f64;
    /// Schedule one note.
    ///
    /// # Errors
    ///
    /// Returns `Schedule` when the note cannot be queued.
    fn play(&mut self, note: &Note) -> Result<(), AudioError>;
}

/// Factory for the audio output.
pub trait AudioBackend {
    type Output: AudioOutput;

    /// Open the output.
    ///
    /// # Errors
    ///
    /// Returns `Unavailable` when the platform has no audio.
    fn open(&mut self) -> Result<Self::Output, AudioError>;
}

// =============================================================================
// CELEBRATION
// =============================================================================

/// Result of a celebration trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CelebrationOutcome {
    /// The fanfare was scheduled.
    Played { notes: usize },
    /// A previous trigger is still inside the debounce window.
    Debounced,
    /// Audio failed; the failure was logged.
    Failed,
}

/// The celebration collaborator.
pub struct Celebration<B: AudioBackend, R: Rng = StdRng> {
    backend: B,
    output: Option<B::Output>,
    debounce: Duration,
    last_trigger: Option<Instant>,
    rng: R,
}

impl<B: AudioBackend> Celebration<B, StdRng> {
    /// Create a celebration over `backend`. No audio is opened yet.
    #[must_use]
    pub fn new(backend: B) -> Self {
        Self::with_rng(backend, StdRng::from_os_rng())
    }
}

impl<B: AudioBackend, R: Rng> Celebration<B, R> {
    /// Create a celebration drawing sparkle pitches and scene layout from `rng`.
    #[must_use]
    pub fn with_rng(backend: B, rng: R) -> Self {
        Self {
            backend,
            output: None,
            debounce: Duration::from_millis(CELEBRATION_DEBOUNCE_MS),
            last_trigger: None,
            rng,
        }
    }

    /// Whether the audio output has been opened.
    #[must_use]
    pub fn has_output(&self) -> bool {
        self.output.is_some()
    }

    /// React to engine actions; plays once per `Action::Completed`.
    pub fn handle_actions(&mut self, actions: &[Action]) -> Option<CelebrationOutcome> {
        self.handle_actions_at(actions, Instant::now())
    }

    /// [`Self::handle_actions`] with an explicit clock reading.
    pub fn handle_actions_at(&mut self, actions: &[Action], now: Instant) -> Option<CelebrationOutcome> {
        if actions.iter().any(|a| matches!(a, Action::Completed)) {
            Some(self.celebrate_at(now))
        } else {
            None
        }
    }

    /// Play the fanfare unless a previous trigger is inside the debounce window.
    pub fn celebrate(&mut self) -> CelebrationOutcome {
        self.celebrate_at(Instant::now())
    }

    /// [`Self::celebrate`] with an explicit clock reading.
    pub fn celebrate_at(&mut self, now: Instant) -> CelebrationOutcome {
        if let Some(last) = self.last_trigger {
            if now.saturating_duration_since(last) < self.debounce {
                debug!("celebration debounced");
                return CelebrationOutcome::Debounced;
            }
        }
        self.last_trigger = Some(now);

        match self.play_fanfare() {
            Ok(notes) => {
                info!(notes, "celebration played");
                CelebrationOutcome::Played { notes }
            }
            Err(e) => {
                warn!(error = %e, "celebration audio failed");
                CelebrationOutcome::Failed
            }
        }
    }

    /// Open and resume the output, then play an inaudible blip.
    ///
    /// Hosts call this from the first user gesture.
    ///
    /// # Errors
    ///
    /// Propagates the backend failure.
    pub fn unlock(&mut self) -> Result<(), AudioError> {
        let output = Self::acquire(&mut self.backend, &mut self.output)?;
        let blip = silent_blip(output.current_time());
        output.play(&blip)
    }

    /// Lay out balloons and stars for the celebration overlay.
    pub fn scene(&mut self) -> CelebrationScene {
        CelebrationScene::generate(&mut self.rng)
    }

    fn play_fanfare(&mut self) -> Result<usize, AudioError> {
        let output = Self::acquire(&mut self.backend, &mut self.output)?;
        let notes = fanfare(output.current_time(), &mut self.rng);
        for note in &notes {
            output.play(note)?;
        }
        Ok(notes.len())
    }

    /// Open the output on first use and resume it if suspended.
    fn acquire<'a>(backend: &mut B, slot: &'a mut Option<B::Output>) -> Result<&'a mut B::Output, AudioError> {
        if slot.is_none() {
            let opened = backend.open()?;
            debug!("audio output opened");
            *slot = Some(opened);
        }
        let Some(output) = slot.as_mut() else {
            return Err(AudioError::Unavailable("output not retained".into()));
        };
        if output.is_suspended() {
            output.resume()?;
        }
        Ok(output)
    }
}

// =============================================================================
// SCENE
// =============================================================================

/// Balloon palette.
pub const BALLOON_COLORS: [&str; 6] = [
    "hsl(0 70% 55%)",
    "hsl(45 100% 60%)",
    "hsl(120 50% 50%)",
    "hsl(200 80% 60%)",
    "hsl(280 60% 60%)",
    "hsl(30 100% 60%)",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Balloon {
    /// Horizontal position as a percentage of the overlay width.
    pub x_percent: f64,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Star {
    pub x_percent: f64,
    pub y_percent: f64,
    pub delay_secs: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CelebrationScene {
    pub balloons: Vec<Balloon>,
    pub stars: Vec<Star>,
    /// How long after completion the overlay appears.
    pub reveal_delay_ms: u64,
}

impl CelebrationScene {
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let balloons = (0..BALLOON_COUNT)
            .map(|_| Balloon {
                x_percent: rng.random::<f64>() * 100.0,
                color: BALLOON_COLORS[rng.random_range(0..BALLOON_COLORS.len())],
            })
            .collect();
        let stars = (0..STAR_COUNT)
            .map(|_| Star {
                x_percent: rng.random::<f64>() * 100.0,
                y_percent: rng.random::<f64>() * 100.0,
                delay_secs: rng.random::<f64>() * 0.5,
            })
            .collect();
        Self { balloons, stars, reveal_delay_ms: COMPLETE_REVEAL_DELAY_MS }
    }
}
