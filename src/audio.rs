//! Fire-and-forget audio cues
//!
//! Combat and AI code announces events through the [`AudioSink`] trait and
//! never waits on playback. [`RodioAudio`] is the production sink built on
//! rodio; [`NullAudio`] is the silent stand-in for headless runs and tests.

use std::fs;
use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;

use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink, mixer::Mixer};
use rustc_hash::FxHashMap;

/// Sound cues the core can trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cue {
    /// An enemy fired at the player
    EnemyFired,
    /// An enemy took damage
    EnemyHurt,
    /// An enemy died
    EnemyDeath,
    /// The player took damage
    PlayerHurt,
}

/// Receiver for fire-and-forget sound cues
pub trait AudioSink {
    /// Trigger a cue; never blocks, never reports failure
    fn play(&mut self, cue: Cue);
}

/// Sink that discards every cue
#[derive(Debug, Clone, Copy, Default)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&mut self, _cue: Cue) {}
}

/// Errors that can occur setting up audio
#[derive(Debug, Clone)]
pub enum AudioError {
    /// IO error reading a cue file
    IoError(String),
    /// Error decoding audio data
    DecodeError(String),
    /// No audio output device available
    NoDevice,
}

impl std::fmt::Display for AudioError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IoError(e) => write!(f, "IO error: {e}"),
            Self::DecodeError(e) => write!(f, "Decode error: {e}"),
            Self::NoDevice => write!(f, "No audio output device available"),
        }
    }
}

impl std::error::Error for AudioError {}

/// Rodio-backed cue sink.
///
/// Each cue keeps its decoded bytes in memory; playing spawns a detached
/// sink on the shared mixer so overlapping cues mix freely.
pub struct RodioAudio {
    /// The output stream (must be kept alive)
    _stream: OutputStream,
    mixer: Mixer,
    cues: FxHashMap<Cue, Arc<[u8]>>,
    volume: f32,
}

impl RodioAudio {
    /// Create a sink on the default output device
    ///
    /// # Errors
    ///
    /// Returns an error if no audio output device is available
    pub fn new() -> Result<Self, AudioError> {
        let stream = OutputStreamBuilder::from_default_device()
            .map_err(|_| AudioError::NoDevice)?
            .open_stream()
            .map_err(|_| AudioError::NoDevice)?;
        let mixer = stream.mixer().clone();

        Ok(Self {
            _stream: stream,
            mixer,
            cues: FxHashMap::default(),
            volume: 1.0,
        })
    }

    /// Load the audio file to play for a cue
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or decoded
    pub fn load(&mut self, cue: Cue, path: impl AsRef<Path>) -> Result<(), AudioError> {
        let bytes: Arc<[u8]> = fs::read(path.as_ref())
            .map_err(|e| AudioError::IoError(e.to_string()))?
            .into();

        // Fail on load, not mid-combat
        Decoder::new(Cursor::new(Arc::clone(&bytes)))
            .map_err(|e| AudioError::DecodeError(e.to_string()))?;

        self.cues.insert(cue, bytes);
        Ok(())
    }

    /// Set playback volume (1.0 = full)
    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
    }
}

impl AudioSink for RodioAudio {
    fn play(&mut self, cue: Cue) {
        let Some(bytes) = self.cues.get(&cue) else {
            return;
        };
        let Ok(source) = Decoder::new(Cursor::new(Arc::clone(bytes))) else {
            return;
        };
        let sink = Sink::connect_new(&self.mixer);
        sink.set_volume(self.volume);
        sink.append(source);
        sink.detach();
    }
}

/// Test sink that records every cue in order
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingAudio {
    /// Cues in the order they were played
    pub cues: Vec<Cue>,
}

#[cfg(test)]
impl RecordingAudio {
    /// How many times a cue was played
    pub fn count(&self, cue: Cue) -> usize {
        self.cues.iter().filter(|&&c| c == cue).count()
    }
}

#[cfg(test)]
impl AudioSink for RecordingAudio {
    fn play(&mut self, cue: Cue) {
        self.cues.push(cue);
    }
}
