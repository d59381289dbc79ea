//! Request facade: the surface the surrounding application calls.
//!
//! One long-lived [`AmbienceEngine`] owns the runtime and both mixers and is
//! passed by handle to the event layer — no module-level singletons. Every
//! request is fire-and-forget: invalid parameters are clamped or ignored,
//! device trouble degrades to silence, and nothing here ever returns an error
//! to the caller.

use crate::graph::{AudioGraphRuntime, EngineConfig};
use crate::mixer::{AmbientLoopMixer, Channel};
use crate::mood::{MoodSoundscapeController, CRACKLE};

pub struct AmbienceEngine {
    runtime: AudioGraphRuntime,
    ambient: AmbientLoopMixer,
    mood: MoodSoundscapeController,
}

impl AmbienceEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            runtime: AudioGraphRuntime::new(config),
            ambient: AmbientLoopMixer::new(),
            mood: MoodSoundscapeController::new(),
        }
    }

    /// Engine with device output disabled; state machine only.
    pub fn headless() -> Self {
        Self::new(EngineConfig::headless())
    }

    /// New sentiment label from the chat/classification collaborator.
    pub fn request_mood(&mut self, signal: &str) {
        self.mood.set_mood(&mut self.runtime, signal);
    }

    /// Volume-slider input: channel name plus percent 0–100 (clamped).
    /// Unknown channel names are ignored.
    pub fn request_channel_volume(&mut self, channel_name: &str, percent: u8) {
        let Some(channel) = Channel::from_name(channel_name) else {
            log::debug!("ignoring unknown ambient channel: {channel_name}");
            return;
        };
        let volume = f32::from(percent.min(100)) / 100.0;
        self.ambient.set_volume(&mut self.runtime, channel, volume);
    }

    /// Mute/unmute control; returns the resulting active flag for icon state.
    pub fn request_toggle(&mut self) -> bool {
        self.mood.toggle(&mut self.runtime)
    }

    /// One-shot crackle layered over the current soundscape (worry burner).
    pub fn request_crackle(&mut self) {
        self.mood.play_effect(&mut self.runtime, &CRACKLE);
    }

    // Read-only views, mainly for hosts that surface engine state.
    pub fn runtime(&self) -> &AudioGraphRuntime { &self.runtime }
    pub fn is_active(&self) -> bool { self.mood.is_playing() }
    pub fn current_mood(&self) -> crate::mood::Mood { self.mood.mood() }
    pub fn channel_level(&self, channel: Channel) -> f32 { self.ambient.level(channel) }
}

// ------------------------------------ Tests --------------------------------------
