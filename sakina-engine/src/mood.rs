//! Mood soundscape controller.
//!
//! A free-text mood signal (Arabic or English sentiment labels from the chat
//! layer) is classified into one of four fixed moods; each mood maps to a
//! constant recipe of drone and noise-bed chains. Switching moods is a hard
//! crossfade: the outgoing recipe's chains are dropped and the incoming set is
//! built under one state lock — no overlap mixing, no leaked chains, and any
//! in-flight fade-in simply dies with its chain.

use crate::chain::{ChainSpec, FilterSpec, NoiseColor, Waveform};
use crate::graph::AudioGraphRuntime;

/// The closed set of soundscape moods.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Mood {
    Anxious,
    Sad,
    Angry,
    Neutral,
}

// Keyword lists for ordered substring matching. The Arabic terms are the
// sentiment labels the chat backend produces; the trailing entries cover the
// topic labels that fold into the same soundscape.
const ANXIOUS_TERMS: &[&str] = &["قلق", "متوتر", "خائف", "anxious", "work_stress", "social_issues"];
const SAD_TERMS: &[&str] = &["حزين", "مكتئب", "وحدة", "sad", "divorce"];
const ANGRY_TERMS: &[&str] = &["غاضب", "عصبي", "angry"];

/// Classify a free-text mood signal. First matching category wins, in the
/// order anxious → sad → angry; anything unmatched is neutral, so
/// classification never fails.
pub fn classify(signal: &str) -> Mood {
    if ANXIOUS_TERMS.iter().any(|t| signal.contains(t)) {
        Mood::Anxious
    } else if SAD_TERMS.iter().any(|t| signal.contains(t)) {
        Mood::Sad
    } else if ANGRY_TERMS.iter().any(|t| signal.contains(t)) {
        Mood::Angry
    } else {
        Mood::Neutral
    }
}

// Recipes are fixed constant data; no runtime generation.
// Anxious: calm ocean — two sine drones 2 Hz apart (binaural beat) over surf.
const ANXIOUS_RECIPE: &[ChainSpec] = &[
    ChainSpec::tone(150.0, Waveform::Sine, 0.10),
    ChainSpec::tone(152.0, Waveform::Sine, 0.10),
    ChainSpec::noise(NoiseColor::Brown, FilterSpec::LowPass(400.0), 0.15),
];
// Sad: warm comfort — low triangle hum plus a soft crackle-ish bed.
const SAD_RECIPE: &[ChainSpec] = &[
    ChainSpec::tone(100.0, Waveform::Triangle, 0.05),
    ChainSpec::noise(NoiseColor::Brown, FilterSpec::LowPass(800.0), 0.10),
];
// Angry: grounding earth — deep rumble, a steadying sine, low wind.
const ANGRY_RECIPE: &[ChainSpec] = &[
    ChainSpec::tone(60.0, Waveform::Sawtooth, 0.03),
    ChainSpec::tone(120.0, Waveform::Sine, 0.10),
    ChainSpec::noise(NoiseColor::Brown, FilterSpec::LowPass(200.0), 0.20),
];
// Neutral: uplifting fifth interval, no noise bed.
const NEUTRAL_RECIPE: &[ChainSpec] = &[
    ChainSpec::tone(300.0, Waveform::Sine, 0.05),
    ChainSpec::tone(450.0, Waveform::Sine, 0.05),
];

/// One-shot crackle effect (worry burner); rides the mood lane until the next
/// recipe swap or toggle-off clears it.
pub const CRACKLE: ChainSpec =
    ChainSpec::noise(NoiseColor::Brown, FilterSpec::LowPass(1000.0), 0.5);

impl Mood {
    pub fn recipe(self) -> &'static [ChainSpec] {
        match self {
            Mood::Anxious => ANXIOUS_RECIPE,
            Mood::Sad => SAD_RECIPE,
            Mood::Angry => ANGRY_RECIPE,
            Mood::Neutral => NEUTRAL_RECIPE,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Mood::Anxious => "anxious",
            Mood::Sad => "sad",
            Mood::Angry => "angry",
            Mood::Neutral => "neutral",
        }
    }
}

/// Play/pause state machine over the mood lane.
///
/// Starts paused with mood Neutral. The first toggle starts Playing(Neutral);
/// toggling off drops every recipe chain but remembers the mood; setting a
/// mood while paused only updates the remembered key.
#[derive(Debug)]
pub struct MoodSoundscapeController {
    playing: bool,
    mood: Mood,
}

impl Default for MoodSoundscapeController {
    fn default() -> Self {
        Self::new()
    }
}

impl MoodSoundscapeController {
    pub fn new() -> Self {
        Self { playing: false, mood: Mood::Neutral }
    }

    #[inline] pub fn is_playing(&self) -> bool { self.playing }
    #[inline] pub fn mood(&self) -> Mood { self.mood }

    /// Flip play/pause; returns the resulting active flag (for UI icon state).
    pub fn toggle(&mut self, rt: &mut AudioGraphRuntime) -> bool {
        rt.resume_if_suspended();
        if self.playing {
            rt.with_state(|st| st.mood.clear());
            self.playing = false;
            log::debug!("mood soundscape paused");
        } else {
            self.playing = true;
            self.render(rt);
            log::debug!("mood soundscape playing ({})", self.mood.name());
        }
        self.playing
    }

    /// Classify the signal and, when playing, hard-crossfade to the new
    /// recipe. When paused, only the remembered mood key changes.
    pub fn set_mood(&mut self, rt: &mut AudioGraphRuntime, signal: &str) {
        let mood = classify(signal);
        self.mood = mood;
        if self.playing {
            rt.resume_if_suspended();
            self.render(rt);
            log::debug!("mood switched to {}", mood.name());
        }
    }

    /// Layer an extra chain on the mood lane (e.g. the worry-burner crackle).
    /// Cleared by the next recipe swap or toggle-off.
    pub fn play_effect(&mut self, rt: &mut AudioGraphRuntime, spec: &ChainSpec) {
        rt.resume_if_suspended();
        rt.with_state(|st| {
            let chain = crate::chain::GeneratorChain::build(spec, st.sr);
            st.mood.push(chain);
        });
    }

    /// Swap the mood lane to the current recipe: drop the outgoing chains and
    /// build the incoming set in one locked section.
    fn render(&self, rt: &mut AudioGraphRuntime) {
        let recipe = self.mood.recipe();
        rt.with_state(|st| {
            st.mood.clear();
            for spec in recipe {
                st.mood.push(crate::chain::GeneratorChain::build(spec, st.sr));
            }
        });
    }
}

// ------------------------------------ Tests --------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::EngineConfig;

    fn headless() -> AudioGraphRuntime {
        AudioGraphRuntime::new(EngineConfig::headless())
    }

    #[test]
    fn classification_matches_keyword_order() {
        assert_eq!(classify("أنا قلق جداً"), Mood::Anxious);
        assert_eq!(classify("حزين ووحيد"), Mood::Sad);
        assert_eq!(classify("غاضب من كل شيء"), Mood::Angry);
        assert_eq!(classify("feeling anxious today"), Mood::Anxious);
        assert_eq!(classify("work_stress"), Mood::Anxious);
        assert_eq!(classify("divorce"), Mood::Sad);
        // Unmatched input always resolves to neutral.
        assert_eq!(classify("يوم سعيد"), Mood::Neutral);
        assert_eq!(classify(""), Mood::Neutral);
        // First matching category wins: anxious outranks angry.
        assert_eq!(classify("قلق غاضب"), Mood::Anxious);
    }

    #[test]
    fn toggle_twice_from_uninitialized() {
        let mut rt = headless();
        let mut ctl = MoodSoundscapeController::new();
        assert!(ctl.toggle(&mut rt));
        assert_eq!(rt.mood_chain_count(), Mood::Neutral.recipe().len());
        assert!(!ctl.toggle(&mut rt));
        assert_eq!(rt.active_chain_count(), 0);
    }

    #[test]
    fn mood_switch_leaves_only_the_new_recipe() {
        let mut rt = headless();
        let mut ctl = MoodSoundscapeController::new();
        ctl.toggle(&mut rt);
        ctl.set_mood(&mut rt, "أنا قلق جداً");
        assert_eq!(rt.mood_chain_count(), Mood::Anxious.recipe().len());
        ctl.set_mood(&mut rt, "يوم سعيد");
        let specs = rt.mood_specs();
        assert_eq!(specs.len(), Mood::Neutral.recipe().len());
        for spec in &specs {
            assert!(Mood::Neutral.recipe().contains(spec), "leaked chain: {spec:?}");
            assert!(!Mood::Anxious.recipe().contains(spec));
        }
    }

    #[test]
    fn set_mood_while_paused_renders_nothing_but_is_remembered() {
        let mut rt = headless();
        let mut ctl = MoodSoundscapeController::new();
        ctl.set_mood(&mut rt, "حزين");
        assert_eq!(rt.active_chain_count(), 0);
        assert_eq!(ctl.mood(), Mood::Sad);
        assert!(ctl.toggle(&mut rt));
        let specs = rt.mood_specs();
        assert_eq!(specs.len(), Mood::Sad.recipe().len());
        for spec in &specs {
            assert!(Mood::Sad.recipe().contains(spec));
        }
    }

    #[test]
    fn pause_remembers_mood_for_resume() {
        let mut rt = headless();
        let mut ctl = MoodSoundscapeController::new();
        ctl.toggle(&mut rt);
        ctl.set_mood(&mut rt, "angry");
        ctl.toggle(&mut rt);
        assert_eq!(rt.active_chain_count(), 0);
        ctl.toggle(&mut rt);
        assert_eq!(rt.mood_chain_count(), Mood::Angry.recipe().len());
    }

    #[test]
    fn effect_rides_the_mood_lane_until_the_next_swap() {
        let mut rt = headless();
        let mut ctl = MoodSoundscapeController::new();
        ctl.toggle(&mut rt);
        ctl.play_effect(&mut rt, &CRACKLE);
        assert_eq!(rt.mood_chain_count(), Mood::Neutral.recipe().len() + 1);
        ctl.set_mood(&mut rt, "sad");
        assert_eq!(rt.mood_chain_count(), Mood::Sad.recipe().len());
    }
}
