//! Generator chains: source → optional filter → ramped gain.
//!
//! A chain is the unit both mixers are built from. Specs are closed enums so
//! every recipe is a checkable constant; the built chain owns its source
//! (looping noise buffer or free-running oscillator), its filter state, and a
//! linear gain ramp. Chains fade in from silence over [`FADE_IN_SECS`] and
//! retarget over a short window instead of snapping.
//!
//! Stopping a chain is dropping it from its owning slot; there is no separate
//! stop call to get wrong, so double-stop cannot exist.

use std::sync::atomic::{AtomicU64, Ordering};

use sakina_core::dsp::{fast_sin, TAU};
use sakina_core::envelopes::LinearRamp;
use sakina_core::filters::{OnePoleHP, OnePoleLP};

use crate::buffers;

/// Fade-in window applied when a chain is created.
pub const FADE_IN_SECS: f32 = 2.0;

/// Ramp window applied on retarget; short enough to feel immediate, long
/// enough to avoid zipper noise.
pub const RETARGET_SECS: f32 = 0.05;

static NEXT_CHAIN_ID: AtomicU64 = AtomicU64::new(1);

/// Noise spectrum selection for buffer-backed sources.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NoiseColor { White, Pink, Brown }

/// Oscillator waveform.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Waveform { Sine, Triangle, Sawtooth }

/// What feeds the chain.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum SourceSpec {
    /// Looping noise buffer of the given color.
    Noise(NoiseColor),
    /// Free-running oscillator at a fixed frequency (Hz).
    Tone(Waveform, f32),
}

/// Optional tone shaping between source and gain.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum FilterSpec {
    None,
    LowPass(f32),
    HighPass(f32),
}

/// Everything needed to build one chain. Recipes are lists of these.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ChainSpec {
    pub source: SourceSpec,
    pub filter: FilterSpec,
    pub gain: f32,
}

impl ChainSpec {
    /// Drone spec: oscillator, no filter.
    pub const fn tone(freq_hz: f32, wave: Waveform, gain: f32) -> Self {
        Self { source: SourceSpec::Tone(wave, freq_hz), filter: FilterSpec::None, gain }
    }

    /// Noise-bed spec.
    pub const fn noise(color: NoiseColor, filter: FilterSpec, gain: f32) -> Self {
        Self { source: SourceSpec::Noise(color), filter, gain }
    }
}

// -------------------------------- Oscillator --------------------------------------

/// Free-running oscillator. Not anti-aliased; fine for low ambient drones.
#[derive(Copy, Clone, Debug)]
pub struct Osc {
    phase: f32, // [0,1)
    freq: f32,  // Hz
    wave: Waveform,
}

impl Osc {
    #[inline]
    pub fn new(freq_hz: f32, wave: Waveform) -> Self {
        Self { phase: 0.0, freq: freq_hz.max(0.0), wave }
    }

    /// Advance one sample and return the oscillator sample in [-1, 1].
    #[inline]
    pub fn next(&mut self, sr: f32) -> f32 {
        self.phase = (self.phase + self.freq / sr.max(1.0)) % 1.0;
        match self.wave {
            Waveform::Sine => fast_sin(TAU * self.phase),
            Waveform::Triangle => 4.0 * (self.phase - 0.5).abs() - 1.0,
            Waveform::Sawtooth => 2.0 * self.phase - 1.0,
        }
    }
}

// -------------------------------- Chain runtime -----------------------------------

enum Source {
    /// Looping buffer playback; `pos` wraps at the buffer end.
    Loop { buffer: Vec<f32>, pos: usize },
    Tone(Osc),
}

enum Filter {
    None,
    Lp(OnePoleLP),
    Hp(OnePoleHP),
}

impl Filter {
    #[inline]
    fn process(&mut self, x: f32) -> f32 {
        match self {
            Filter::None => x,
            Filter::Lp(f) => f.process(x),
            Filter::Hp(f) => f.process(x),
        }
    }
}

/// A built, running chain. Owned exclusively by the mixer slot that created it.
pub struct GeneratorChain {
    id: u64,
    spec: ChainSpec,
    source: Source,
    filter: Filter,
    gain: LinearRamp,
    sr: f32,
}

impl GeneratorChain {
    /// Allocate the source and filter state and start the fade-in ramp from
    /// silence towards `spec.gain` (clamped to [0, 1]).
    pub fn build(spec: &ChainSpec, sr: f32) -> Self {
        let sr = sr.max(1.0);
        let source = match spec.source {
            SourceSpec::Noise(color) => Source::Loop {
                buffer: buffers::noise_buffer(color, sr),
                pos: 0,
            },
            SourceSpec::Tone(wave, freq) => Source::Tone(Osc::new(freq, wave)),
        };
        let filter = match spec.filter {
            FilterSpec::None => Filter::None,
            FilterSpec::LowPass(hz) => Filter::Lp(OnePoleLP::new(hz, sr)),
            FilterSpec::HighPass(hz) => Filter::Hp(OnePoleHP::new(hz, sr)),
        };
        let target = spec.gain.clamp(0.0, 1.0);
        Self {
            id: NEXT_CHAIN_ID.fetch_add(1, Ordering::Relaxed),
            spec: *spec,
            source,
            filter,
            gain: LinearRamp::new(0.0, target, FADE_IN_SECS, sr),
            sr,
        }
    }

    #[inline] pub fn id(&self) -> u64 { self.id }
    #[inline] pub fn spec(&self) -> &ChainSpec { &self.spec }
    #[inline] pub fn target_gain(&self) -> f32 { self.gain.target() }

    /// Move only the gain target; no reallocation, no restart. Takes over any
    /// in-flight fade-in from its current value.
    #[inline]
    pub fn retarget(&mut self, gain: f32) {
        let g = gain.clamp(0.0, 1.0);
        self.spec.gain = g;
        self.gain.retarget(g, RETARGET_SECS, self.sr);
    }

    /// Render one sample: source → filter → ramped gain.
    #[inline]
    pub fn next(&mut self) -> f32 {
        let x = match &mut self.source {
            Source::Loop { buffer, pos } => {
                let s = buffer[*pos];
                *pos += 1;
                if *pos >= buffer.len() {
                    *pos = 0;
                }
                s
            }
            Source::Tone(osc) => osc.next(self.sr),
        };
        self.filter.process(x) * self.gain.tick()
    }
}

// ------------------------------------ Tests --------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique_and_monotonic() {
        let spec = ChainSpec::tone(300.0, Waveform::Sine, 0.05);
        let a = GeneratorChain::build(&spec, 48000.0);
        let b = GeneratorChain::build(&spec, 48000.0);
        assert!(b.id() > a.id());
    }

    #[test]
    fn chain_fades_in_from_silence() {
        let spec = ChainSpec::tone(300.0, Waveform::Sine, 1.0);
        let mut chain = GeneratorChain::build(&spec, 48000.0);
        // The first millisecond is nearly silent; after the full window the
        // tone swings close to unity.
        let mut early_peak = 0.0f32;
        for _ in 0..48 {
            early_peak = early_peak.max(chain.next().abs());
        }
        assert!(early_peak < 0.01, "early_peak={early_peak}");
        let mut late_peak = 0.0f32;
        for _ in 0..(48000 * 3) {
            late_peak = late_peak.max(chain.next().abs());
        }
        assert!(late_peak > 0.9, "late_peak={late_peak}");
    }

    #[test]
    fn retarget_changes_target_without_restarting() {
        let spec = ChainSpec::noise(NoiseColor::Pink, FilterSpec::None, 0.4);
        let mut chain = GeneratorChain::build(&spec, 44100.0);
        let id = chain.id();
        chain.retarget(0.9);
        assert_eq!(chain.id(), id);
        assert_eq!(chain.target_gain(), 0.9);
        chain.retarget(1.7);
        assert_eq!(chain.target_gain(), 1.0); // clamped
    }

    #[test]
    fn noise_loop_wraps() {
        let spec = ChainSpec::noise(NoiseColor::Brown, FilterSpec::LowPass(400.0), 0.2);
        let mut chain = GeneratorChain::build(&spec, 8000.0);
        // Buffer is 16k samples at 8 kHz; render past one loop boundary.
        for _ in 0..20_000 {
            let s = chain.next();
            assert!(s.is_finite());
        }
    }

    #[test]
    fn triangle_and_saw_are_bounded() {
        let sr = 48000.0;
        for wave in [Waveform::Triangle, Waveform::Sawtooth, Waveform::Sine] {
            let mut osc = Osc::new(110.0, wave);
            for _ in 0..4096 {
                let s = osc.next(sr);
                assert!((-1.0..=1.0).contains(&s), "{wave:?} s={s}");
            }
        }
    }
}
