//! Audio graph runtime.
//!
//! Owns the output stream (created lazily, since platforms may refuse audio
//! before a user gesture), the fixed master gain stage, and the shared
//! [`GraphState`] both mixers mutate. The control thread issues commands by
//! taking the state lock; the audio callback renders with `try_lock` and
//! emits silence for the block when the lock is contended, so the render path
//! never blocks and never allocates.
//!
//! Failure semantics: if the output device cannot be created, every command
//! still applies to the graph state — the engine just stays silent, logs once,
//! and retries stream creation on the next user-initiated command.

use std::sync::{Arc, Mutex};

use crate::chain::{ChainSpec, GeneratorChain};
#[cfg(feature = "realtime")]
use crate::error::AudioError;
use crate::mixer::Channel;

/// Fixed master gain ceiling; prevents clipping when several chains sum.
pub const MASTER_GAIN: f32 = 0.3;

/// Sample rate assumed until a device reports a real one (and in headless mode).
pub const DEFAULT_SAMPLE_RATE: f32 = 44_100.0;

/// Runtime construction options.
///
/// `headless` disables device creation entirely: chain bookkeeping still
/// applies, nothing is audible. Used by tests and any host that only wants
/// the state machine.
#[derive(Clone, Debug, Default)]
pub struct EngineConfig {
    pub device_name: Option<String>,
    pub sample_rate: Option<u32>,
    pub headless: bool,
}

impl EngineConfig {
    pub fn headless() -> Self {
        Self { headless: true, ..Self::default() }
    }
}

/// The node set shared with the audio callback. Ambient channels and the mood
/// recipe own disjoint chains; neither lane ever touches the other's slots.
pub(crate) struct GraphState {
    pub(crate) sr: f32,
    pub(crate) master: f32,
    pub(crate) ambient: [Option<GeneratorChain>; Channel::COUNT],
    pub(crate) mood: Vec<GeneratorChain>,
}

impl GraphState {
    fn new(sr: f32) -> Self {
        Self {
            sr,
            master: MASTER_GAIN,
            ambient: [None, None, None, None],
            mood: Vec::new(),
        }
    }

    /// Render one summed mono sample through the master stage.
    #[inline]
    pub(crate) fn render(&mut self) -> f32 {
        let mut s = 0.0;
        for chain in self.ambient.iter_mut().flatten() {
            s += chain.next();
        }
        for chain in self.mood.iter_mut() {
            s += chain.next();
        }
        (s * self.master).clamp(-1.0, 1.0)
    }

    fn chain_count(&self) -> usize {
        self.ambient.iter().filter(|c| c.is_some()).count() + self.mood.len()
    }
}

/// Owns the device stream and the shared graph state.
pub struct AudioGraphRuntime {
    config: EngineConfig,
    state: Arc<Mutex<GraphState>>,
    #[cfg(feature = "realtime")]
    stream: Option<cpal::Stream>,
    #[cfg(feature = "realtime")]
    warned: bool,
}

impl AudioGraphRuntime {
    pub fn new(config: EngineConfig) -> Self {
        let sr = config
            .sample_rate
            .map(|s| s as f32)
            .unwrap_or(DEFAULT_SAMPLE_RATE);
        Self {
            config,
            state: Arc::new(Mutex::new(GraphState::new(sr))),
            #[cfg(feature = "realtime")]
            stream: None,
            #[cfg(feature = "realtime")]
            warned: false,
        }
    }

    /// Make sure the output stream exists and is running. Must run before any
    /// sound-producing command; a no-op when headless. Device failure degrades
    /// to silence and is retried on the next call.
    pub fn resume_if_suspended(&mut self) {
        #[cfg(feature = "realtime")]
        {
            if self.config.headless {
                return;
            }
            if self.stream.is_none() {
                match self.open_stream() {
                    Ok(stream) => {
                        self.stream = Some(stream);
                        self.warned = false;
                    }
                    Err(e) => {
                        if !self.warned {
                            log::warn!("audio output unavailable, continuing silent: {e}");
                            self.warned = true;
                        }
                        return;
                    }
                }
            }
            if let Some(stream) = &self.stream {
                use cpal::traits::StreamTrait;
                if let Err(e) = stream.play() {
                    log::warn!("failed to resume output stream: {e}");
                }
            }
        }
    }

    /// Drop every active chain in both lanes. The stream itself persists.
    pub fn teardown_all(&self) {
        self.with_state(|st| {
            st.ambient = [None, None, None, None];
            st.mood.clear();
        });
        log::debug!("graph teardown: all chains dropped");
    }

    /// Run `f` under the state lock. Recipe swaps use a single call so the
    /// stop-old/start-new sequence is atomic with respect to rendering.
    pub(crate) fn with_state<R>(&self, f: impl FnOnce(&mut GraphState) -> R) -> R {
        let mut st = self.state.lock().unwrap_or_else(|e| e.into_inner());
        f(&mut st)
    }

    // ------------------------------ Introspection ---------------------------------

    pub fn sample_rate(&self) -> f32 {
        self.with_state(|st| st.sr)
    }

    pub fn active_chain_count(&self) -> usize {
        self.with_state(|st| st.chain_count())
    }

    pub fn ambient_chain_id(&self, channel: Channel) -> Option<u64> {
        self.with_state(|st| st.ambient[channel as usize].as_ref().map(|c| c.id()))
    }

    pub fn ambient_target_gain(&self, channel: Channel) -> Option<f32> {
        self.with_state(|st| st.ambient[channel as usize].as_ref().map(|c| c.target_gain()))
    }

    pub fn mood_chain_count(&self) -> usize {
        self.with_state(|st| st.mood.len())
    }

    pub fn mood_specs(&self) -> Vec<ChainSpec> {
        self.with_state(|st| st.mood.iter().map(|c| *c.spec()).collect())
    }

    // ------------------------------ Device plumbing --------------------------------

    #[cfg(feature = "realtime")]
    fn open_stream(&self) -> Result<cpal::Stream, AudioError> {
        use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};

        let host = cpal::default_host();
        let device = match &self.config.device_name {
            Some(name) => {
                let mut found = None;
                for d in host.output_devices()? {
                    if d.name()? == *name {
                        found = Some(d);
                        break;
                    }
                }
                found.ok_or_else(|| AudioError::DeviceNotFound(name.clone()))?
            }
            None => host.default_output_device().ok_or(AudioError::NoDevice)?,
        };

        let sup = device.default_output_config()?;
        let sample_format = sup.sample_format();
        let mut cfg = sup.config();
        if let Some(sr) = self.config.sample_rate {
            cfg.sample_rate = cpal::SampleRate(sr);
        }

        // Chains built after this point generate buffers at the live rate;
        // every command path resumes before creating chains.
        self.with_state(|st| st.sr = cfg.sample_rate.0 as f32);

        let stream = match sample_format {
            cpal::SampleFormat::F32 => self.build_stream::<f32>(&device, &cfg)?,
            cpal::SampleFormat::I16 => self.build_stream::<i16>(&device, &cfg)?,
            cpal::SampleFormat::U16 => self.build_stream::<u16>(&device, &cfg)?,
            other => return Err(AudioError::UnsupportedFormat(format!("{other:?}"))),
        };
        stream.play()?;
        log::debug!(
            "output stream opened: {} ch @ {} Hz",
            cfg.channels,
            cfg.sample_rate.0
        );
        Ok(stream)
    }

    #[cfg(feature = "realtime")]
    fn build_stream<T>(
        &self,
        device: &cpal::Device,
        cfg: &cpal::StreamConfig,
    ) -> Result<cpal::Stream, AudioError>
    where
        T: cpal::SizedSample + cpal::FromSample<f32> + Send + 'static,
    {
        use cpal::traits::DeviceTrait;

        let channels = cfg.channels as usize;
        let state = Arc::clone(&self.state);
        let err_fn = |e: cpal::StreamError| log::warn!("output stream error: {e}");

        let stream = device.build_output_stream(
            cfg,
            move |output: &mut [T], _| match state.try_lock() {
                Ok(mut st) => {
                    for frame in output.chunks_mut(channels) {
                        let v = T::from_sample(st.render());
                        for ch in frame.iter_mut() {
                            *ch = v;
                        }
                    }
                }
                // Control thread holds the lock (recipe swap in flight);
                // emit silence for this block rather than waiting.
                Err(_) => {
                    for ch in output.iter_mut() {
                        *ch = T::EQUILIBRIUM;
                    }
                }
            },
            err_fn,
            None,
        )?;
        Ok(stream)
    }
}

/// Names of the available output devices, for CLI listing.
#[cfg(feature = "realtime")]
pub fn list_output_devices() -> Result<Vec<String>, AudioError> {
    use cpal::traits::{DeviceTrait, HostTrait};
    let host = cpal::default_host();
    let mut names = Vec::new();
    for device in host.output_devices()? {
        names.push(device.name()?);
    }
    Ok(names)
}

// ------------------------------------ Tests --------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::{ChainSpec, GeneratorChain, Waveform};

    #[test]
    fn headless_runtime_uses_requested_sample_rate() {
        let rt = AudioGraphRuntime::new(EngineConfig {
            sample_rate: Some(48_000),
            headless: true,
            ..EngineConfig::default()
        });
        assert_eq!(rt.sample_rate(), 48_000.0);
        let rt = AudioGraphRuntime::new(EngineConfig::headless());
        assert_eq!(rt.sample_rate(), DEFAULT_SAMPLE_RATE);
    }

    #[test]
    fn teardown_drops_every_chain() {
        let rt = AudioGraphRuntime::new(EngineConfig::headless());
        rt.with_state(|st| {
            let sr = st.sr;
            st.mood
                .push(GeneratorChain::build(&ChainSpec::tone(300.0, Waveform::Sine, 0.05), sr));
            st.ambient[0] =
                Some(GeneratorChain::build(&ChainSpec::tone(150.0, Waveform::Sine, 0.1), sr));
        });
        assert_eq!(rt.active_chain_count(), 2);
        rt.teardown_all();
        assert_eq!(rt.active_chain_count(), 0);
    }

    #[test]
    fn render_applies_master_ceiling() {
        let rt = AudioGraphRuntime::new(EngineConfig::headless());
        rt.with_state(|st| {
            let sr = st.sr;
            // Three loud drones; summed raw amplitude would exceed 1.0.
            for _ in 0..3 {
                st.mood
                    .push(GeneratorChain::build(&ChainSpec::tone(100.0, Waveform::Sawtooth, 1.0), sr));
            }
        });
        rt.with_state(|st| {
            let mut peak = 0.0f32;
            for _ in 0..(3.0 * st.sr) as usize {
                peak = peak.max(st.render().abs());
            }
            assert!(peak <= 1.0, "peak={peak}");
            assert!(peak > 0.0);
        });
    }

    #[test]
    fn resume_is_a_noop_when_headless() {
        let mut rt = AudioGraphRuntime::new(EngineConfig::headless());
        rt.resume_if_suspended();
        assert_eq!(rt.active_chain_count(), 0);
    }
}
