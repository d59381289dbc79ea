//! Ambient loop mixer: persistent, user-volume-controlled background channels.
//!
//! Four fixed channels, each backed by at most one looping pink-noise chain.
//! A channel is created lazily at its first nonzero volume; after that, volume
//! moves only retarget the existing chain's gain. Channels are never stopped
//! automatically — ambience persists until the caller drives it to zero or
//! the session ends.

use crate::chain::{ChainSpec, FilterSpec, GeneratorChain, NoiseColor};
use crate::graph::AudioGraphRuntime;

/// The closed set of ambient channels.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Channel {
    Rain = 0,
    Forest = 1,
    Ocean = 2,
    Fire = 3,
}

impl Channel {
    pub const COUNT: usize = 4;
    pub const ALL: [Channel; Self::COUNT] =
        [Channel::Rain, Channel::Forest, Channel::Ocean, Channel::Fire];

    /// Parse a channel name; unknown names get `None` (and are ignored by
    /// callers rather than failing).
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "rain" => Some(Channel::Rain),
            "forest" => Some(Channel::Forest),
            "ocean" => Some(Channel::Ocean),
            "fire" => Some(Channel::Fire),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Channel::Rain => "rain",
            Channel::Forest => "forest",
            Channel::Ocean => "ocean",
            Channel::Fire => "fire",
        }
    }

    /// The channel's fixed synthesis recipe at the given target gain.
    /// All four are filtered pink noise:
    /// rain = unfiltered, forest = wind through leaves (HP 800 Hz),
    /// ocean = surf (LP 400 Hz), fire = low rumble (LP 150 Hz).
    pub fn recipe(self, gain: f32) -> ChainSpec {
        let filter = match self {
            Channel::Rain => FilterSpec::None,
            Channel::Forest => FilterSpec::HighPass(800.0),
            Channel::Ocean => FilterSpec::LowPass(400.0),
            Channel::Fire => FilterSpec::LowPass(150.0),
        };
        ChainSpec::noise(NoiseColor::Pink, filter, gain)
    }
}

/// Control-side state for the ambient lane. The chains themselves live in the
/// graph state; this tracks the last requested level per channel.
#[derive(Debug, Default)]
pub struct AmbientLoopMixer {
    levels: [f32; Channel::COUNT],
}

impl AmbientLoopMixer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last requested level for a channel, in [0, 1].
    pub fn level(&self, channel: Channel) -> f32 {
        self.levels[channel as usize]
    }

    /// Set a channel's volume (clamped to [0, 1]).
    ///
    /// Resumes the device first (autoplay-restriction recovery), then either
    /// creates the channel's chain (first nonzero volume) or retargets the
    /// existing one in place. The create-or-retarget decision happens under a
    /// single state lock.
    pub fn set_volume(&mut self, rt: &mut AudioGraphRuntime, channel: Channel, volume: f32) {
        let v = volume.clamp(0.0, 1.0);
        rt.resume_if_suspended();
        self.levels[channel as usize] = v;
        rt.with_state(|st| {
            let slot = &mut st.ambient[channel as usize];
            match slot {
                Some(chain) => chain.retarget(v),
                None => {
                    // Lazy creation: silence on a silent channel stays a no-op.
                    if v > 0.0 {
                        let chain = GeneratorChain::build(&channel.recipe(v), st.sr);
                        log::debug!("ambient channel {} started (chain {})", channel.name(), chain.id());
                        *slot = Some(chain);
                    }
                }
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
    fn channel_names_round_trip() {
        for ch in Channel::ALL {
            assert_eq!(Channel::from_name(ch.name()), Some(ch));
        }
        assert_eq!(Channel::from_name("waterfall"), None);
    }

    #[test]
    fn second_set_volume_retargets_the_same_chain() {
        let mut rt = headless();
        let mut mixer = AmbientLoopMixer::new();
        mixer.set_volume(&mut rt, Channel::Rain, 0.4);
        let id = rt.ambient_chain_id(Channel::Rain).expect("chain created");
        mixer.set_volume(&mut rt, Channel::Rain, 0.8);
        assert_eq!(rt.ambient_chain_id(Channel::Rain), Some(id));
        assert_eq!(rt.ambient_target_gain(Channel::Rain), Some(0.8));
        assert_eq!(rt.active_chain_count(), 1);
    }

    #[test]
    fn zero_volume_on_unused_channel_creates_nothing() {
        let mut rt = headless();
        let mut mixer = AmbientLoopMixer::new();
        mixer.set_volume(&mut rt, Channel::Fire, 0.0);
        assert_eq!(rt.active_chain_count(), 0);
        // But driving an existing channel to zero keeps its chain for later.
        mixer.set_volume(&mut rt, Channel::Fire, 0.3);
        mixer.set_volume(&mut rt, Channel::Fire, 0.0);
        assert_eq!(rt.active_chain_count(), 1);
        assert_eq!(rt.ambient_target_gain(Channel::Fire), Some(0.0));
    }

    #[test]
    fn volume_is_clamped_to_unit_range() {
        let mut rt = headless();
        let mut mixer = AmbientLoopMixer::new();
        mixer.set_volume(&mut rt, Channel::Ocean, 1.5);
        assert_eq!(rt.ambient_target_gain(Channel::Ocean), Some(1.0));
        mixer.set_volume(&mut rt, Channel::Ocean, -0.5);
        assert_eq!(rt.ambient_target_gain(Channel::Ocean), Some(0.0));
    }

    #[test]
    fn channels_are_independent() {
        let mut rt = headless();
        let mut mixer = AmbientLoopMixer::new();
        for ch in Channel::ALL {
            mixer.set_volume(&mut rt, ch, 0.5);
        }
        assert_eq!(rt.active_chain_count(), 4);
        let ids: Vec<_> = Channel::ALL
            .iter()
            .map(|ch| rt.ambient_chain_id(*ch).unwrap())
            .collect();
        let mut dedup = ids.clone();
        dedup.dedup();
        assert_eq!(ids.len(), dedup.len());
    }
}
