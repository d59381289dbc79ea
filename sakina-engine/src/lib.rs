//! Sakina Engine — procedural ambience: buffers, chains, graph, mixers.
//!
//! Crate layout:
//! - [`buffers`] : noise buffer factory (white/pink/brown, 2-second loops)
//! - [`chain`]   : `ChainSpec` and the built source→filter→gain unit
//! - [`graph`]   : shared graph state, master stage, lazy device stream
//! - [`mixer`]   : persistent user-volume ambient channels (rain/forest/ocean/fire)
//! - [`mood`]    : mood classifier, fixed recipes, play/pause state machine
//! - [`control`] : the fire-and-forget request facade the host calls
//!
//! The engine deliberately avoids heap allocations in the audio callback:
//! chains are built on the control thread under the state lock, and the
//! callback only walks the existing node set (silence when the lock is
//! contended). Device failure is never an error to callers — commands keep
//! applying to the graph and output resumes when the device does.

pub mod buffers;
pub mod chain;
pub mod control;
pub mod error;
pub mod graph;
pub mod mixer;
pub mod mood;

// Re-export the items hosts actually touch.
pub use chain::{ChainSpec, FilterSpec, GeneratorChain, NoiseColor, SourceSpec, Waveform};
pub use control::AmbienceEngine;
pub use error::AudioError;
pub use graph::{AudioGraphRuntime, EngineConfig, MASTER_GAIN};
pub use mixer::{AmbientLoopMixer, Channel};
pub use mood::{classify, Mood, MoodSoundscapeController};
