//! Audio seam
//!
//! The simulation emits `Sound` events; a platform-side sink plays them.
//! Playback is fire-and-forget and must never block or fail into the
//! simulation - a sink that cannot play simply logs and drops the event.

/// Sound effect events the simulation can emit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sound {
    ShipExplosion,
    ShipWarp,
    SlugLaunch,
    TorpedoExplosion,
    TorpedoLaunch,
}

/// Platform audio output
pub trait AudioSink {
    /// Play one sound effect. Non-blocking; errors are the sink's problem.
    fn play(&mut self, sound: Sound);
}

/// Sink for headless runs: drops every event, visible at debug level
#[derive(Debug, Default)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&mut self, sound: Sound) {
        log::debug!("audio: {sound:?}");
    }
}
