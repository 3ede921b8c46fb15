use std::sync::{Arc, Mutex, MutexGuard};

use crate::{foundation::core::TimeRange, track::item::TrackItem};

/// Linear gain ramp over a timeline range. Equal endpoints are the degenerate
/// constant-gain case.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VolumeRamp {
    /// Gain at the start of the range.
    pub from_volume: f32,
    /// Gain at the end of the range.
    pub to_volume: f32,
    /// Timeline range the ramp spans.
    pub range: TimeRange,
}

/// One stage of an audio processing chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AudioProcessingNode {
    /// Applies the configured volume ramps to samples.
    Volume,
}

/// Ordered processing stages applied to an item's audio.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AudioProcessingChain {
    /// Stages in processing order.
    pub nodes: Vec<AudioProcessingNode>,
}

impl AudioProcessingChain {
    /// The canonical single-stage volume chain.
    pub fn volume() -> Self {
        Self {
            nodes: vec![AudioProcessingNode::Volume],
        }
    }
}

/// Owner of an item's processing chain, attached to mix parameters so the
/// playback/export collaborator can tap the item's samples.
#[derive(Debug, Default)]
pub struct AudioTapHolder {
    /// The chain currently installed, if any.
    pub chain: Option<AudioProcessingChain>,
}

impl AudioTapHolder {
    /// New holder with no chain, wrapped for sharing with mix parameters.
    pub fn shared() -> SharedTapHolder {
        Arc::new(Mutex::new(AudioTapHolder::default()))
    }
}

/// A tap holder shared between a configuration and mix parameters.
pub type SharedTapHolder = Arc<Mutex<AudioTapHolder>>;

/// Lock a tap holder, tolerating poisoning (state stays consistent).
pub fn lock_tap_holder(holder: &SharedTapHolder) -> MutexGuard<'_, AudioTapHolder> {
    holder.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}

/// Mix parameters for one destination audio input.
#[derive(Clone, Debug, Default)]
pub struct AudioMixParameters {
    /// Volume ramps in the order they were configured.
    pub ramps: Vec<VolumeRamp>,
    /// Tap holder carrying the item's processing chain, if any.
    pub tap_holder: Option<SharedTapHolder>,
}

impl AudioMixParameters {
    /// Empty parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a volume ramp over `range`.
    pub fn set_volume_ramp(&mut self, from_volume: f32, to_volume: f32, range: TimeRange) {
        self.ramps.push(VolumeRamp {
            from_volume,
            to_volume,
            range,
        });
    }
}

/// Capability of deriving mix parameters for a destination audio mix.
pub trait AudioProvider {
    /// Configure `parameters` for this provider's audio.
    fn configure_mix(&self, parameters: &mut AudioMixParameters);
}

impl AudioProvider for TrackItem {
    /// Applies a constant ramp at the configured volume over the item's
    /// timeline range and installs a fresh single-stage volume chain on the
    /// configuration's tap holder. The chain is rebuilt from scratch on every
    /// call; a holder with no prior chain is fine.
    fn configure_mix(&self, parameters: &mut AudioMixParameters) {
        let volume = self.configuration.audio.volume;
        parameters.set_volume_ramp(volume, volume, self.configuration.timeline_time_range);

        if let Some(holder) = &self.configuration.audio.tap_holder {
            lock_tap_holder(holder).chain = Some(AudioProcessingChain::volume());
        }
        parameters.tap_holder = self.configuration.audio.tap_holder.clone();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/audio/mix.rs"]
mod tests;
