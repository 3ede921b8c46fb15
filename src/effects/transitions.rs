use std::sync::Arc;

use crate::{
    audio::mix::AudioProvider,
    foundation::core::{Time, TimeRange},
    foundation::error::{ReelError, ReelResult},
    track::item::TrackItem,
    video::compositor::VideoCompositionProvider,
};

/// Describes a transition between two adjacent timeline items.
///
/// The core only carries the descriptor; the blending algorithm is an
/// external collaborator consuming the two neighbors' compositor/mixer
/// outputs.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TransitionDescriptor {
    /// Transition kind identifier (e.g. `"crossfade"`).
    pub kind: String,
    /// Overlap duration.
    #[serde(default)]
    pub duration: Time,
    /// Kind-specific parameter object.
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub params: serde_json::Value,
}

impl TransitionDescriptor {
    /// Descriptor with no extra parameters.
    pub fn new(kind: impl Into<String>, duration: Time) -> Self {
        Self {
            kind: kind.into(),
            duration,
            params: serde_json::Value::Null,
        }
    }

    /// Validate descriptor invariants.
    pub fn validate(&self) -> ReelResult<()> {
        if self.kind.trim().is_empty() {
            return Err(ReelError::validation("transition kind must be non-empty"));
        }
        if self.duration < Time::ZERO {
            return Err(ReelError::validation("transition duration must be >= 0"));
        }
        if !(self.params.is_null() || self.params.is_object()) {
            return Err(ReelError::validation(
                "transition params must be an object when set",
            ));
        }
        Ok(())
    }

    /// The overlap range when this transition starts at `at`.
    pub fn overlap_range(&self, at: Time) -> TimeRange {
        TimeRange {
            start: at,
            duration: self.duration.max(Time::ZERO),
        }
    }
}

/// Capability marker: this provider may be one side of a video transition.
pub trait TransitionableVideoProvider: VideoCompositionProvider {
    /// The shared transition descriptor, if the timeline attached one.
    fn video_transition(&self) -> Option<Arc<TransitionDescriptor>>;
}

/// Capability marker: this provider may be one side of an audio transition.
pub trait TransitionableAudioProvider: AudioProvider {
    /// The shared transition descriptor, if the timeline attached one.
    fn audio_transition(&self) -> Option<Arc<TransitionDescriptor>>;
}

impl TransitionableVideoProvider for TrackItem {
    fn video_transition(&self) -> Option<Arc<TransitionDescriptor>> {
        self.video_transition.clone()
    }
}

impl TransitionableAudioProvider for TrackItem {
    fn audio_transition(&self) -> Option<Arc<TransitionDescriptor>> {
        self.audio_transition.clone()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/transitions.rs"]
mod tests;
