use crate::{
    audio::mix::SharedTapHolder,
    foundation::core::TimeRange,
    foundation::error::{ReelError, ReelResult},
};

/// Scaling policy used when placing a source frame into the render rect.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentMode {
    /// Uniform `min` scale; the whole frame stays visible, letterboxed.
    #[default]
    AspectFit,
    /// Uniform `max` scale; the frame covers the rect, overflow is cropped.
    AspectFill,
}

/// Per-item video rendering parameters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct VideoConfiguration {
    /// Base scaling policy before any animated effects.
    #[serde(default)]
    pub base_content_mode: ContentMode,
}

/// Per-item audio parameters.
#[derive(Clone, Debug)]
pub struct AudioConfiguration {
    /// Constant gain in `[0, 1]`.
    pub volume: f32,
    /// Optional processing-chain attachment handed to the audio mix.
    pub tap_holder: Option<SharedTapHolder>,
}

impl Default for AudioConfiguration {
    fn default() -> Self {
        Self {
            volume: 1.0,
            tap_holder: None,
        }
    }
}

/// Placement and rendering parameters for one [`crate::TrackItem`].
#[derive(Clone, Debug, Default)]
pub struct TrackConfiguration {
    /// The item's position on the destination timeline. `duration` mirrors
    /// the resource's trim duration after
    /// [`crate::TrackItem::reload_timeline_duration`].
    pub timeline_time_range: TimeRange,
    /// Video parameters.
    pub video: VideoConfiguration,
    /// Audio parameters.
    pub audio: AudioConfiguration,
}

impl TrackConfiguration {
    /// Validate configuration invariants.
    pub fn validate(&self) -> ReelResult<()> {
        if !self.audio.volume.is_finite() || !(0.0..=1.0).contains(&self.audio.volume) {
            return Err(ReelError::validation("audio volume must be in [0, 1]"));
        }
        if !self.timeline_time_range.start.is_valid()
            || !self.timeline_time_range.duration.is_valid()
        {
            return Err(ReelError::validation(
                "timeline time range must use a positive timescale",
            ));
        }
        Ok(())
    }
}
