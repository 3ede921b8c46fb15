//! Reelcore is a timeline composition core for non-linear video editing.
//!
//! It assembles independent media resources (video/audio clips) into a single
//! multi-track timeline, computes per-frame visual transforms for rendering,
//! and derives audio-mix parameters for playback/export.
//!
//! # Pipeline overview
//!
//! 1. **Load**: [`TrackResource`] resolves its underlying media through a
//!    [`MediaLibrary`] collaborator (the only asynchronous operation).
//! 2. **Place**: [`CompositionTrackProvider`] inserts each [`TrackItem`]'s
//!    media into destination [`CompositionTrack`]s, selecting the right
//!    source sub-track (video, or audio by channel identifier).
//! 3. **Transform**: [`VideoCompositionProvider`] derives the per-frame
//!    orientation-corrected aspect-fit/fill transform.
//! 4. **Mix**: [`AudioProvider`] derives per-item volume ramps and processing
//!    chains for the destination audio mix.
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **No media IO**: decoding, storage and rendering belong to external
//!   collaborators behind the [`MediaLibrary`] boundary.
//! - **Degrade, don't abort**: unresolved resources become no-ops and
//!   insertion failures are reported without stopping sibling items.
#![forbid(unsafe_code)]

mod audio;
mod compose;
mod effects;
mod foundation;
mod media;
mod resource;
mod track;
mod video;

pub use audio::mix::{
    AudioMixParameters, AudioProcessingChain, AudioProcessingNode, AudioProvider, AudioTapHolder,
    SharedTapHolder, VolumeRamp, lock_tap_holder,
};
pub use compose::builder::{AudioMix, ComposedTimeline, TimelineComposer};
pub use compose::track::{
    AUDIO_CHANNEL_1, AUDIO_CHANNEL_2, CompositionTrack, CompositionTrackProvider, TrackSegment,
};
pub use effects::transitions::{
    TransitionDescriptor, TransitionableAudioProvider, TransitionableVideoProvider,
};
pub use foundation::core::{
    Affine, DEFAULT_TIMESCALE, Point, Rect, RenderSize, Time, TimeRange, Vec2,
};
pub use foundation::error::{ReelError, ReelResult};
pub use media::asset::{
    AssetFetchCompletion, MediaAsset, MediaKind, MediaLibrary, MediaSubTrack, SourceDescriptor,
};
pub use resource::track_resource::{LoadCompletion, ResourceStatus, TrackResource};
pub use track::configuration::{
    AudioConfiguration, ContentMode, TrackConfiguration, VideoConfiguration,
};
pub use track::item::{IdentifierAllocator, SequentialIdAllocator, TrackItem};
pub use video::compositor::{
    AnimationLayer, FrameImage, VideoCompositionProvider, aspect_fill_transform,
    aspect_fit_transform,
};
