use std::sync::Arc;

use crate::foundation::core::{Affine, RenderSize, Time, TimeRange};

/// Media kind of a composition track or a source sub-track.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    /// Picture stream.
    Video,
    /// Sound stream.
    Audio,
}

/// One stream of a resolved media asset.
#[derive(Clone, Debug)]
pub struct MediaSubTrack {
    /// Stream kind.
    pub kind: MediaKind,
    /// Buffer dimensions before any orientation correction (zero for audio).
    pub natural_size: RenderSize,
    /// The range of source time this stream covers.
    pub time_range: TimeRange,
    /// Intrinsic orientation transform, expressed in the media's native
    /// (non-flipped) coordinate convention.
    pub preferred_transform: Affine,
}

impl MediaSubTrack {
    /// A video stream with an identity orientation transform.
    pub fn video(natural_size: RenderSize, time_range: TimeRange) -> Self {
        Self {
            kind: MediaKind::Video,
            natural_size,
            time_range,
            preferred_transform: Affine::IDENTITY,
        }
    }

    /// An audio stream.
    pub fn audio(time_range: TimeRange) -> Self {
        Self {
            kind: MediaKind::Audio,
            natural_size: RenderSize::new(0.0, 0.0),
            time_range,
            preferred_transform: Affine::IDENTITY,
        }
    }

    /// Replace the orientation transform.
    pub fn with_preferred_transform(mut self, transform: Affine) -> Self {
        self.preferred_transform = transform;
        self
    }
}

/// A resolved media handle: the opaque asset the decode collaborator returns.
///
/// Reelcore never decodes media itself; it only enumerates streams and reads
/// their geometry/timing.
#[derive(Clone, Debug, Default)]
pub struct MediaAsset {
    /// Collaborator-assigned identifier.
    pub identifier: String,
    /// Full source duration.
    pub duration: Time,
    /// All streams, in source order.
    pub tracks: Vec<MediaSubTrack>,
}

impl MediaAsset {
    /// Construct an asset with no streams yet.
    pub fn new(identifier: impl Into<String>, duration: Time) -> Self {
        Self {
            identifier: identifier.into(),
            duration,
            tracks: Vec::new(),
        }
    }

    /// Append a stream; returns `self` for chaining.
    pub fn with_track(mut self, track: MediaSubTrack) -> Self {
        self.tracks.push(track);
        self
    }

    /// Streams of the given kind, in source order.
    pub fn sub_tracks(&self, kind: MediaKind) -> impl Iterator<Item = &MediaSubTrack> {
        self.tracks.iter().filter(move |t| t.kind == kind)
    }

    /// First stream of the given kind, if any.
    pub fn first_sub_track(&self, kind: MediaKind) -> Option<&MediaSubTrack> {
        self.sub_tracks(kind).next()
    }

    /// The source range covering the whole asset.
    pub fn full_range(&self) -> TimeRange {
        TimeRange {
            start: Time::ZERO,
            duration: self.duration,
        }
    }
}

/// Where a [`crate::TrackResource`] gets its media from.
///
/// Subtype-specific persistence keys live on each variant; absent keys decode
/// to empty strings.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SourceDescriptor {
    /// An inline media file.
    File {
        /// Path understood by the media library.
        #[serde(default)]
        path: String,
    },
    /// An asset indexed by the media library.
    LibraryAsset {
        /// Library-scoped asset identifier.
        #[serde(default)]
        asset_identifier: String,
    },
}

impl SourceDescriptor {
    /// Whether there is nothing to resolve (a load is then a no-op).
    pub fn is_empty(&self) -> bool {
        match self {
            SourceDescriptor::File { path } => path.is_empty(),
            SourceDescriptor::LibraryAsset { asset_identifier } => asset_identifier.is_empty(),
        }
    }
}

impl Default for SourceDescriptor {
    fn default() -> Self {
        SourceDescriptor::File {
            path: String::new(),
        }
    }
}

/// One-shot completion for an asynchronous asset fetch.
pub type AssetFetchCompletion = Box<dyn FnOnce(Option<Arc<MediaAsset>>) + Send + 'static>;

/// The media decode/storage collaborator consumed by resource loading.
///
/// `fetch_asset` may invoke its completion synchronously or from any worker
/// context the library chooses; it must invoke it exactly once.
pub trait MediaLibrary: Send + Sync {
    /// Synchronous lookup of an already-materialized asset handle.
    fn resolve_asset(&self, identifier: &str) -> Option<Arc<MediaAsset>>;

    /// Asynchronously fetch the asset for a source descriptor.
    fn fetch_asset(&self, descriptor: &SourceDescriptor, completion: AssetFetchCompletion);
}
