use crate::{
    foundation::core::{Affine, Time, TimeRange},
    foundation::error::{ReelError, ReelResult},
    media::asset::{MediaAsset, MediaKind, MediaSubTrack},
    track::item::TrackItem,
};

/// Channel identifier selecting the first audio sub-track.
pub const AUDIO_CHANNEL_1: &str = "1";
/// Channel identifier selecting the second audio sub-track.
pub const AUDIO_CHANNEL_2: &str = "2";

/// One insertion of source media into a composition track.
#[derive(Clone, Debug, PartialEq)]
pub struct TrackSegment {
    /// Identifier of the resource the media came from.
    pub resource_identifier: String,
    /// Index of the source sub-track within its kind (0 = first video/audio).
    pub sub_track_index: usize,
    /// Trim range within the source media.
    pub source_range: TimeRange,
    /// Timeline instant the segment starts at.
    pub target_start: Time,
}

/// A destination lane of the composed timeline, either video or audio.
#[derive(Clone, Debug)]
pub struct CompositionTrack {
    kind: MediaKind,
    preferred_transform: Affine,
    segments: Vec<TrackSegment>,
}

impl CompositionTrack {
    /// New empty track of the given kind.
    pub fn new(kind: MediaKind) -> Self {
        Self {
            kind,
            preferred_transform: Affine::IDENTITY,
            segments: Vec::new(),
        }
    }

    /// The track's media kind.
    pub fn kind(&self) -> MediaKind {
        self.kind
    }

    /// Orientation transform copied from the last inserted video source.
    pub fn preferred_transform(&self) -> Affine {
        self.preferred_transform
    }

    /// Replace the track's orientation transform.
    pub fn set_preferred_transform(&mut self, transform: Affine) {
        self.preferred_transform = transform;
    }

    /// Inserted segments in insertion order.
    pub fn segments(&self) -> &[TrackSegment] {
        &self.segments
    }

    /// Insert `source_range` of a source sub-track at timeline instant `at`.
    ///
    /// Fails when the sub-track's kind does not match this track, or when the
    /// range is not contained in the sub-track's available range.
    pub fn insert_time_range(
        &mut self,
        sub_track: &MediaSubTrack,
        sub_track_index: usize,
        resource_identifier: &str,
        source_range: TimeRange,
        at: Time,
    ) -> ReelResult<()> {
        if sub_track.kind != self.kind {
            return Err(ReelError::insertion(format!(
                "cannot insert {:?} sub-track into {:?} track",
                sub_track.kind, self.kind
            )));
        }
        if !sub_track.time_range.contains_range(source_range) {
            return Err(ReelError::insertion(format!(
                "source range [{:.3}s, {:.3}s) exceeds sub-track range [{:.3}s, {:.3}s)",
                source_range.start.seconds(),
                source_range.end().seconds(),
                sub_track.time_range.start.seconds(),
                sub_track.time_range.end().seconds()
            )));
        }
        self.segments.push(TrackSegment {
            resource_identifier: resource_identifier.to_string(),
            sub_track_index,
            source_range,
            target_start: at,
        });
        Ok(())
    }
}

/// Capability of placing an item's media into a destination track.
pub trait CompositionTrackProvider {
    /// Insert this provider's media into `track`, picking the source
    /// sub-track appropriate for the track's kind and `channel_id`.
    fn configure_track(&self, track: &mut CompositionTrack, channel_id: &str);
}

impl CompositionTrackProvider for TrackItem {
    /// Places the item's media, assuming the resource is already `Available`.
    ///
    /// With an unresolved resource this is a silent no-op. Insertion failures
    /// and unavailable channels are reported to the log and never abort
    /// sibling insertions.
    fn configure_track(&self, track: &mut CompositionTrack, channel_id: &str) {
        let Some(asset) = self.resource.asset() else {
            return;
        };
        match track.kind() {
            MediaKind::Video => {
                if let Some(sub) = asset.first_sub_track(MediaKind::Video) {
                    track.set_preferred_transform(sub.preferred_transform);
                    insert_sub_track(self, track, sub, 0);
                }
            }
            MediaKind::Audio => match select_audio_sub_track(&asset, channel_id) {
                Ok(Some((index, sub))) => insert_sub_track(self, track, sub, index),
                Ok(None) => {}
                Err(err) => {
                    tracing::warn!(
                        item = self.identifier(),
                        channel_id,
                        %err,
                        "audio channel not available"
                    );
                }
            },
        }
    }
}

fn insert_sub_track(
    item: &TrackItem,
    track: &mut CompositionTrack,
    sub: &MediaSubTrack,
    index: usize,
) {
    if let Err(err) = track.insert_time_range(
        sub,
        index,
        &item.resource.identifier(),
        item.resource.time_range(),
        item.configuration.timeline_time_range.start,
    ) {
        tracing::error!(item = item.identifier(), %err, "composition track insertion failed");
    }
}

/// Select the audio sub-track for a channel identifier.
///
/// `"1"` selects sub-track 0 when present, `"2"` selects sub-track 1 only
/// when at least two exist (a single-channel source yields an explicit
/// channel-not-available error instead of out-of-bounds access), and any
/// other identifier falls back to sub-track 0.
pub(crate) fn select_audio_sub_track<'a>(
    asset: &'a MediaAsset,
    channel_id: &str,
) -> ReelResult<Option<(usize, &'a MediaSubTrack)>> {
    let mut tracks = asset.sub_tracks(MediaKind::Audio);
    match channel_id {
        AUDIO_CHANNEL_2 => {
            let first = tracks.next();
            match (first, tracks.next()) {
                (None, _) => Ok(None),
                (Some(_), Some(second)) => Ok(Some((1, second))),
                (Some(_), None) => Err(ReelError::insertion(format!(
                    "channel '{AUDIO_CHANNEL_2}' requested but source '{}' has one audio sub-track",
                    asset.identifier
                ))),
            }
        }
        _ => Ok(tracks.next().map(|t| (0, t))),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/track.rs"]
mod tests;
