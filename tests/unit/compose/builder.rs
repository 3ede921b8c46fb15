use std::sync::Arc;

use super::*;
use crate::compose::track::AUDIO_CHANNEL_2;
use crate::foundation::core::{RenderSize, Time, TimeRange};
use crate::media::asset::{MediaAsset, MediaSubTrack};
use crate::resource::track_resource::TrackResource;
use crate::track::item::SequentialIdAllocator;

fn asset(identifier: &str, duration: Time, audio_channels: usize) -> Arc<MediaAsset> {
    let range = TimeRange {
        start: Time::ZERO,
        duration,
    };
    let mut asset = MediaAsset::new(identifier, duration)
        .with_track(MediaSubTrack::video(RenderSize::new(1280.0, 720.0), range));
    for _ in 0..audio_channels {
        asset = asset.with_track(MediaSubTrack::audio(range));
    }
    Arc::new(asset)
}

fn item(
    ids: &mut SequentialIdAllocator,
    asset: Arc<MediaAsset>,
    trim: TimeRange,
    timeline_start: Time,
) -> TrackItem {
    let resource = TrackResource::from_resolved(asset, trim);
    let mut item = TrackItem::new(resource, ids);
    item.configuration.timeline_time_range.start = timeline_start;
    item.reload_timeline_duration();
    item
}

#[test]
fn compose_places_all_items_and_derives_mix() {
    let mut ids = SequentialIdAllocator::default();
    let duration = Time::from_value(1200);
    let trim = TimeRange {
        start: Time::ZERO,
        duration,
    };
    let first = item(&mut ids, asset("a", duration, 2), trim, Time::ZERO);
    let mut second = item(&mut ids, asset("b", duration, 1), trim, duration);
    second.configuration.audio.volume = 0.5;

    let composer = TimelineComposer::new();
    let composed = composer.compose(&[first, second]);

    assert_eq!(composed.video_track.segments().len(), 2);
    assert_eq!(composed.audio_tracks.len(), 1);
    assert_eq!(composed.audio_tracks[0].1.segments().len(), 2);

    assert_eq!(composed.audio_mix.inputs.len(), 2);
    let ramp = composed.audio_mix.inputs[1].ramps[0];
    assert_eq!(ramp.from_volume, 0.5);
    assert_eq!(ramp.to_volume, 0.5);
    assert_eq!(ramp.range.start, duration);
    assert_eq!(ramp.range.duration, duration);
}

#[test]
fn two_channel_composer_splits_stereo_sources() {
    let mut ids = SequentialIdAllocator::default();
    let duration = Time::from_value(1200);
    let trim = TimeRange {
        start: Time::ZERO,
        duration,
    };
    let stereo = item(&mut ids, asset("a", duration, 2), trim, Time::ZERO);
    let mono = item(&mut ids, asset("b", duration, 1), trim, duration);

    let composer = TimelineComposer::with_channels(vec![
        AUDIO_CHANNEL_1.to_string(),
        AUDIO_CHANNEL_2.to_string(),
    ]);
    let composed = composer.compose(&[stereo, mono]);

    // Channel 1 carries both items; channel 2 only the stereo source.
    assert_eq!(composed.audio_tracks[0].1.segments().len(), 2);
    assert_eq!(composed.audio_tracks[1].1.segments().len(), 1);
    assert_eq!(composed.audio_tracks[1].1.segments()[0].sub_track_index, 1);
}

#[test]
fn insertion_failure_does_not_block_siblings() {
    let mut ids = SequentialIdAllocator::default();
    let duration = Time::from_value(1200);

    // Trim range extends past the media: insertion is reported and skipped.
    let broken = item(
        &mut ids,
        asset("a", duration, 1),
        TimeRange {
            start: Time::from_value(600),
            duration: Time::from_value(1200),
        },
        Time::ZERO,
    );
    let healthy = item(
        &mut ids,
        asset("b", duration, 1),
        TimeRange {
            start: Time::ZERO,
            duration,
        },
        duration,
    );

    let composed = TimelineComposer::new().compose(&[broken, healthy]);
    assert_eq!(composed.video_track.segments().len(), 1);
    assert_eq!(composed.video_track.segments()[0].resource_identifier, "b");
    assert_eq!(composed.audio_tracks[0].1.segments().len(), 1);
    // Mix parameters are still derived for both items.
    assert_eq!(composed.audio_mix.inputs.len(), 2);
}
