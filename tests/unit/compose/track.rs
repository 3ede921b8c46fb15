use std::sync::Arc;

use super::*;
use crate::foundation::core::RenderSize;
use crate::resource::track_resource::TrackResource;
use crate::track::item::SequentialIdAllocator;

fn asset(identifier: &str, audio_channels: usize) -> Arc<MediaAsset> {
    let duration = Time::from_value(1200);
    let range = TimeRange {
        start: Time::ZERO,
        duration,
    };
    let mut asset = MediaAsset::new(identifier, duration).with_track(
        MediaSubTrack::video(RenderSize::new(1920.0, 1080.0), range)
            .with_preferred_transform(Affine::rotate(std::f64::consts::FRAC_PI_2)),
    );
    for _ in 0..audio_channels {
        asset = asset.with_track(MediaSubTrack::audio(range));
    }
    Arc::new(asset)
}

fn placed_item(asset: Arc<MediaAsset>, timeline_start: Time) -> TrackItem {
    let resource = TrackResource::from_resolved(asset, TimeRange {
        start: Time::ZERO,
        duration: Time::from_value(1200),
    });
    let mut ids = SequentialIdAllocator::default();
    let mut item = TrackItem::new(resource, &mut ids);
    item.configuration.timeline_time_range.start = timeline_start;
    item.reload_timeline_duration();
    item
}

#[test]
fn video_insert_copies_preferred_transform_and_places_segment() {
    let item = placed_item(asset("a", 2), Time::from_value(600));
    let mut track = CompositionTrack::new(MediaKind::Video);

    item.configure_track(&mut track, AUDIO_CHANNEL_1);

    assert_eq!(
        track.preferred_transform(),
        Affine::rotate(std::f64::consts::FRAC_PI_2)
    );
    let segments = track.segments();
    assert_eq!(segments.len(), 1);
    assert_eq!(segments[0].target_start, Time::from_value(600));
    assert_eq!(segments[0].source_range, item.resource.time_range());
    assert_eq!(segments[0].sub_track_index, 0);
}

#[test]
fn unresolved_resource_is_silent_noop() {
    let resource = TrackResource::file("res-a", "clips/a.mov");
    let mut ids = SequentialIdAllocator::default();
    let item = TrackItem::new(resource, &mut ids);

    let mut video = CompositionTrack::new(MediaKind::Video);
    let mut audio = CompositionTrack::new(MediaKind::Audio);
    item.configure_track(&mut video, AUDIO_CHANNEL_1);
    item.configure_track(&mut audio, AUDIO_CHANNEL_1);

    assert!(video.segments().is_empty());
    assert!(audio.segments().is_empty());
}

#[test]
fn channel_one_selects_first_audio_sub_track() {
    for channels in [1usize, 2] {
        let item = placed_item(asset("a", channels), Time::ZERO);
        let mut track = CompositionTrack::new(MediaKind::Audio);
        item.configure_track(&mut track, AUDIO_CHANNEL_1);
        assert_eq!(track.segments().len(), 1);
        assert_eq!(track.segments()[0].sub_track_index, 0);
    }
}

#[test]
fn channel_two_requires_two_sub_tracks() {
    let a = asset("a", 2);
    assert_eq!(select_audio_sub_track(&a, AUDIO_CHANNEL_2).unwrap().unwrap().0, 1);

    // One channel: reported error, not out-of-bounds access.
    let a = asset("a", 1);
    assert!(select_audio_sub_track(&a, AUDIO_CHANNEL_2).is_err());

    // No audio at all: silently nothing to select.
    let a = asset("a", 0);
    assert!(select_audio_sub_track(&a, AUDIO_CHANNEL_2).unwrap().is_none());
}

#[test]
fn channel_two_error_skips_insertion() {
    let item = placed_item(asset("a", 1), Time::ZERO);
    let mut track = CompositionTrack::new(MediaKind::Audio);
    item.configure_track(&mut track, AUDIO_CHANNEL_2);
    assert!(track.segments().is_empty());
}

#[test]
fn unknown_channel_falls_back_to_first_sub_track() {
    let a = asset("a", 2);
    assert_eq!(select_audio_sub_track(&a, "surround").unwrap().unwrap().0, 0);
    assert_eq!(select_audio_sub_track(&a, "").unwrap().unwrap().0, 0);
}

#[test]
fn insert_rejects_kind_mismatch() {
    let a = asset("a", 1);
    let video_sub = a.first_sub_track(MediaKind::Video).unwrap();
    let mut audio_track = CompositionTrack::new(MediaKind::Audio);
    let err = audio_track
        .insert_time_range(video_sub, 0, "res-a", TimeRange::ZERO, Time::ZERO)
        .unwrap_err();
    assert!(err.to_string().contains("insertion error"));
}

#[test]
fn insert_rejects_range_outside_sub_track() {
    let a = asset("a", 1);
    let video_sub = a.first_sub_track(MediaKind::Video).unwrap();
    let mut track = CompositionTrack::new(MediaKind::Video);
    let beyond = TimeRange {
        start: Time::from_value(600),
        duration: Time::from_value(1200),
    };
    assert!(
        track
            .insert_time_range(video_sub, 0, "res-a", beyond, Time::ZERO)
            .is_err()
    );
    assert!(track.segments().is_empty());
}
