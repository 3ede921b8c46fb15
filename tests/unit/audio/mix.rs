use std::sync::Arc;

use super::*;
use crate::foundation::core::Time;
use crate::media::asset::{MediaAsset, MediaSubTrack};
use crate::resource::track_resource::TrackResource;
use crate::track::item::SequentialIdAllocator;

fn audio_item(volume: f32, tap_holder: Option<SharedTapHolder>) -> TrackItem {
    let duration = Time::from_value(1200);
    let range = TimeRange {
        start: Time::ZERO,
        duration,
    };
    let asset = Arc::new(MediaAsset::new("a", duration).with_track(MediaSubTrack::audio(range)));
    let mut ids = SequentialIdAllocator::default();
    let mut item = TrackItem::new(TrackResource::from_resolved(asset, range), &mut ids);
    item.configuration.timeline_time_range = TimeRange {
        start: Time::from_value(600),
        duration,
    };
    item.configuration.audio.volume = volume;
    item.configuration.audio.tap_holder = tap_holder;
    item
}

#[test]
fn configure_applies_constant_ramp_over_timeline_range() {
    let item = audio_item(0.5, None);
    let mut parameters = AudioMixParameters::new();
    item.configure_mix(&mut parameters);

    assert_eq!(parameters.ramps.len(), 1);
    let ramp = parameters.ramps[0];
    assert_eq!(ramp.from_volume, 0.5);
    assert_eq!(ramp.to_volume, 0.5);
    assert_eq!(ramp.range, item.configuration.timeline_time_range);
    assert!(parameters.tap_holder.is_none());
}

#[test]
fn configure_installs_single_stage_volume_chain() {
    let holder = AudioTapHolder::shared();
    let item = audio_item(1.0, Some(holder.clone()));
    let mut parameters = AudioMixParameters::new();
    item.configure_mix(&mut parameters);

    let chain = lock_tap_holder(&holder).chain.clone().unwrap();
    assert_eq!(chain.nodes, vec![AudioProcessingNode::Volume]);
    // The parameters carry the same holder the configuration owns.
    assert!(parameters.tap_holder.is_some());
    assert!(Arc::ptr_eq(parameters.tap_holder.as_ref().unwrap(), &holder));
}

#[test]
fn configure_rebuilds_chain_from_scratch() {
    let holder = AudioTapHolder::shared();
    lock_tap_holder(&holder).chain = Some(AudioProcessingChain { nodes: vec![] });

    let item = audio_item(1.0, Some(holder.clone()));
    let mut parameters = AudioMixParameters::new();
    item.configure_mix(&mut parameters);
    item.configure_mix(&mut parameters);

    let chain = lock_tap_holder(&holder).chain.clone().unwrap();
    assert_eq!(chain, AudioProcessingChain::volume());
    // One ramp per configure call; each call starts a fresh chain.
    assert_eq!(parameters.ramps.len(), 2);
}
