use crate::{
    audio::mix::{AudioMixParameters, AudioProvider},
    compose::track::{AUDIO_CHANNEL_1, CompositionTrack, CompositionTrackProvider},
    media::asset::MediaKind,
    track::item::TrackItem,
};

/// Mix parameters for every audio input of a composed timeline, one per item.
#[derive(Clone, Debug, Default)]
pub struct AudioMix {
    /// Per-item input parameters in item order.
    pub inputs: Vec<AudioMixParameters>,
}

/// Output of one compose pass.
#[derive(Clone, Debug)]
pub struct ComposedTimeline {
    /// The single video lane.
    pub video_track: CompositionTrack,
    /// One audio lane per configured channel identifier.
    pub audio_tracks: Vec<(String, CompositionTrack)>,
    /// Per-item mix parameters.
    pub audio_mix: AudioMix,
}

/// Glue that iterates items and fans them out into destination tracks and the
/// audio mix. Insertion failures are reported by the providers and never
/// abort sibling items.
#[derive(Clone, Debug)]
pub struct TimelineComposer {
    channels: Vec<String>,
}

impl Default for TimelineComposer {
    fn default() -> Self {
        Self::new()
    }
}

impl TimelineComposer {
    /// Composer feeding a single audio channel (`"1"`).
    pub fn new() -> Self {
        Self {
            channels: vec![AUDIO_CHANNEL_1.to_string()],
        }
    }

    /// Composer feeding one audio lane per channel identifier.
    pub fn with_channels(channels: Vec<String>) -> Self {
        Self { channels }
    }

    /// Run one compose pass over `items`.
    ///
    /// Per item: place video into the video lane, place audio into each
    /// channel lane, and derive one set of mix parameters. Callers guarantee
    /// every resource already resolved `Available`; unresolved items degrade
    /// to gaps.
    #[tracing::instrument(skip(self, items), fields(items = items.len()))]
    pub fn compose(&self, items: &[TrackItem]) -> ComposedTimeline {
        let mut video_track = CompositionTrack::new(MediaKind::Video);
        let mut audio_tracks: Vec<(String, CompositionTrack)> = self
            .channels
            .iter()
            .map(|c| (c.clone(), CompositionTrack::new(MediaKind::Audio)))
            .collect();
        let mut audio_mix = AudioMix::default();

        for item in items {
            item.configure_track(&mut video_track, AUDIO_CHANNEL_1);
            for (channel, track) in &mut audio_tracks {
                item.configure_track(track, channel);
            }
            let mut parameters = AudioMixParameters::new();
            item.configure_mix(&mut parameters);
            audio_mix.inputs.push(parameters);
        }

        tracing::debug!(
            video_segments = video_track.segments().len(),
            mix_inputs = audio_mix.inputs.len(),
            "compose pass finished"
        );
        ComposedTimeline {
            video_track,
            audio_tracks,
            audio_mix,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/builder.rs"]
mod tests;
