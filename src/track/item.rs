use std::sync::Arc;

use crate::{
    effects::transitions::TransitionDescriptor, resource::track_resource::TrackResource,
    track::configuration::TrackConfiguration,
};

/// Allocator for item identifiers, passed explicitly into construction so no
/// hidden global state is involved.
pub trait IdentifierAllocator {
    /// Produce the next unique identifier.
    fn next_identifier(&mut self) -> String;
}

/// Prefix + counter allocator; unique within one allocator instance.
#[derive(Clone, Debug)]
pub struct SequentialIdAllocator {
    prefix: String,
    next: u64,
}

impl SequentialIdAllocator {
    /// New allocator producing `{prefix}-{counter}` identifiers.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 0,
        }
    }
}

impl Default for SequentialIdAllocator {
    fn default() -> Self {
        Self::new("item")
    }
}

impl IdentifierAllocator for SequentialIdAllocator {
    fn next_identifier(&mut self) -> String {
        let id = format!("{}-{:08}", self.prefix, self.next);
        self.next += 1;
        id
    }
}

/// One placed clip: a resource plus its placement/rendering configuration,
/// the unit handed to the composition track builder, visual compositor and
/// audio mixer.
#[derive(Debug)]
pub struct TrackItem {
    identifier: String,
    /// The source media unit; exclusively owned by this item.
    pub resource: TrackResource,
    /// Placement and rendering parameters; exclusively owned by this item.
    pub configuration: TrackConfiguration,
    /// Transition shared with the preceding/following timeline neighbor.
    pub video_transition: Option<Arc<TransitionDescriptor>>,
    /// Audio counterpart of [`Self::video_transition`].
    pub audio_transition: Option<Arc<TransitionDescriptor>>,
}

impl TrackItem {
    /// Construct an item around a resource; the configuration starts empty
    /// and callers reconcile placement via [`Self::reload_timeline_duration`].
    pub fn new(resource: TrackResource, ids: &mut dyn IdentifierAllocator) -> Self {
        Self {
            identifier: ids.next_identifier(),
            resource,
            configuration: TrackConfiguration::default(),
            video_transition: None,
            audio_transition: None,
        }
    }

    /// Globally unique identifier assigned at construction.
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Copy the resource's trim duration into the timeline placement,
    /// preserving the placement start.
    ///
    /// There is no implicit auto-sync: call this whenever the resource's trim
    /// range changes. Pure data transform, no failure mode.
    pub fn reload_timeline_duration(&mut self) {
        self.configuration.timeline_time_range.duration = self.resource.time_range().duration;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/track/item.rs"]
mod tests;
