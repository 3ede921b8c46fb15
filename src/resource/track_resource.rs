use std::sync::{Arc, Mutex, MutexGuard, Weak};

use crate::{
    foundation::core::{Time, TimeRange},
    foundation::error::{ReelError, ReelResult},
    media::asset::{MediaAsset, MediaLibrary, SourceDescriptor},
};

/// Availability lifecycle of a [`TrackResource`].
///
/// `Unavailable --(load)--> Loading --(resolve)--> Available | Unavailable`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceStatus {
    /// No usable media: initial state, or the last load failed.
    #[default]
    Unavailable,
    /// A fetch is outstanding; re-entrant loads join it instead of starting
    /// a second one.
    Loading,
    /// The underlying handle is materialized and media can be read.
    Available,
}

/// One-shot completion delivering the final status of a load.
pub type LoadCompletion = Box<dyn FnOnce(ResourceStatus) + Send + 'static>;

struct ResourceState {
    identifier: String,
    status: ResourceStatus,
    time_range: TimeRange,
    asset: Option<Arc<MediaAsset>>,
    source: SourceDescriptor,
    waiters: Vec<LoadCompletion>,
}

/// One source media unit with an asynchronous availability lifecycle.
///
/// Owned exclusively by one [`crate::TrackItem`]. State lives behind a mutex
/// only so a worker-context fetch completion can publish the resolved handle;
/// callers serialize all other mutation. The pending completion holds a
/// [`Weak`] to the state, so dropping the resource silently discards it.
pub struct TrackResource {
    state: Arc<Mutex<ResourceState>>,
}

impl std::fmt::Debug for TrackResource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = self.lock();
        f.debug_struct("TrackResource")
            .field("identifier", &s.identifier)
            .field("status", &s.status)
            .field("time_range", &s.time_range)
            .field("source", &s.source)
            .field("resolved", &s.asset.is_some())
            .finish()
    }
}

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
struct ResourceJson {
    #[serde(default)]
    identifier: String,
    #[serde(default)]
    time_range: TimeRange,
    #[serde(default)]
    source: SourceDescriptor,
}

impl TrackResource {
    /// A resource backed by an inline media file.
    pub fn file(identifier: impl Into<String>, path: impl Into<String>) -> Self {
        Self::from_parts(
            identifier.into(),
            TimeRange::ZERO,
            SourceDescriptor::File { path: path.into() },
        )
    }

    /// A resource backed by a library-indexed asset.
    ///
    /// The resource identifier mirrors the library's asset identifier.
    pub fn library_asset(asset_identifier: impl Into<String>) -> Self {
        let id = asset_identifier.into();
        Self::from_parts(
            id.clone(),
            TimeRange::ZERO,
            SourceDescriptor::LibraryAsset {
                asset_identifier: id,
            },
        )
    }

    /// A resource constructed from an already-resolved handle.
    ///
    /// Starts `Available`; a later `load_media` short-circuits.
    pub fn from_resolved(asset: Arc<MediaAsset>, time_range: TimeRange) -> Self {
        let resource = Self::from_parts(
            asset.identifier.clone(),
            time_range,
            SourceDescriptor::LibraryAsset {
                asset_identifier: asset.identifier.clone(),
            },
        );
        {
            let mut s = resource.lock();
            s.asset = Some(asset);
            s.status = ResourceStatus::Available;
        }
        resource
    }

    fn from_parts(identifier: String, time_range: TimeRange, source: SourceDescriptor) -> Self {
        Self {
            state: Arc::new(Mutex::new(ResourceState {
                identifier,
                status: ResourceStatus::Unavailable,
                time_range,
                asset: None,
                source,
                waiters: Vec::new(),
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, ResourceState> {
        lock_state(&self.state)
    }

    /// Project-unique identifier.
    pub fn identifier(&self) -> String {
        self.lock().identifier.clone()
    }

    /// Current lifecycle status.
    pub fn status(&self) -> ResourceStatus {
        self.lock().status
    }

    /// Sub-range of the underlying media to use.
    pub fn time_range(&self) -> TimeRange {
        self.lock().time_range
    }

    /// Set the trim range; independent of the lifecycle status.
    pub fn set_time_range(&self, time_range: TimeRange) {
        self.lock().time_range = time_range;
    }

    /// The resolved underlying handle, absent until `Available`.
    pub fn asset(&self) -> Option<Arc<MediaAsset>> {
        self.lock().asset.clone()
    }

    /// The source descriptor this resource resolves through.
    pub fn source(&self) -> SourceDescriptor {
        self.lock().source.clone()
    }

    /// Request the underlying media, delivering the final status exactly once.
    ///
    /// - Already `Available` with a live handle: completes immediately without
    ///   re-resolving.
    /// - Already `Loading`: the completion joins the in-flight load; no second
    ///   fetch is issued.
    /// - Library-asset sources first re-resolve a stale handle by identifier
    ///   before falling back to an asynchronous fetch.
    /// - An empty source descriptor completes with the current status.
    ///
    /// The completion may run on whatever worker context the library uses. If
    /// the resource is dropped before the fetch resolves, the completion is
    /// discarded without running.
    pub fn load_media(
        &self,
        library: &dyn MediaLibrary,
        completion: impl FnOnce(ResourceStatus) + Send + 'static,
    ) {
        let descriptor = {
            let mut s = self.lock();
            if s.status == ResourceStatus::Available && s.asset.is_some() {
                drop(s);
                completion(ResourceStatus::Available);
                return;
            }
            if s.status == ResourceStatus::Loading {
                s.waiters.push(Box::new(completion));
                return;
            }
            if s.source.is_empty() {
                let status = s.status;
                drop(s);
                completion(status);
                return;
            }
            if let SourceDescriptor::LibraryAsset { asset_identifier } = &s.source
                && s.asset.is_none()
                && let Some(found) = library.resolve_asset(asset_identifier)
            {
                adopt_asset(&mut s, found);
                tracing::debug!(identifier = %s.identifier, "resource re-resolved from library");
                drop(s);
                completion(ResourceStatus::Available);
                return;
            }
            s.status = ResourceStatus::Loading;
            s.waiters.push(Box::new(completion));
            s.source.clone()
        };

        // Non-owning observation of the originating resource: a dropped owner
        // drops the pending completion instead of keeping the state alive.
        let weak = Arc::downgrade(&self.state);
        library.fetch_asset(
            &descriptor,
            Box::new(move |asset| resolve_fetch(&weak, asset)),
        );
    }

    /// Encode `identifier`, `time_range` and subtype keys to a JSON mapping.
    pub fn to_json(&self) -> ReelResult<serde_json::Value> {
        let s = self.lock();
        serde_json::to_value(ResourceJson {
            identifier: s.identifier.clone(),
            time_range: s.time_range,
            source: s.source.clone(),
        })
        .map_err(|e| ReelError::serde(e.to_string()))
    }

    /// Decode a resource from a JSON mapping.
    ///
    /// Absent keys fall back to defaults (empty identifier, zero range, file
    /// source); the decoded resource always starts `Unavailable` with no
    /// handle. Malformed time values collapse to zero rather than failing.
    pub fn from_json(value: &serde_json::Value) -> ReelResult<Self> {
        let json: ResourceJson =
            serde_json::from_value(value.clone()).map_err(|e| ReelError::serde(e.to_string()))?;
        Ok(Self::from_parts(
            json.identifier,
            json.time_range.sanitized(),
            json.source,
        ))
    }
}

fn lock_state(state: &Mutex<ResourceState>) -> MutexGuard<'_, ResourceState> {
    // A poisoned lock still holds consistent resource state.
    state.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}

fn adopt_asset(s: &mut ResourceState, asset: Arc<MediaAsset>) {
    // An untrimmed resource adopts the asset's full range on first resolve.
    if s.time_range.is_empty() {
        s.time_range = TimeRange {
            start: Time::ZERO,
            duration: asset.duration,
        };
    }
    s.asset = Some(asset);
    s.status = ResourceStatus::Available;
}

fn resolve_fetch(weak: &Weak<Mutex<ResourceState>>, asset: Option<Arc<MediaAsset>>) {
    let Some(state) = weak.upgrade() else {
        return;
    };
    let (status, waiters) = {
        let mut s = lock_state(&state);
        match asset {
            Some(found) => adopt_asset(&mut s, found),
            None => s.status = ResourceStatus::Unavailable,
        }
        tracing::debug!(identifier = %s.identifier, status = ?s.status, "resource load resolved");
        (s.status, std::mem::take(&mut s.waiters))
    };
    // Waiters run outside the state lock; each fires exactly once.
    for waiter in waiters {
        waiter(status);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/resource/track_resource.rs"]
mod tests;
