use crate::{
    foundation::core::{Affine, Rect, RenderSize, Time, TimeRange},
    media::asset::MediaKind,
    track::configuration::ContentMode,
    track::item::TrackItem,
};

/// Geometric stand-in for a source image buffer.
///
/// Carries the buffer's extent and the affine accumulated over it; the decode
/// collaborator's renderer applies the accumulated transform to actual pixels.
/// `transformed` mirrors image-semantics: the extent becomes the bounding box
/// of the transformed extent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameImage {
    /// Bounding extent in the destination buffer's coordinate space.
    pub extent: Rect,
    /// Affine accumulated over the original buffer.
    pub transform: Affine,
}

impl FrameImage {
    /// Frame covering `extent` with no transform applied yet.
    pub fn new(extent: Rect) -> Self {
        Self {
            extent,
            transform: Affine::IDENTITY,
        }
    }

    /// Frame of the given size anchored at the origin.
    pub fn with_size(width: f64, height: f64) -> Self {
        Self::new(Rect::new(0.0, 0.0, width, height))
    }

    /// Apply a further transform on top of the accumulated one.
    pub fn transformed(self, transform: Affine) -> Self {
        Self {
            extent: transform.transform_rect_bbox(self.extent),
            transform: transform * self.transform,
        }
    }

    /// Mirror the frame about the horizontal center line of its extent.
    fn flipped_y(self) -> Self {
        let flip = Affine::new([
            1.0,
            0.0,
            0.0,
            -1.0,
            0.0,
            self.extent.y0 * 2.0 + self.extent.height(),
        ]);
        self.transformed(flip)
    }
}

/// Extension point for overlay/animation layers. Carries no behavior in the
/// core yet; a future capability, not a defect.
#[derive(Clone, Debug, Default)]
pub struct AnimationLayer {}

/// Capability of producing the transformed image for a timeline instant.
pub trait VideoCompositionProvider {
    /// The provider's placement on the destination timeline.
    fn timeline_range(&self) -> TimeRange;

    /// Transform `source` for rendering at `at` into `render_size`.
    fn apply_effect(&self, source: FrameImage, at: Time, render_size: RenderSize) -> FrameImage;

    /// Attach overlay/animation content to `layer`. No-op by default.
    fn configure_animation_layer(&self, layer: &mut AnimationLayer) {
        let _ = layer;
    }
}

impl VideoCompositionProvider for TrackItem {
    fn timeline_range(&self) -> TimeRange {
        self.configuration.timeline_time_range
    }

    /// Orientation-correct and place the source frame.
    ///
    /// Without a resolvable video sub-track the source passes through
    /// unchanged. The orientation transform is defined in the media's native
    /// coordinate convention while the render buffer is flipped, hence the
    /// flip / orient / flip-back sandwich. `at` is unused by the base
    /// transform; it is the hook for time-varying effects.
    fn apply_effect(&self, source: FrameImage, at: Time, render_size: RenderSize) -> FrameImage {
        let _ = at;
        let Some(asset) = self.resource.asset() else {
            return source;
        };
        let Some(sub) = asset.first_sub_track(MediaKind::Video) else {
            return source;
        };

        let oriented = source
            .flipped_y()
            .transformed(sub.preferred_transform)
            .flipped_y();

        let target = render_size.bounds();
        let placement = match self.configuration.video.base_content_mode {
            ContentMode::AspectFit => aspect_fit_transform(oriented.extent, target),
            ContentMode::AspectFill => aspect_fill_transform(oriented.extent, target),
        };
        oriented.transformed(placement)
    }
}

/// Uniform-scale transform fitting `source` inside `target`, centered.
///
/// Scale is `min(target_w / source_w, target_h / source_h)`; a degenerate
/// source maps to the identity.
pub fn aspect_fit_transform(source: Rect, target: Rect) -> Affine {
    let (sw, sh) = (source.width(), source.height());
    if sw <= 0.0 || sh <= 0.0 {
        return Affine::IDENTITY;
    }
    scaled_centered(source, target, (target.width() / sw).min(target.height() / sh))
}

/// Uniform-scale transform covering `target` with `source`, centered,
/// cropping overflow. Scale is the `max` of the two axis ratios.
pub fn aspect_fill_transform(source: Rect, target: Rect) -> Affine {
    let (sw, sh) = (source.width(), source.height());
    if sw <= 0.0 || sh <= 0.0 {
        return Affine::IDENTITY;
    }
    scaled_centered(source, target, (target.width() / sw).max(target.height() / sh))
}

fn scaled_centered(source: Rect, target: Rect, scale: f64) -> Affine {
    let tx = target.x0 + (target.width() - source.width() * scale) / 2.0 - source.x0 * scale;
    let ty = target.y0 + (target.height() - source.height() * scale) / 2.0 - source.y0 * scale;
    Affine::new([scale, 0.0, 0.0, scale, tx, ty])
}

#[cfg(test)]
#[path = "../../tests/unit/video/compositor.rs"]
mod tests;
