use super::{MarkerKind, Rect};

/// Horizontal center of a lane; arrows start and end here.
pub fn midline(rect: &Rect) -> f32 {
    rect.x + rect.width / 2.0
}

/// Point `fraction` of the width in from the left edge; self-message labels
/// are anchored here.
pub fn left_inset(rect: &Rect, fraction: f32) -> f32 {
    rect.x + rect.width * fraction
}

/// Arrowheads always point from source towards target.
pub fn arrowhead_for(source_x: f32, target_x: f32) -> MarkerKind {
    if target_x > source_x {
        MarkerKind::ArrowRight
    } else {
        MarkerKind::ArrowLeft
    }
}

/// Label x anchor between two midlines, weighted towards the source.
pub fn label_anchor_x(source_x: f32, target_x: f32, source_weight: f32) -> f32 {
    source_x * source_weight + target_x * (1.0 - source_weight)
}
