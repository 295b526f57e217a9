use super::{TextAnchor, TextPrimitive, TextRole};
use crate::config::MAX_HALO_RADIUS;

/// Label over a lane, centered on its midline.
pub(super) fn peer_label(text: &str, x: f32, y: f32) -> TextPrimitive {
    TextPrimitive {
        x,
        y,
        text: text.to_string(),
        role: TextRole::PeerLabel,
        anchor: TextAnchor::Middle,
        classes: vec!["peer-label".to_string()],
    }
}

/// A message label with its halo: `(2r+1)^2` background copies at every
/// integer offset within `radius`, then the real label on top at (x, y).
/// The halo hides whatever line passes under the text.
pub(super) fn halo_label(
    text: &str,
    x: f32,
    y: f32,
    radius: i32,
    extra_class: Option<&str>,
) -> Vec<TextPrimitive> {
    let radius = radius.clamp(0, MAX_HALO_RADIUS);
    let copies = radius
        .checked_mul(2)
        .and_then(|d| d.checked_add(1))
        .and_then(|side| usize::try_from(side).ok())
        .and_then(|side| side.checked_mul(side))
        .unwrap_or(0);
    let mut classes = vec!["message-label".to_string()];
    if let Some(class) = extra_class {
        classes.push(class.to_string());
    }

    let mut out = Vec::with_capacity(copies + 1);
    for dx in -radius..=radius {
        for dy in -radius..=radius {
            out.push(TextPrimitive {
                x: x + dx as f32,
                y: y + dy as f32,
                text: text.to_string(),
                role: TextRole::Halo,
                anchor: TextAnchor::Start,
                classes: classes.clone(),
            });
        }
    }
    out.push(TextPrimitive {
        x,
        y,
        text: text.to_string(),
        role: TextRole::MessageLabel,
        anchor: TextAnchor::Start,
        classes,
    });
    out
}
