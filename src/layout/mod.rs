mod geometry;
mod markers;
mod sequence;
mod text;
pub(crate) mod types;
pub use geometry::{arrowhead_for, label_anchor_x, left_inset, midline};
pub use types::*;
use markers::*;
use sequence::*;
use text::*;

use crate::config::LayoutConfig;
use crate::error::{Result, SwimlaneError};
use crate::ir::{MessageAttrs, Swimlane};
use crate::theme::Theme;
use std::collections::{BTreeMap, HashMap, HashSet};

/// Style-attribute set chosen for each source peer of one sequence.
pub(super) type PeerStyles<'a> = HashMap<&'a str, &'a MessageAttrs>;

/// Lay out the whole diagram in one pass.
///
/// Every call starts from a fresh cursor and peer registry, so the same
/// diagram can be laid out repeatedly with identical results. Invalid input
/// is rejected before any primitive is produced.
pub fn compute_layout(diagram: &Swimlane, theme: &Theme, config: &LayoutConfig) -> Result<Layout> {
    crate::parser::validate(diagram)?;
    let styles = diagram
        .sequences
        .iter()
        .enumerate()
        .map(|(seq_idx, _)| sequence_styles(diagram, seq_idx))
        .collect::<Result<Vec<_>>>()?;

    let mut state = LayoutState::new(diagram, config);
    for (seq_idx, seq_styles) in styles.iter().enumerate() {
        state.draw_sequence(seq_idx, seq_styles)?;
    }
    state.label_idle_peers();

    let peer_count = diagram.peers.len() as f32;
    let width = (peer_count * (config.peer_rect_width + config.peer_rect_gap)
        - config.peer_rect_gap)
        .max(0.0);
    let height = state.cursor.y;
    tracing::debug!(
        width,
        height,
        primitives = state.primitives.len(),
        "layout finished"
    );

    Ok(Layout {
        width,
        height,
        margin: config.canvas_margin,
        style: stylesheet(theme, &diagram.css),
        markers: marker_set(),
        primitives: state.primitives,
        lanes: state.lanes,
        messages: state.messages,
    })
}

/// At most one non-empty attribute set per source peer and sequence.
fn sequence_styles(diagram: &Swimlane, seq_idx: usize) -> Result<PeerStyles<'_>> {
    let mut styles = PeerStyles::new();
    let mut first_seen: HashMap<&str, usize> = HashMap::new();
    for (msg_idx, message) in diagram.sequences[seq_idx].iter().enumerate() {
        if message.attrs.is_empty() {
            continue;
        }
        let peer = message.source.as_str();
        if let Some(&first) = first_seen.get(peer) {
            return Err(SwimlaneError::StyleConflict {
                sequence: seq_idx,
                peer: peer.to_string(),
                first,
                second: msg_idx,
            });
        }
        first_seen.insert(peer, msg_idx);
        styles.insert(peer, &message.attrs);
    }
    Ok(styles)
}

fn stylesheet(theme: &Theme, extra: &[String]) -> String {
    let mut css = format!(
        ".peer-label, .message-label {{ font-family: {}; font-size: {}px; }}\n\
         .peer-label {{ fill: {}; }}\n",
        theme.font_family, theme.font_size, theme.peer_text_color
    );
    for fragment in extra {
        css.push_str(fragment);
        if !fragment.ends_with('\n') {
            css.push('\n');
        }
    }
    css
}
