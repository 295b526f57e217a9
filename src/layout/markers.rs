use super::{MarkerDef, MarkerKind};

const ARROW_RIGHT_PATH: &str = "M2,2 L2,11 L10,6 L2,2";
const ARROW_LEFT_PATH: &str = "M10,2 L10,11 L2,6 L10,2";
const TAIL_PATH: &str = "M2,2 L2,10 L10,10 L10,2 Z";

/// The decorations every arrow draws from. Built once per layout and
/// referenced by [`MarkerKind`], never copied per line.
pub(super) fn marker_set() -> Vec<MarkerDef> {
    vec![
        MarkerDef {
            kind: MarkerKind::ArrowLeft,
            path: Some(ARROW_LEFT_PATH),
            ref_x: 5.0,
            ref_y: 5.0,
            width: 10.0,
            height: 10.0,
        },
        MarkerDef {
            kind: MarkerKind::ArrowRight,
            path: Some(ARROW_RIGHT_PATH),
            ref_x: 5.0,
            ref_y: 5.0,
            width: 10.0,
            height: 10.0,
        },
        MarkerDef {
            kind: MarkerKind::Tail,
            path: Some(TAIL_PATH),
            ref_x: 6.0,
            ref_y: 6.0,
            width: 12.0,
            height: 12.0,
        },
        MarkerDef {
            kind: MarkerKind::Empty,
            path: None,
            ref_x: 0.0,
            ref_y: 0.0,
            width: 0.0,
            height: 0.0,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn one_definition_per_kind() {
        let markers = marker_set();
        let kinds: HashSet<_> = markers.iter().map(|m| m.kind).collect();
        assert_eq!(kinds.len(), markers.len());
        assert!(markers.iter().all(|m| (m.kind == MarkerKind::Empty) == m.path.is_none()));
    }
}
