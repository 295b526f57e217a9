use std::collections::BTreeSet;
use std::path::Path;

use pretty_assertions::assert_eq;
use swimlane::layout::{MarkerKind, TextRole};
use swimlane::{
    InputFormat, Layout, LayoutConfig, SwimlaneError, Theme, compute_layout, parse_swimlane,
    render_svg,
};

fn assert_valid_svg(svg: &str, fixture: &str) {
    assert!(svg.contains("<svg"), "{fixture}: missing <svg tag");
    assert!(svg.contains("</svg>"), "{fixture}: missing </svg tag");
}

fn fixture_path(rel: &str) -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(rel)
}

fn layout_fixture(rel: &str) -> Result<Layout, SwimlaneError> {
    let path = fixture_path(rel);
    let input = std::fs::read_to_string(&path).expect("fixture read failed");
    let diagram = parse_swimlane(&input, InputFormat::from_path(&path))?;
    compute_layout(&diagram, &Theme::classic(), &LayoutConfig::default())
}

#[test]
fn render_all_fixtures() {
    // Keep this list explicit so new fixtures must be added intentionally.
    let candidates = ["basic.json", "multi_sequence.yaml", "self_message.json5"];
    for rel in candidates {
        let layout = layout_fixture(rel).unwrap_or_else(|err| panic!("{rel}: {err}"));
        let svg = render_svg(&layout, &Theme::classic());
        assert_valid_svg(&svg, rel);
    }
}

#[test]
fn basic_request_response() {
    let layout = layout_fixture("basic.json").unwrap();
    assert_eq!(layout.rects().count(), 2);
    let heads: Vec<_> = layout.lines().map(|l| l.marker_end).collect();
    assert_eq!(heads, vec![MarkerKind::ArrowRight, MarkerKind::ArrowLeft]);
    let tails: Vec<_> = layout.lines().map(|l| l.marker_start).collect();
    assert_eq!(tails, vec![MarkerKind::Tail, MarkerKind::Empty]);
    assert_eq!(layout.texts(TextRole::MessageLabel).count(), 2);
}

#[test]
fn multi_sequence_properties() {
    let layout = layout_fixture("multi_sequence.yaml").unwrap();

    // one label per declared peer, using display labels
    let labels: BTreeSet<_> = layout
        .texts(TextRole::PeerLabel)
        .map(|t| t.text.as_str())
        .collect();
    assert_eq!(
        labels,
        BTreeSet::from(["API Gateway", "Database", "browser"])
    );
    assert_eq!(layout.texts(TextRole::PeerLabel).count(), 3);

    // visible lanes are exactly the participants of each sequence
    let first: Vec<_> = layout.visible_lanes(0).map(|l| l.peer.as_str()).collect();
    let second: Vec<_> = layout.visible_lanes(1).map(|l| l.peer.as_str()).collect();
    assert_eq!(first, vec!["browser", "api", "db"]);
    assert_eq!(second, vec!["browser", "api"]);

    // lanes of later sequences sit at the same x as earlier ones
    let xs = |seq: usize| -> Vec<f32> {
        layout
            .lanes
            .iter()
            .filter(|l| l.sequence == seq)
            .map(|l| l.rect.x)
            .collect()
    };
    assert_eq!(xs(0), xs(1));
    assert_eq!(xs(0), vec![0.0, 300.0, 600.0]);

    // vertical positions strictly increase across the whole diagram
    let ys: Vec<f32> = layout.messages.iter().map(|m| m.y).collect();
    assert!(ys.windows(2).all(|w| w[1] > w[0]), "{ys:?}");

    // exactly one initiating tail per sequence, on its first real message
    for seq in 0..2 {
        let tails: Vec<_> = layout
            .messages
            .iter()
            .filter(|m| m.sequence == seq)
            .filter_map(|m| m.arrow)
            .map(|a| a.tail)
            .collect();
        assert_eq!(tails[0], MarkerKind::Tail);
        assert!(tails[1..].iter().all(|t| *t == MarkerKind::Empty));
    }

    // the styled message puts its class on the api lane of sequence 0
    let styled = layout
        .rects()
        .filter(|r| r.classes.iter().any(|c| c == "slow"))
        .count();
    assert_eq!(styled, 1);
    assert!(layout.style.contains(".slow"));
}

#[test]
fn self_message_anchors_on_left_inset() {
    let layout = layout_fixture("self_message.json5").unwrap();
    assert_eq!(layout.lines().count(), 2);
    let timeout = layout
        .messages
        .iter()
        .find(|m| m.text == "Timeout")
        .unwrap();
    assert_eq!(timeout.arrow, None);
    assert_eq!(timeout.label_anchor, (20.0, timeout.y - 5.0));
}

#[test]
fn style_conflict_fails_whole_render() {
    let err = layout_fixture("style_conflict.json").unwrap_err();
    assert!(matches!(err, SwimlaneError::StyleConflict { ref peer, .. } if peer == "client"));
}

#[test]
fn unknown_peer_fails_at_normalization() {
    let path = fixture_path("unknown_peer.json");
    let input = std::fs::read_to_string(&path).unwrap();
    let err = parse_swimlane(&input, InputFormat::Json).unwrap_err();
    assert_eq!(err.to_string(), "message 0 of sequence 0 references undeclared peer `unknown`");
}

#[test]
fn lane_class_does_not_repaint_message_text() {
    let layout = layout_fixture("multi_sequence.yaml").unwrap();
    let label = layout
        .texts(TextRole::MessageLabel)
        .find(|t| t.text == "SELECT orders")
        .unwrap();
    assert_eq!(label.classes, vec!["message-label", "message-slow"]);
    assert!(
        layout
            .texts(TextRole::Halo)
            .all(|t| !t.classes.iter().any(|c| c == "slow"))
    );

    let svg = render_svg(&layout, &Theme::classic());
    assert!(svg.contains(".slow { fill: #fff3e0; }"));
    assert!(!svg.contains("message-label slow"));
    assert!(svg.contains("class=\"message-label message-slow\" text-anchor=\"start\" fill=\"black\">SELECT orders</text>"));
}
