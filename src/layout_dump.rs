use crate::layout::{Layout, MarkerKind};
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct LayoutDump {
    pub width: f32,
    pub height: f32,
    pub lanes: Vec<LaneDump>,
    pub messages: Vec<MessageDump>,
}

#[derive(Debug, Serialize)]
pub struct LaneDump {
    pub peer: String,
    pub sequence: usize,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub visible: bool,
}

#[derive(Debug, Serialize)]
pub struct MessageDump {
    pub sequence: usize,
    pub index: usize,
    pub source: String,
    pub target: String,
    pub text: String,
    pub y: f32,
    pub points: Vec<[f32; 2]>,
    pub head: Option<MarkerKind>,
    pub initiating: bool,
    pub label: [f32; 2],
}

impl LayoutDump {
    pub fn from_layout(layout: &Layout) -> Self {
        let lanes = layout
            .lanes
            .iter()
            .map(|lane| LaneDump {
                peer: lane.peer.clone(),
                sequence: lane.sequence,
                x: lane.rect.x,
                y: lane.rect.y,
                width: lane.rect.width,
                height: lane.rect.height,
                visible: lane.visible,
            })
            .collect();

        let messages = layout
            .messages
            .iter()
            .map(|message| MessageDump {
                sequence: message.sequence,
                index: message.index,
                source: message.source.clone(),
                target: message.target.clone(),
                text: message.text.clone(),
                y: message.y,
                points: message
                    .arrow
                    .map(|arrow| vec![[arrow.x1, arrow.y], [arrow.x2, arrow.y]])
                    .unwrap_or_default(),
                head: message.arrow.map(|arrow| arrow.head),
                initiating: message
                    .arrow
                    .is_some_and(|arrow| arrow.tail == MarkerKind::Tail),
                label: [message.label_anchor.0, message.label_anchor.1],
            })
            .collect();

        LayoutDump {
            width: layout.width,
            height: layout.height,
            lanes,
            messages,
        }
    }
}

pub fn write_layout_dump(path: &Path, layout: &Layout) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let dump = LayoutDump::from_layout(layout);
    serde_json::to_writer_pretty(writer, &dump)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutConfig;
    use crate::ir::{Message, Peer, Swimlane};
    use crate::layout::compute_layout;
    use crate::theme::Theme;

    #[test]
    fn dump_serializes_lanes_and_messages() {
        let diagram = Swimlane {
            peers: vec![Peer::new("client"), Peer::new("server")],
            css: Vec::new(),
            sequences: vec![vec![
                Message::new("client", "server", "ping"),
                Message::new("server", "server", "think"),
            ]],
        };
        let layout = compute_layout(&diagram, &Theme::classic(), &LayoutConfig::default()).unwrap();
        let dump = LayoutDump::from_layout(&layout);
        assert_eq!(dump.lanes.len(), 2);
        assert!(dump.messages[0].initiating);
        assert_eq!(dump.messages[0].points, vec![[100.0, 50.0], [400.0, 50.0]]);
        assert!(dump.messages[1].points.is_empty());

        let json = serde_json::to_value(&dump).unwrap();
        assert_eq!(json["messages"][0]["head"], "ArrowRight");
        assert_eq!(json["messages"][1]["head"], serde_json::Value::Null);
    }
}
