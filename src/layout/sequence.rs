use super::*;

/// Drawing position. `x` is the next lane's left edge, `y` the next row.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub(super) struct Cursor {
    pub x: f32,
    pub y: f32,
}

/// Everything one layout pass mutates. Owned by a single
/// [`compute_layout`] call and dropped with it.
pub(super) struct LayoutState<'a> {
    diagram: &'a Swimlane,
    config: &'a LayoutConfig,
    pub(super) cursor: Cursor,
    /// Lane geometry of the sequence being drawn, indexed like `diagram.peers`.
    registry: Vec<Rect>,
    index: HashMap<&'a str, usize>,
    labeled: HashSet<usize>,
    pub(super) primitives: Vec<Primitive>,
    pub(super) lanes: Vec<LaneLayout>,
    pub(super) messages: Vec<MessageLayout>,
}

impl<'a> LayoutState<'a> {
    pub(super) fn new(diagram: &'a Swimlane, config: &'a LayoutConfig) -> Self {
        Self {
            diagram,
            config,
            cursor: Cursor::default(),
            registry: vec![Rect::default(); diagram.peers.len()],
            index: diagram
                .peers
                .iter()
                .enumerate()
                .map(|(idx, peer)| (peer.name.as_str(), idx))
                .collect(),
            labeled: HashSet::with_capacity(diagram.peers.len()),
            primitives: Vec::new(),
            lanes: Vec::new(),
            messages: Vec::new(),
        }
    }

    /// Run `f` and put the horizontal cursor back where it was.
    fn excursion<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        let saved_x = self.cursor.x;
        let out = f(self);
        self.cursor.x = saved_x;
        out
    }

    pub(super) fn draw_sequence(&mut self, seq_idx: usize, styles: &PeerStyles<'_>) -> Result<()> {
        let count = self.diagram.sequences[seq_idx].len();
        let gap = self.config.message_gap;
        let height = gap * (count as f32 + 1.0);
        tracing::debug!(
            sequence = seq_idx,
            messages = count,
            y = self.cursor.y,
            height,
            "laying out sequence"
        );

        self.excursion(|state| state.draw_lanes(seq_idx, height, styles));
        self.cursor.y += gap;
        self.draw_messages(seq_idx)?;
        self.cursor.y += gap / 2.0;
        Ok(())
    }

    pub(super) fn draw_lanes(&mut self, seq_idx: usize, height: f32, styles: &PeerStyles<'_>) {
        let diagram = self.diagram;
        let participants = diagram.participants(seq_idx);
        let width = self.config.peer_rect_width;
        for (idx, peer) in diagram.peers.iter().enumerate() {
            let rect = Rect {
                x: self.cursor.x,
                y: self.cursor.y,
                width,
                height,
            };
            self.registry[idx] = rect;
            let visible = participants.contains(peer.name.as_str());
            if visible {
                let mut classes = vec!["peer".to_string()];
                let mut attrs = BTreeMap::new();
                if let Some(style) = styles.get(peer.name.as_str()) {
                    if let Some(class) = &style.class {
                        classes.push(class.clone());
                    }
                    attrs = style.extra.clone();
                }
                self.primitives.push(Primitive::Rect(RectPrimitive {
                    rect,
                    corner_radius: self.config.peer_corner_radius,
                    classes,
                    attrs,
                    title: peer.description.clone(),
                }));
                if self.labeled.insert(idx) {
                    self.primitives.push(Primitive::Text(peer_label(
                        &peer.label,
                        midline(&rect),
                        rect.y - self.config.text_padding,
                    )));
                }
            }
            self.lanes.push(LaneLayout {
                peer: peer.name.clone(),
                sequence: seq_idx,
                rect,
                visible,
            });
            self.cursor.x += width + self.config.peer_rect_gap;
        }
    }

    fn draw_messages(&mut self, seq_idx: usize) -> Result<()> {
        let diagram = self.diagram;
        let mut initiating = true;
        for (msg_idx, message) in diagram.sequences[seq_idx].iter().enumerate() {
            let source = self.lane_of(seq_idx, msg_idx, &message.source)?;
            let target = self.lane_of(seq_idx, msg_idx, &message.target)?;
            let y = self.cursor.y;
            // Prefixed so lane rules such as `.slow { fill: .. }` never repaint text.
            let extra_class = message
                .attrs
                .class
                .as_deref()
                .map(|class| format!("message-{class}"));

            let (arrow, label_x) = if message.is_self() {
                (None, left_inset(&source, self.config.self_message_inset))
            } else {
                let source_x = midline(&source);
                let target_x = midline(&target);
                let tail = if initiating {
                    MarkerKind::Tail
                } else {
                    MarkerKind::Empty
                };
                initiating = false;
                let arrow = ArrowLayout {
                    x1: source_x,
                    x2: target_x,
                    y,
                    head: arrowhead_for(source_x, target_x),
                    tail,
                };
                let mut classes = vec!["message".to_string()];
                if let Some(class) = &extra_class {
                    classes.push(class.clone());
                }
                self.primitives.push(Primitive::Line(LinePrimitive {
                    x1: source_x,
                    y1: y,
                    x2: target_x,
                    y2: y,
                    classes,
                    marker_start: arrow.tail,
                    marker_mid: MarkerKind::Empty,
                    marker_end: arrow.head,
                }));
                let label_x =
                    label_anchor_x(source_x, target_x, self.config.label_source_weight);
                (Some(arrow), label_x)
            };

            let label_y = y - self.config.text_padding;
            self.primitives.extend(
                halo_label(
                    &message.text,
                    label_x,
                    label_y,
                    self.config.halo_radius,
                    extra_class.as_deref(),
                )
                .into_iter()
                .map(Primitive::Text),
            );
            self.messages.push(MessageLayout {
                sequence: seq_idx,
                index: msg_idx,
                source: message.source.clone(),
                target: message.target.clone(),
                text: message.text.clone(),
                y,
                arrow,
                label_anchor: (label_x, label_y),
            });
            self.cursor.y += self.config.message_gap;
        }
        Ok(())
    }

    /// Peers no sequence involves still get their one label, above the
    /// position their first lane would have.
    pub(super) fn label_idle_peers(&mut self) {
        let diagram = self.diagram;
        let stride = self.config.peer_rect_width + self.config.peer_rect_gap;
        for (idx, peer) in diagram.peers.iter().enumerate() {
            if self.labeled.insert(idx) {
                let x = idx as f32 * stride + self.config.peer_rect_width / 2.0;
                self.primitives.push(Primitive::Text(peer_label(
                    &peer.label,
                    x,
                    -self.config.text_padding,
                )));
            }
        }
    }

    fn lane_of(&self, sequence: usize, index: usize, name: &str) -> Result<Rect> {
        self.index
            .get(name)
            .map(|&idx| self.registry[idx])
            .ok_or_else(|| SwimlaneError::UnknownPeer {
                sequence,
                index,
                peer: name.to_string(),
            })
    }
}
