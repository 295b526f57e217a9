use std::collections::{BTreeMap, BTreeSet};

/// A named participant, drawn as one vertical lane per sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct Peer {
    pub name: String,
    pub label: String,
    pub description: Option<String>,
}

impl Peer {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            label: name.clone(),
            name,
            description: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }
}

/// Per-message styling. `class` is added to the source peer's lane for the
/// message's sequence; `extra` entries pass through as drawing attributes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MessageAttrs {
    pub class: Option<String>,
    pub extra: BTreeMap<String, String>,
}

impl MessageAttrs {
    pub fn with_class(class: impl Into<String>) -> Self {
        Self {
            class: Some(class.into()),
            extra: BTreeMap::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.class.is_none() && self.extra.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub source: String,
    pub target: String,
    pub text: String,
    pub attrs: MessageAttrs,
}

impl Message {
    pub fn new(source: impl Into<String>, target: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            text: text.into(),
            attrs: MessageAttrs::default(),
        }
    }

    pub fn with_attrs(mut self, attrs: MessageAttrs) -> Self {
        self.attrs = attrs;
        self
    }

    pub fn is_self(&self) -> bool {
        self.source == self.target
    }
}

/// A normalized diagram: peers in declaration order plus message sequences.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Swimlane {
    pub peers: Vec<Peer>,
    pub css: Vec<String>,
    pub sequences: Vec<Vec<Message>>,
}

impl Swimlane {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn peer_index(&self, name: &str) -> Option<usize> {
        self.peers.iter().position(|peer| peer.name == name)
    }

    pub fn peer(&self, name: &str) -> Option<&Peer> {
        self.peers.iter().find(|peer| peer.name == name)
    }

    /// Names of the peers that send or receive at least one message in
    /// `sequence`. Empty when the sequence does not exist.
    pub fn participants(&self, sequence: usize) -> BTreeSet<&str> {
        let mut names = BTreeSet::new();
        if let Some(messages) = self.sequences.get(sequence) {
            for message in messages {
                names.insert(message.source.as_str());
                names.insert(message.target.as_str());
            }
        }
        names
    }

    pub fn message_count(&self) -> usize {
        self.sequences.iter().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn peer_label_defaults_to_name() {
        let peer = Peer::new("client");
        assert_eq!(peer.label, "client");
        assert_eq!(peer.with_label("Client").label, "Client");
    }

    #[test]
    fn participants_cover_sources_and_targets() {
        let mut diagram = Swimlane::new();
        diagram.peers = vec![Peer::new("a"), Peer::new("b"), Peer::new("c")];
        diagram.sequences = vec![
            vec![Message::new("a", "b", "x")],
            vec![Message::new("c", "c", "y")],
        ];
        assert_eq!(diagram.participants(0).into_iter().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(diagram.participants(1).into_iter().collect::<Vec<_>>(), vec!["c"]);
        assert!(diagram.participants(2).is_empty());
        assert_eq!(diagram.message_count(), 2);
    }

    #[test]
    fn empty_attrs_are_not_a_style_set() {
        assert!(MessageAttrs::default().is_empty());
        assert!(!MessageAttrs::with_class("x").is_empty());
    }
}
