use crate::error::{Result, SwimlaneError};
use crate::ir::{Message, MessageAttrs, Peer, Swimlane};
use serde::Deserialize;
use serde_json::Value;
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum InputFormat {
    #[default]
    Json,
    Json5,
    Yaml,
}

impl InputFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml" | "yml") => Self::Yaml,
            Some("json5") => Self::Json5,
            _ => Self::Json,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Json => "JSON",
            Self::Json5 => "JSON5",
            Self::Yaml => "YAML",
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawSwimlane {
    peers: Vec<RawPeer>,
    #[serde(default)]
    css: RawCss,
    #[serde(default)]
    messages: RawMessages,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawPeer {
    Name(String),
    Pair(String, String),
    Full {
        name: String,
        label: Option<String>,
        description: Option<String>,
    },
}

#[derive(Debug, Default, Deserialize)]
#[serde(untagged)]
enum RawCss {
    #[default]
    None,
    One(String),
    Many(Vec<String>),
}

// A flat list of tuples is the single-sequence form; it only matches when
// the nested form fails, i.e. when the innermost items are not lists.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawMessages {
    Sequences(Vec<Vec<Vec<Value>>>),
    Flat(Vec<Vec<Value>>),
}

impl Default for RawMessages {
    fn default() -> Self {
        RawMessages::Sequences(Vec::new())
    }
}

/// Parse `input` in the given format and normalize it into a [`Swimlane`].
pub fn parse_swimlane(input: &str, format: InputFormat) -> Result<Swimlane> {
    let syntax = |message: String| SwimlaneError::Syntax {
        format: format.name(),
        message,
    };
    let raw: RawSwimlane = match format {
        InputFormat::Json => serde_json::from_str(input).map_err(|err| syntax(err.to_string()))?,
        InputFormat::Json5 => json5::from_str(input).map_err(|err| syntax(err.to_string()))?,
        InputFormat::Yaml => serde_yaml::from_str(input).map_err(|err| syntax(err.to_string()))?,
    };
    normalize_raw(raw)
}

fn normalize_raw(raw: RawSwimlane) -> Result<Swimlane> {
    let peers = raw
        .peers
        .into_iter()
        .map(|peer| match peer {
            RawPeer::Name(name) => Peer::new(name),
            RawPeer::Pair(name, label) => Peer::new(name).with_label(label),
            RawPeer::Full {
                name,
                label,
                description,
            } => {
                let mut peer = Peer::new(name);
                if let Some(label) = label {
                    peer.label = label;
                }
                peer.description = description;
                peer
            }
        })
        .collect::<Vec<_>>();

    let css = match raw.css {
        RawCss::None => Vec::new(),
        RawCss::One(fragment) => vec![fragment],
        RawCss::Many(fragments) => fragments,
    };

    let raw_sequences = match raw.messages {
        RawMessages::Sequences(sequences) => sequences,
        RawMessages::Flat(messages) => vec![messages],
    };

    let mut sequences = Vec::with_capacity(raw_sequences.len());
    for (seq_idx, raw_messages) in raw_sequences.into_iter().enumerate() {
        let mut messages = Vec::with_capacity(raw_messages.len());
        for (msg_idx, tuple) in raw_messages.into_iter().enumerate() {
            messages.push(message_from_tuple(tuple, seq_idx, msg_idx)?);
        }
        sequences.push(messages);
    }

    let diagram = Swimlane {
        peers,
        css,
        sequences,
    };
    validate(&diagram)?;
    tracing::debug!(
        peers = diagram.peers.len(),
        sequences = diagram.sequences.len(),
        messages = diagram.message_count(),
        "normalized swimlane"
    );
    Ok(diagram)
}

/// Re-check a model that was built in memory or normalized before.
/// Normalizing an already-normalized model returns it unchanged.
pub fn normalize(diagram: &Swimlane) -> Result<Swimlane> {
    validate(diagram)?;
    Ok(diagram.clone())
}

pub(crate) fn validate(diagram: &Swimlane) -> Result<()> {
    let mut names = HashSet::with_capacity(diagram.peers.len());
    for peer in &diagram.peers {
        if !names.insert(peer.name.as_str()) {
            return Err(SwimlaneError::DuplicatePeer(peer.name.clone()));
        }
    }
    for (seq_idx, messages) in diagram.sequences.iter().enumerate() {
        for (msg_idx, message) in messages.iter().enumerate() {
            for peer in [&message.source, &message.target] {
                if !names.contains(peer.as_str()) {
                    return Err(SwimlaneError::UnknownPeer {
                        sequence: seq_idx,
                        index: msg_idx,
                        peer: peer.clone(),
                    });
                }
            }
        }
    }
    Ok(())
}

fn message_from_tuple(tuple: Vec<Value>, sequence: usize, index: usize) -> Result<Message> {
    if !(3..=4).contains(&tuple.len()) {
        return Err(SwimlaneError::Arity {
            sequence,
            index,
            len: tuple.len(),
        });
    }
    let mut items = tuple.into_iter();
    let mut next_string = |field: &'static str| match items.next() {
        Some(Value::String(value)) => Ok(value),
        other => Err(SwimlaneError::InvalidField {
            sequence,
            index,
            field,
            reason: format!("must be a string, got {}", describe(other.as_ref())),
        }),
    };
    let source = next_string("source")?;
    let target = next_string("target")?;
    let text = next_string("text")?;
    let attrs = match items.next() {
        None | Some(Value::Null) => MessageAttrs::default(),
        Some(Value::Object(map)) => attrs_from_map(map, sequence, index)?,
        Some(other) => {
            return Err(SwimlaneError::InvalidField {
                sequence,
                index,
                field: "attrs",
                reason: format!("must be a mapping, got {}", describe(Some(&other))),
            });
        }
    };
    Ok(Message {
        source,
        target,
        text,
        attrs,
    })
}

fn attrs_from_map(
    map: serde_json::Map<String, Value>,
    sequence: usize,
    index: usize,
) -> Result<MessageAttrs> {
    let mut attrs = MessageAttrs::default();
    let mut extra = BTreeMap::new();
    for (key, value) in map {
        let value = match value {
            Value::String(s) => s,
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            other => {
                return Err(SwimlaneError::InvalidField {
                    sequence,
                    index,
                    field: "attrs",
                    reason: format!("value of `{key}` must be a scalar, got {}", describe(Some(&other))),
                });
            }
        };
        if key == "class" {
            attrs.class = Some(value);
        } else {
            extra.insert(key, value);
        }
    }
    attrs.extra = extra;
    Ok(attrs)
}

fn describe(value: Option<&Value>) -> &'static str {
    match value {
        None => "nothing",
        Some(Value::Null) => "null",
        Some(Value::Bool(_)) => "a boolean",
        Some(Value::Number(_)) => "a number",
        Some(Value::String(_)) => "a string",
        Some(Value::Array(_)) => "a list",
        Some(Value::Object(_)) => "a mapping",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_peer_forms_in_declaration_order() {
        let input = r#"{
            "peers": ["client", ["server", "API Server"], {"name": "db", "description": "storage"}],
            "messages": [[["client", "server", "hi"]]]
        }"#;
        let diagram = parse_swimlane(input, InputFormat::Json).unwrap();
        let names: Vec<_> = diagram.peers.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["client", "server", "db"]);
        assert_eq!(diagram.peers[0].label, "client");
        assert_eq!(diagram.peers[1].label, "API Server");
        assert_eq!(diagram.peers[2].label, "db");
        assert_eq!(diagram.peers[2].description.as_deref(), Some("storage"));
    }

    #[test]
    fn flat_message_list_is_one_sequence() {
        let input = r#"{
            "peers": ["client", "server"],
            "messages": [
                ["client", "server", "Send request"],
                ["server", "client", "Send response"]
            ]
        }"#;
        let diagram = parse_swimlane(input, InputFormat::Json).unwrap();
        assert_eq!(diagram.sequences.len(), 1);
        assert_eq!(diagram.sequences[0].len(), 2);
        assert_eq!(diagram.sequences[0][1], Message::new("server", "client", "Send response"));
    }

    #[test]
    fn three_tuples_get_empty_attrs_and_four_tuples_keep_theirs() {
        let input = r#"{
            "peers": ["a", "b"],
            "messages": [[["a", "b", "x"], ["b", "a", "y", {"class": "hot", "stroke-width": 2}]]]
        }"#;
        let diagram = parse_swimlane(input, InputFormat::Json).unwrap();
        assert!(diagram.sequences[0][0].attrs.is_empty());
        let attrs = &diagram.sequences[0][1].attrs;
        assert_eq!(attrs.class.as_deref(), Some("hot"));
        assert_eq!(attrs.extra.get("stroke-width").map(String::as_str), Some("2"));
    }

    #[test]
    fn rejects_wrong_arity() {
        let input = r#"{"peers": ["a", "b"], "messages": [[["a", "b"]]]}"#;
        let err = parse_swimlane(input, InputFormat::Json).unwrap_err();
        assert_eq!(
            err,
            SwimlaneError::Arity {
                sequence: 0,
                index: 0,
                len: 2
            }
        );
    }

    #[test]
    fn rejects_non_string_fields() {
        let input = r#"{"peers": ["a", "b"], "messages": [[["a", 7, "x"]]]}"#;
        let err = parse_swimlane(input, InputFormat::Json).unwrap_err();
        assert!(matches!(err, SwimlaneError::InvalidField { field: "target", .. }));
    }

    #[test]
    fn rejects_unknown_peer() {
        let input = r#"{"peers": ["client"], "messages": [[["client", "unknown", "x"]]]}"#;
        let err = parse_swimlane(input, InputFormat::Json).unwrap_err();
        assert_eq!(
            err,
            SwimlaneError::UnknownPeer {
                sequence: 0,
                index: 0,
                peer: "unknown".to_string()
            }
        );
    }

    #[test]
    fn rejects_duplicate_peer() {
        let input = r#"{"peers": ["a", "a"], "messages": []}"#;
        let err = parse_swimlane(input, InputFormat::Json).unwrap_err();
        assert_eq!(err, SwimlaneError::DuplicatePeer("a".to_string()));
    }

    #[test]
    fn reports_syntax_errors_with_format() {
        let err = parse_swimlane("{", InputFormat::Json).unwrap_err();
        assert!(matches!(err, SwimlaneError::Syntax { format: "JSON", .. }));
    }

    #[test]
    fn parses_yaml_and_json5() {
        let yaml = "peers: [client, server]\nmessages:\n  - - [client, server, ping]\n";
        let from_yaml = parse_swimlane(yaml, InputFormat::Yaml).unwrap();
        let json5 = "{peers: ['client', 'server'], messages: [[['client', 'server', 'ping']]],}";
        let from_json5 = parse_swimlane(json5, InputFormat::Json5).unwrap();
        assert_eq!(from_yaml, from_json5);
    }

    #[test]
    fn css_accepts_string_or_list() {
        let one = parse_swimlane(r#"{"peers": [], "css": ".a{}"}"#, InputFormat::Json).unwrap();
        assert_eq!(one.css, vec![".a{}".to_string()]);
        let many =
            parse_swimlane(r#"{"peers": [], "css": [".a{}", ".b{}"]}"#, InputFormat::Json).unwrap();
        assert_eq!(many.css.len(), 2);
    }

    #[test]
    fn normalize_is_idempotent() {
        let input = r#"{
            "peers": ["a", "b"],
            "messages": [[["a", "b", "x", {"class": "c"}], ["b", "b", "y"]]]
        }"#;
        let once = parse_swimlane(input, InputFormat::Json).unwrap();
        let twice = normalize(&once).unwrap();
        assert_eq!(once, twice);
        assert_eq!(normalize(&twice).unwrap(), twice);
    }

    #[test]
    fn format_from_extension() {
        assert_eq!(InputFormat::from_path(Path::new("a.yml")), InputFormat::Yaml);
        assert_eq!(InputFormat::from_path(Path::new("a.json5")), InputFormat::Json5);
        assert_eq!(InputFormat::from_path(Path::new("a")), InputFormat::Json);
    }
}
