// ─── Info.plist Reader ───
// Minimal XML property-list parser. Keys keep their document order so that
// option lists built from dictionaries are deterministic.

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::core::error::{LauncherError, LauncherResult};

#[derive(Debug, Clone, PartialEq)]
pub enum PlistValue {
    String(String),
    Integer(i64),
    Real(f64),
    Bool(bool),
    Array(Vec<PlistValue>),
    Dict(PlistDict),
}

/// A `<dict>` with entries in document order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlistDict {
    entries: Vec<(String, PlistValue)>,
}

impl PlistDict {
    pub fn get(&self, key: &str) -> Option<&PlistValue> {
        self.entries
            .iter()
            .find(|(candidate, _)| candidate == key)
            .map(|(_, value)| value)
    }

    fn insert(&mut self, key: String, value: PlistValue) {
        if let Some(existing) = self.entries.iter_mut().find(|(candidate, _)| *candidate == key) {
            existing.1 = value;
        } else {
            self.entries.push((key, value));
        }
    }

    pub fn string(&self, key: &str) -> Option<String> {
        match self.get(key)? {
            PlistValue::String(value) => {
                let trimmed = value.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            }
            PlistValue::Integer(value) => Some(value.to_string()),
            PlistValue::Real(value) => Some(value.to_string()),
            _ => None,
        }
    }

    /// `<true/>`, or a string spelled `true`/`yes`/`1`.
    pub fn flag(&self, key: &str) -> bool {
        match self.get(key) {
            Some(PlistValue::Bool(value)) => *value,
            Some(PlistValue::String(value)) => matches!(
                value.trim().to_ascii_lowercase().as_str(),
                "true" | "yes" | "1"
            ),
            Some(PlistValue::Integer(value)) => *value != 0,
            _ => false,
        }
    }

    /// Array of strings, or a single string split on `separator` when given.
    pub fn string_list(&self, key: &str, separator: Option<char>) -> Vec<String> {
        match self.get(key) {
            Some(PlistValue::Array(items)) => items
                .iter()
                .filter_map(|item| match item {
                    PlistValue::String(value) => Some(value.clone()),
                    PlistValue::Integer(value) => Some(value.to_string()),
                    _ => None,
                })
                .collect(),
            Some(PlistValue::String(value)) => match separator {
                Some(separator) => value
                    .split(separator)
                    .filter(|part| !part.is_empty())
                    .map(str::to_string)
                    .collect(),
                None => vec![value.clone()],
            },
            _ => Vec::new(),
        }
    }

    /// Nested `<dict>` flattened to string pairs, document order kept.
    pub fn string_pairs(&self, key: &str) -> Vec<(String, String)> {
        match self.get(key) {
            Some(PlistValue::Dict(dict)) => dict
                .entries
                .iter()
                .filter_map(|(key, value)| match value {
                    PlistValue::String(value) => Some((key.clone(), value.clone())),
                    _ => None,
                })
                .collect(),
            _ => Vec::new(),
        }
    }
}

enum Frame {
    Dict { dict: PlistDict, key: Option<String> },
    Array(Vec<PlistValue>),
}

/// Parse an XML property list and return its top-level dictionary.
pub fn parse_plist(xml: &str) -> LauncherResult<PlistDict> {
    let mut reader = Reader::from_str(xml);
    let mut stack: Vec<Frame> = Vec::new();
    let mut root: Option<PlistValue> = None;
    let mut text = String::new();
    let mut in_leaf = false;

    loop {
        match reader.read_event()? {
            Event::Start(element) => match element.name().as_ref() {
                b"plist" => {}
                b"dict" => stack.push(Frame::Dict {
                    dict: PlistDict::default(),
                    key: None,
                }),
                b"array" => stack.push(Frame::Array(Vec::new())),
                b"key" | b"string" | b"integer" | b"real" | b"date" | b"data" | b"true"
                | b"false" => {
                    text.clear();
                    in_leaf = true;
                }
                other => {
                    return Err(LauncherError::Plist(format!(
                        "unexpected element <{}>",
                        String::from_utf8_lossy(other)
                    )))
                }
            },
            Event::Empty(element) => {
                let value = match element.name().as_ref() {
                    b"true" => PlistValue::Bool(true),
                    b"false" => PlistValue::Bool(false),
                    b"dict" => PlistValue::Dict(PlistDict::default()),
                    b"array" => PlistValue::Array(Vec::new()),
                    b"string" | b"date" | b"data" => PlistValue::String(String::new()),
                    other => {
                        return Err(LauncherError::Plist(format!(
                            "unexpected empty element <{}/>",
                            String::from_utf8_lossy(other)
                        )))
                    }
                };
                push_value(&mut stack, &mut root, value)?;
            }
            Event::Text(content) if in_leaf => text.push_str(&content.unescape()?),
            Event::CData(content) if in_leaf => {
                text.push_str(&String::from_utf8_lossy(&content.into_inner()))
            }
            Event::End(element) => {
                in_leaf = false;
                match element.name().as_ref() {
                    b"plist" => {}
                    b"dict" => match stack.pop() {
                        Some(Frame::Dict { dict, .. }) => {
                            push_value(&mut stack, &mut root, PlistValue::Dict(dict))?
                        }
                        _ => return Err(LauncherError::Plist("unbalanced </dict>".into())),
                    },
                    b"array" => match stack.pop() {
                        Some(Frame::Array(items)) => {
                            push_value(&mut stack, &mut root, PlistValue::Array(items))?
                        }
                        _ => return Err(LauncherError::Plist("unbalanced </array>".into())),
                    },
                    b"key" => match stack.last_mut() {
                        Some(Frame::Dict { key, .. }) => *key = Some(std::mem::take(&mut text)),
                        _ => return Err(LauncherError::Plist("<key> outside <dict>".into())),
                    },
                    b"string" | b"date" | b"data" => {
                        let value = PlistValue::String(std::mem::take(&mut text));
                        push_value(&mut stack, &mut root, value)?;
                    }
                    b"integer" => {
                        let value = text.trim().parse().map_err(|_| {
                            LauncherError::Plist(format!("invalid <integer> {:?}", text))
                        })?;
                        push_value(&mut stack, &mut root, PlistValue::Integer(value))?;
                    }
                    b"real" => {
                        let value = text.trim().parse().map_err(|_| {
                            LauncherError::Plist(format!("invalid <real> {:?}", text))
                        })?;
                        push_value(&mut stack, &mut root, PlistValue::Real(value))?;
                    }
                    b"true" => push_value(&mut stack, &mut root, PlistValue::Bool(true))?,
                    b"false" => push_value(&mut stack, &mut root, PlistValue::Bool(false))?,
                    _ => {}
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !stack.is_empty() {
        return Err(LauncherError::Plist("unexpected end of document".into()));
    }

    match root {
        Some(PlistValue::Dict(dict)) => Ok(dict),
        Some(_) => Err(LauncherError::Plist("top-level element is not a <dict>".into())),
        None => Err(LauncherError::Plist("empty property list".into())),
    }
}

fn push_value(
    stack: &mut [Frame],
    root: &mut Option<PlistValue>,
    value: PlistValue,
) -> LauncherResult<()> {
    match stack.last_mut() {
        Some(Frame::Dict { dict, key }) => {
            let key = key
                .take()
                .ok_or_else(|| LauncherError::Plist("value without <key> in <dict>".into()))?;
            dict.insert(key, value);
        }
        Some(Frame::Array(items)) => items.push(value),
        None => *root = Some(value),
    }
    Ok(())
}
