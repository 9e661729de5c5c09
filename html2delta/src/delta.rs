//! Delta operations
//!
//!     A [`Delta`] is an ordered log of insert operations. Each [`Op`] inserts either a run of
//!     text or a single embed (image, video, or anything a custom block produces), optionally
//!     carrying a map of formatting attributes.
//!
//!     Attributes come in two flavours. Inline attributes (bold, color, link, ...) sit on the
//!     text they format. Block attributes (align, indent, list, header, ...) only ever sit on
//!     the "\n" insert that terminates a line, which is how rich-text editors model paragraphs.
//!
//!     The serialized form matches the editor wire format:
//!
//!     ```json
//!     {"ops":[{"insert":"Hello "},{"insert":"Word","attributes":{"bold":true}},{"insert":"\n"}]}
//!     ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Attribute keys that only make sense on a block-terminating newline.
pub const BLOCK_KEYS: [&str; 3] = ["align", "direction", "indent"];

/// A single attribute value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    Bool(bool),
    Int(i64),
    Text(String),
}

impl AttrValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttrValue::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            AttrValue::Int(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AttrValue::Bool(value) => Some(*value),
            _ => None,
        }
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Bool(value) => write!(f, "{value}"),
            AttrValue::Int(value) => write!(f, "{value}"),
            AttrValue::Text(value) => f.write_str(value),
        }
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        AttrValue::Bool(value)
    }
}

impl From<i64> for AttrValue {
    fn from(value: i64) -> Self {
        AttrValue::Int(value)
    }
}

impl From<u8> for AttrValue {
    fn from(value: u8) -> Self {
        AttrValue::Int(i64::from(value))
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        AttrValue::Text(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        AttrValue::Text(value)
    }
}

/// An ordered attribute map.
///
/// Every recursion frame of the converter owns its own copy, so mutating one never leaks
/// into a sibling subtree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attributes(BTreeMap<String, AttrValue>);

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, key: &str) -> Option<&AttrValue> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<AttrValue>,
    ) -> Option<AttrValue> {
        self.0.insert(key.into(), value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<AttrValue> {
        self.0.remove(key)
    }

    pub fn retain(&mut self, mut keep: impl FnMut(&str, &AttrValue) -> bool) {
        self.0.retain(|key, value| keep(key, value));
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// A copy of this map without the given keys.
    pub fn without(&self, keys: &[&str]) -> Attributes {
        let mut copy = self.clone();
        copy.retain(|key, _| !keys.iter().any(|excluded| *excluded == key));
        copy
    }

    /// Moves the given keys out of this map into a new one.
    pub fn take(&mut self, keys: &[&str]) -> Attributes {
        let mut taken = Attributes::new();
        for key in keys {
            if let Some(value) = self.0.remove(*key) {
                taken.0.insert((*key).to_string(), value);
            }
        }
        taken
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttrValue)> {
        self.0.iter().map(|(key, value)| (key.as_str(), value))
    }
}

impl Extend<(String, AttrValue)> for Attributes {
    fn extend<T: IntoIterator<Item = (String, AttrValue)>>(&mut self, iter: T) {
        self.0.extend(iter);
    }
}

impl IntoIterator for Attributes {
    type Item = (String, AttrValue);
    type IntoIter = std::collections::btree_map::IntoIter<String, AttrValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<K: Into<String>, V: Into<AttrValue>> FromIterator<(K, V)> for Attributes {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Attributes(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

/// An embedded object such as `{"image": "https://..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<String, String>",
    into = "BTreeMap<String, String>"
)]
pub struct Embed {
    pub kind: String,
    pub value: String,
}

impl Embed {
    pub fn new(kind: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            value: value.into(),
        }
    }

    pub fn image(src: impl Into<String>) -> Self {
        Self::new("image", src)
    }

    pub fn video(src: impl Into<String>) -> Self {
        Self::new("video", src)
    }
}

impl From<Embed> for BTreeMap<String, String> {
    fn from(embed: Embed) -> Self {
        BTreeMap::from([(embed.kind, embed.value)])
    }
}

impl TryFrom<BTreeMap<String, String>> for Embed {
    type Error = String;

    fn try_from(map: BTreeMap<String, String>) -> Result<Self, Self::Error> {
        let mut entries = map.into_iter();
        match (entries.next(), entries.next()) {
            (Some((kind, value)), None) => Ok(Embed { kind, value }),
            _ => Err("an embed must have exactly one key".to_string()),
        }
    }
}

/// The payload of an insert operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Insert {
    Text(String),
    Embed(Embed),
}

impl Insert {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Insert::Text(text) => Some(text),
            Insert::Embed(_) => None,
        }
    }

    pub fn as_embed(&self) -> Option<&Embed> {
        match self {
            Insert::Embed(embed) => Some(embed),
            Insert::Text(_) => None,
        }
    }

    fn is_empty_text(&self) -> bool {
        matches!(self, Insert::Text(text) if text.is_empty())
    }
}

impl From<&str> for Insert {
    fn from(text: &str) -> Self {
        Insert::Text(text.to_string())
    }
}

impl From<String> for Insert {
    fn from(text: String) -> Self {
        Insert::Text(text)
    }
}

impl From<Embed> for Insert {
    fn from(embed: Embed) -> Self {
        Insert::Embed(embed)
    }
}

/// One insert operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Op {
    pub insert: Insert,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Attributes>,
}

impl Op {
    /// Creates an operation. An empty attribute map is stored as `None`.
    pub fn new(insert: impl Into<Insert>, attributes: impl Into<Option<Attributes>>) -> Self {
        Self {
            insert: insert.into(),
            attributes: attributes.into().filter(|attrs| !attrs.is_empty()),
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::new(Insert::Text(text.into()), None)
    }

    pub fn newline() -> Self {
        Self::text("\n")
    }

    pub fn embed(kind: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(Embed::new(kind, value), None)
    }

    pub fn as_text(&self) -> Option<&str> {
        self.insert.as_text()
    }

    pub fn attributes(&self) -> Option<&Attributes> {
        self.attributes.as_ref()
    }

    /// Looks up a single attribute.
    pub fn attr(&self, key: &str) -> Option<&AttrValue> {
        self.attributes.as_ref().and_then(|attrs| attrs.get(key))
    }

    /// True for a text insert ending in "\n".
    pub fn ends_with_newline(&self) -> bool {
        self.as_text().is_some_and(|text| text.ends_with('\n'))
    }
}

/// An append-only sequence of insert operations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delta {
    ops: Vec<Op>,
}

impl Delta {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an insert. Empty text inserts are dropped.
    pub fn insert(
        &mut self,
        content: impl Into<Insert>,
        attributes: impl Into<Option<Attributes>>,
    ) -> &mut Self {
        self.push(Op::new(content, attributes))
    }

    /// Appends an already-built operation. Empty text inserts are dropped.
    pub fn push(&mut self, op: Op) -> &mut Self {
        if !op.insert.is_empty_text() {
            self.ops.push(Op::new(op.insert, op.attributes));
        }
        self
    }

    pub fn ops(&self) -> &[Op] {
        &self.ops
    }

    pub fn into_ops(self) -> Vec<Op> {
        self.ops
    }

    pub fn last(&self) -> Option<&Op> {
        self.ops.last()
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Merges neighbouring text inserts that carry identical attributes.
    ///
    /// The converter never relies on this; it only shortens the output.
    pub fn compact(self) -> Delta {
        let mut ops: Vec<Op> = Vec::with_capacity(self.ops.len());
        for op in self.ops {
            if let Some(previous) = ops.last_mut() {
                if let (Insert::Text(prev_text), Insert::Text(text)) =
                    (&mut previous.insert, &op.insert)
                {
                    if previous.attributes == op.attributes {
                        prev_text.push_str(text);
                        continue;
                    }
                }
            }
            ops.push(op);
        }
        Delta { ops }
    }

    /// Concatenated text of every text insert; embeds are skipped.
    pub fn to_plain_text(&self) -> String {
        self.ops.iter().filter_map(Op::as_text).collect()
    }

    /// Serializes to the `{"ops":[...]}` wire format.
    pub fn to_json(&self, pretty: bool) -> serde_json::Result<String> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }
}

impl Extend<Op> for Delta {
    fn extend<T: IntoIterator<Item = Op>>(&mut self, iter: T) {
        for op in iter {
            self.push(op);
        }
    }
}

impl FromIterator<Op> for Delta {
    fn from_iter<T: IntoIterator<Item = Op>>(iter: T) -> Self {
        let mut delta = Delta::new();
        delta.extend(iter);
        delta
    }
}

impl From<Delta> for Vec<Op> {
    fn from(delta: Delta) -> Self {
        delta.ops
    }
}
