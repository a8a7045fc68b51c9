//! Document model for substitution
//!
//! A [`Document`] is the nested value placeholders are substituted into:
//! string leaves, sequences, and insertion-ordered mappings. Every other
//! scalar is opaque and passes through untouched.
//!
//! Mapping values may be [`Document::Undefined`], an explicitly absent entry.
//! Such entries keep their key and are never turned into empty values.

use indexmap::{IndexMap, IndexSet};
use serde_json::{Number, Value};
use std::collections::VecDeque;

use crate::substitute::engine::tokenize::{placeholder_token, TokenStream};

/// Nested document value
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Document {
    /// JSON-style null (opaque)
    #[default]
    Null,
    /// Boolean (opaque)
    Bool(bool),
    /// Number (opaque)
    Number(Number),
    /// String leaf, may contain `{name}` tokens
    String(String),
    /// Ordered sequence
    Sequence(Vec<Document>),
    /// Insertion-ordered mapping
    Mapping(IndexMap<String, Document>),
    /// Explicitly absent mapping value (opaque)
    Undefined,
}

impl Document {
    /// Returns the string leaf, if this is one
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Document::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Document]> {
        match self {
            Document::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&IndexMap<String, Document>> {
        match self {
            Document::Mapping(map) => Some(map),
            _ => None,
        }
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Document::Undefined)
    }

    /// Look up a mapping entry by key
    pub fn get(&self, key: &str) -> Option<&Document> {
        self.as_mapping()?.get(key)
    }

    /// Check whether `{name}` occurs in any string leaf.
    ///
    /// Plain substring match on the literal token, so `name` may itself
    /// contain braces. Breadth-first; stops at the first match. Undefined
    /// mapping values are skipped.
    pub fn contains_placeholder(&self, name: &str) -> bool {
        let token = placeholder_token(name);
        let mut queue: VecDeque<&Document> = VecDeque::new();
        queue.push_back(self);

        while let Some(next) = queue.pop_front() {
            match next {
                Document::String(s) => {
                    if s.contains(token.as_str()) {
                        return true;
                    }
                }
                Document::Sequence(items) => queue.extend(items.iter()),
                Document::Mapping(map) => {
                    queue.extend(map.values().filter(|value| !value.is_undefined()))
                }
                _ => {}
            }
        }

        false
    }

    /// Every brace-free placeholder name in the document, in depth-first
    /// traversal order
    pub fn placeholders(&self) -> IndexSet<String> {
        let mut names = IndexSet::new();
        self.for_each_str(&mut |s| {
            for name in TokenStream::new(s) {
                if !names.contains(name) {
                    names.insert(name.to_string());
                }
            }
        });
        names
    }

    /// Visit every string leaf in traversal order
    fn for_each_str<'a>(&'a self, f: &mut impl FnMut(&'a str)) {
        match self {
            Document::String(s) => f(s),
            Document::Sequence(items) => {
                for item in items {
                    item.for_each_str(f);
                }
            }
            Document::Mapping(map) => {
                for value in map.values() {
                    value.for_each_str(f);
                }
            }
            _ => {}
        }
    }

    /// Rewrite every string leaf in place, in traversal order.
    ///
    /// Sequences keep their indices and mappings keep their keys; undefined
    /// and other opaque values are not visited.
    pub(crate) fn for_each_str_mut(&mut self, f: &mut impl FnMut(&mut String)) {
        match self {
            Document::String(s) => f(s),
            Document::Sequence(items) => {
                for item in items.iter_mut() {
                    item.for_each_str_mut(f);
                }
            }
            Document::Mapping(map) => {
                for value in map.values_mut() {
                    value.for_each_str_mut(f);
                }
            }
            _ => {}
        }
    }
}

impl From<Value> for Document {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Document::Null,
            Value::Bool(b) => Document::Bool(b),
            Value::Number(n) => Document::Number(n),
            Value::String(s) => Document::String(s),
            Value::Array(items) => Document::Sequence(items.into_iter().map(Into::into).collect()),
            Value::Object(map) => {
                Document::Mapping(map.into_iter().map(|(k, v)| (k, v.into())).collect())
            }
        }
    }
}

impl From<Document> for Value {
    /// Undefined mapping entries are omitted; anywhere else they become `null`.
    fn from(document: Document) -> Self {
        match document {
            Document::Null | Document::Undefined => Value::Null,
            Document::Bool(b) => Value::Bool(b),
            Document::Number(n) => Value::Number(n),
            Document::String(s) => Value::String(s),
            Document::Sequence(items) => Value::Array(items.into_iter().map(Into::into).collect()),
            Document::Mapping(map) => Value::Object(
                map.into_iter()
                    .filter(|(_, v)| !v.is_undefined())
                    .map(|(k, v)| (k, v.into()))
                    .collect(),
            ),
        }
    }
}

impl From<&str> for Document {
    fn from(s: &str) -> Self {
        Document::String(s.to_string())
    }
}

impl From<String> for Document {
    fn from(s: String) -> Self {
        Document::String(s)
    }
}

impl From<bool> for Document {
    fn from(b: bool) -> Self {
        Document::Bool(b)
    }
}

impl From<i64> for Document {
    fn from(n: i64) -> Self {
        Document::Number(n.into())
    }
}

impl From<u64> for Document {
    fn from(n: u64) -> Self {
        Document::Number(n.into())
    }
}

impl From<f64> for Document {
    /// Non-finite floats have no JSON number form and become `Null`
    fn from(n: f64) -> Self {
        Number::from_f64(n).map_or(Document::Null, Document::Number)
    }
}

impl<T: Into<Document>> From<Vec<T>> for Document {
    fn from(items: Vec<T>) -> Self {
        Document::Sequence(items.into_iter().map(Into::into).collect())
    }
}

impl<K: Into<String>, V: Into<Document>> FromIterator<(K, V)> for Document {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Document::Mapping(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}
