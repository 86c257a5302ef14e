//! # Delta model
//!
//! A delta is the editor's document model: an ordered list of insert
//! operations. Text inserts carry inline attributes on the run itself and
//! block attributes on the `"\n"` that terminates a line; embeds insert
//! non-text content such as images.

pub mod attributes;

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::EngineError;

pub use attributes::{
    Align, AttributeSet, FontChoice, ListKind, ListOrder, Script, SizeClass, sanitize_url,
};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Delta {
    pub ops: Vec<Op>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DeltaRepr {
    Wrapped { ops: Vec<Op> },
    Bare(Vec<Op>),
}

impl Delta {
    pub fn new(ops: Vec<Op>) -> Self {
        Self { ops }
    }

    /// Parses `{"ops": [...]}` or a bare array of ops.
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        let ops = match serde_json::from_str::<DeltaRepr>(json)? {
            DeltaRepr::Wrapped { ops } | DeltaRepr::Bare(ops) => ops,
        };
        Ok(Self { ops })
    }
}

/// One delta operation. Retain/delete operations deserialize with no insert
/// and are skipped by the parser.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Op {
    #[serde(default)]
    pub insert: Option<Insert>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub attributes: AttributeSet,
}

impl Op {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            insert: Some(Insert::Text(text.into())),
            attributes: AttributeSet::default(),
        }
    }

    pub fn image(source: impl Into<String>) -> Self {
        Self {
            insert: Some(Insert::Embed(Embed {
                image: Some(source.into()),
                other: BTreeMap::new(),
            })),
            attributes: AttributeSet::default(),
        }
    }

    #[must_use]
    pub fn with_attributes(mut self, attributes: AttributeSet) -> Self {
        self.attributes = attributes;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Insert {
    Text(String),
    Embed(Embed),
}

/// An embed object. Only `image` is rendered; other embed kinds are kept so
/// they can be reported.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Embed {
    #[serde(default)]
    pub image: Option<String>,
    #[serde(flatten)]
    pub other: BTreeMap<String, Value>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
