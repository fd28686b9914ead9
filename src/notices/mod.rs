//! Notices scraped from feed sources.
//!
//! Notices are written by the scrapers into one collection per notice type
//! and are read-only here.

pub mod delta;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub use delta::delta;

/// A stored notice. Only `link` and `published` are interpreted; every other
/// field is forwarded untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notice {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,

    #[serde(default)]
    pub published: Value,

    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

impl Notice {
    pub fn new(link: impl Into<String>, published: impl Into<Value>) -> Self {
        Self {
            link: Some(link.into()),
            published: published.into(),
            payload: Map::new(),
        }
    }
}
