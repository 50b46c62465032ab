use crate::{Fetcher, Result, SourceLocation};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Sample log snippets for each error code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Explanations(BTreeMap<String, Vec<String>>);

impl Explanations {
    pub fn load(fetcher: &Fetcher, location: &SourceLocation) -> Result<Self> {
        fetcher.fetch_json(location)
    }

    pub fn get(&self, errorcode: &str) -> Option<&[String]> {
        self.0.get(errorcode).map(Vec::as_slice)
    }

    /// All snippets of `errorcode` separated by a rule, trailing newlines trimmed.
    pub fn joined(&self, errorcode: &str) -> Option<String> {
        self.get(errorcode)
            .map(|snippets| snippets.join("\n --- \n").trim_end_matches('\n').to_string())
    }

    pub fn insert(&mut self, errorcode: impl Into<String>, snippets: Vec<String>) {
        self.0.insert(errorcode.into(), snippets);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
