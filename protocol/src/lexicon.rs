use serde::{Serialize, Deserialize};

use crate::JsonMessage;

/// A word list as shipped on disk.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Lexicon {
    pub name: String,
    #[serde(default)]
    pub lang: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub brief: String,
    pub lexicon: Vec<String>
}

impl JsonMessage<'_> for Lexicon {}
