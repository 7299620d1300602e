pub mod response;
pub mod lexicon;

pub use response::*;
pub use lexicon::Lexicon;

use serde::{Serialize, Deserialize};

/// Every outbound type is published as one JSON document per message.
pub trait JsonMessage<'a>: Serialize + Deserialize<'a> {
    fn from_json(text: &'a str) -> serde_json::Result<Self> {
        serde_json::from_str::<Self>(text)
    }

    fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self)
    }
}
