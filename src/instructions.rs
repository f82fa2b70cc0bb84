//! Flattens the different instruction representations into plain steps.
//!
//! Text is taken as is; entity decoding belongs to whoever produced it.

use serde::Deserialize;
use serde_json::Value;

/// Instructions as found on a page: one block of text or a list of items.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawInstructions {
    Text(String),
    Steps(Vec<InstructionItem>),
    Unknown(Value),
}

impl Default for RawInstructions {
    fn default() -> Self {
        RawInstructions::Steps(Vec::new())
    }
}

impl From<Vec<String>> for RawInstructions {
    fn from(lines: Vec<String>) -> Self {
        RawInstructions::Steps(lines.into_iter().map(InstructionItem::Text).collect())
    }
}

/// One entry of an instruction list.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum InstructionItem {
    Text(String),
    Step(StepObject),
    Section(SectionObject),
    Unknown(Value),
}

/// Any object carrying a `text` field, usually a `HowToStep`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StepObject {
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
enum SectionType {
    HowToSection,
}

/// A `HowToSection` grouping several sub-steps.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SectionObject {
    #[serde(rename = "@type")]
    _kind: SectionType,
    #[serde(rename = "itemListElement", default)]
    pub items: Vec<InstructionItem>,
}

impl InstructionItem {
    /// The text of this item; a section joins its sub-steps with one space.
    pub fn text(&self) -> String {
        match self {
            InstructionItem::Text(text) => clean(text),
            InstructionItem::Step(step) => clean(&step.text),
            InstructionItem::Section(section) => section
                .items
                .iter()
                .map(InstructionItem::text)
                .filter(|text| !text.is_empty())
                .collect::<Vec<_>>()
                .join(" "),
            InstructionItem::Unknown(_) => String::new(),
        }
    }
}

/// Flattens instructions into an ordered list of non-empty steps.
pub fn flatten_instructions(raw: &RawInstructions) -> Vec<String> {
    match raw {
        RawInstructions::Text(text) => text
            .split('\n')
            .map(clean)
            .filter(|line| !line.is_empty())
            .collect(),
        RawInstructions::Steps(items) => items
            .iter()
            .map(InstructionItem::text)
            .filter(|text| !text.is_empty())
            .collect(),
        RawInstructions::Unknown(_) => Vec::new(),
    }
}

fn clean(text: &str) -> String {
    text.trim().to_string()
}
