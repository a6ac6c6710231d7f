//! Locating the model's structured answer inside a raw provider response.
//!
//! The structured-output envelope differs between provider API versions, so
//! each known layout is a [`ResponseShape`] variant. Shapes are tried in
//! [`ResponseShape::PRIORITY`] order and the first one present wins.

use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseShape {
    /// `content[0].input` (Anthropic Messages `tool_use` block)
    EmbeddedInput,
    /// `content[0].tool_use.input`
    NestedToolUseInput,
    /// `content[0].tool_use.content`
    NestedToolUseContent,
    /// `choices[0].message.tool_calls[0].function_call.arguments`
    ChatCompletionArguments,
    /// `content[0].text`
    PlainText,
}

impl ResponseShape {
    pub const PRIORITY: [ResponseShape; 5] = [
        ResponseShape::EmbeddedInput,
        ResponseShape::NestedToolUseInput,
        ResponseShape::NestedToolUseContent,
        ResponseShape::ChatCompletionArguments,
        ResponseShape::PlainText,
    ];

    fn pointer(&self) -> &'static str {
        match self {
            ResponseShape::EmbeddedInput => "/content/0/input",
            ResponseShape::NestedToolUseInput => "/content/0/tool_use/input",
            ResponseShape::NestedToolUseContent => "/content/0/tool_use/content",
            ResponseShape::ChatCompletionArguments => {
                "/choices/0/message/tool_calls/0/function_call/arguments"
            }
            ResponseShape::PlainText => "/content/0/text",
        }
    }

    /// The value at this shape's location, if it is present.
    pub fn locate<'a>(&self, raw: &'a Value) -> Option<&'a Value> {
        raw.pointer(self.pointer()).filter(|value| is_present(value))
    }
}

/// The fragment picked out of a raw response, before normalization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate<'a> {
    pub shape: ResponseShape,
    pub value: &'a Value,
}

pub fn extract_candidate(raw: &Value) -> Option<Candidate<'_>> {
    ResponseShape::PRIORITY.iter().find_map(|shape| {
        shape
            .locate(raw)
            .map(|value| Candidate { shape: *shape, value })
    })
}

// null, false, zero and "" do not count as an answer.
fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
