use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use crate::gemini::classifier;

/// The structured function invocation a model embeds in its output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FunctionCallPayload {
    pub name: String,
    #[serde(default)]
    pub args: Map<String, Value>,
}

impl FunctionCallPayload {
    pub fn new(name: impl Into<String>, args: Map<String, Value>) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }

    /// Arguments as a JSON object value, the shape tools receive.
    pub fn arguments(&self) -> Value {
        Value::Object(self.args.clone())
    }
}

impl fmt::Display for FunctionCallPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name, self.arguments())
    }
}

/// A plain content fragment. `text` is `None` when the wire part carried no string text
/// (for example an `inlineData` part).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextPart {
    pub text: Option<String>,
    pub extra: Map<String, Value>,
    /// The wire value when the part was not a JSON object. Serialized back as-is.
    pub raw: Option<Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCallContainer {
    pub function_call: FunctionCallPayload,
    pub text: Option<String>,
    pub extra: Map<String, Value>,
    /// The wire `functionCall` value when it was not an object. Serialized back in its place.
    pub raw_call: Option<Value>,
}

/// One piece of a candidate's content.
///
/// Decoding goes through the classifier and never fails, so a part is a
/// function call exactly when its `functionCall` field is present and non-null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub enum Part {
    Text(TextPart),
    FunctionCall(FunctionCallContainer),
}

/// The fields of a wire part object, before classification.
///
/// `text` and `functionCall` are `None` when absent or `null`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawPart {
    pub text: Option<Value>,
    pub function_call: Option<Value>,
    pub extra: Map<String, Value>,
}

impl From<Map<String, Value>> for RawPart {
    fn from(mut object: Map<String, Value>) -> Self {
        let mut take = |key: &str| object.remove(key).filter(|value| !value.is_null());
        let text = take("text");
        let function_call = take("functionCall");
        Self {
            text,
            function_call,
            extra: object,
        }
    }
}

impl Part {
    pub fn from_text(text: impl Into<String>) -> Self {
        Self::Text(TextPart {
            text: Some(text.into()),
            ..TextPart::default()
        })
    }

    pub fn function_call(name: impl Into<String>, args: Map<String, Value>) -> Self {
        Self::FunctionCall(FunctionCallContainer {
            function_call: FunctionCallPayload::new(name, args),
            text: None,
            extra: Map::new(),
            raw_call: None,
        })
    }

    pub const fn is_function_call(&self) -> bool {
        matches!(self, Self::FunctionCall(_))
    }

    pub const fn as_function_call(&self) -> Option<&FunctionCallPayload> {
        match self {
            Self::FunctionCall(container) => Some(&container.function_call),
            Self::Text(_) => None,
        }
    }

    /// Text of a text part. Function-call parts report `None` even when they carry sibling text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(part) => part.text.as_deref(),
            Self::FunctionCall(_) => None,
        }
    }
}

impl From<Value> for Part {
    fn from(value: Value) -> Self {
        classifier::classify_value(value)
    }
}

impl From<Part> for Value {
    fn from(part: Part) -> Self {
        match part {
            Part::Text(TextPart { raw: Some(raw), .. }) => raw,
            Part::Text(TextPart {
                text,
                mut extra,
                raw: None,
            }) => {
                if let Some(text) = text {
                    extra.insert("text".to_string(), Value::String(text));
                }
                Value::Object(extra)
            }
            Part::FunctionCall(FunctionCallContainer {
                function_call,
                text,
                mut extra,
                raw_call,
            }) => {
                if let Some(text) = text {
                    extra.insert("text".to_string(), Value::String(text));
                }
                let call = raw_call.unwrap_or_else(|| {
                    serde_json::json!({
                        "name": function_call.name,
                        "args": function_call.args,
                    })
                });
                extra.insert("functionCall".to_string(), call);
                Value::Object(extra)
            }
        }
    }
}
