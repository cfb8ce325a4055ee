//! Decides whether a wire content part is text or a function-call container.
//!
//! This is the only place that inspects the raw shape of a part; everything
//! downstream matches on [`Part`].

use log::warn;
use serde_json::{Map, Value};

use super::types::{FunctionCallContainer, FunctionCallPayload, Part, RawPart, TextPart};

/// Classifies one wire part, whatever its JSON type. Never fails.
///
/// Anything other than an object is an opaque text part without text.
pub fn classify_value(value: Value) -> Part {
    match value {
        Value::Object(object) => classify(RawPart::from(object)),
        other => {
            warn!("[Classifier] part is not an object, keeping it as opaque text: {other}");
            Part::Text(TextPart {
                raw: Some(other),
                ..TextPart::default()
            })
        }
    }
}

/// Classifies one raw part. Never fails.
///
/// A part is a function call iff `functionCall` is present and non-null. A
/// `functionCall` that is not an object yields an empty payload and is kept
/// for serialization. A non-string `text` is kept in `extra` rather than dropped.
pub fn classify(raw: RawPart) -> Part {
    let RawPart {
        text,
        function_call,
        mut extra,
    } = raw;
    let text = split_text(text, &mut extra);

    match function_call {
        Some(Value::Object(call)) => Part::FunctionCall(FunctionCallContainer {
            function_call: payload_from_object(call),
            text,
            extra,
            raw_call: None,
        }),
        Some(other) => {
            warn!("[Classifier] functionCall is not an object, using an empty payload: {other}");
            Part::FunctionCall(FunctionCallContainer {
                function_call: FunctionCallPayload::default(),
                text,
                extra,
                raw_call: Some(other),
            })
        }
        None => Part::Text(TextPart {
            text,
            extra,
            raw: None,
        }),
    }
}

fn split_text(text: Option<Value>, extra: &mut Map<String, Value>) -> Option<String> {
    match text {
        Some(Value::String(text)) => Some(text),
        Some(other) => {
            extra.insert("text".to_string(), other);
            None
        }
        None => None,
    }
}

fn payload_from_object(mut call: Map<String, Value>) -> FunctionCallPayload {
    let name = match call.remove("name") {
        Some(Value::String(name)) => name,
        _ => String::new(),
    };
    let args = match call.remove("args") {
        Some(Value::Object(args)) => args,
        _ => Map::new(),
    };
    FunctionCallPayload { name, args }
}
