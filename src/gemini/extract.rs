use super::types::{FunctionCallPayload, Part, ResponseChunk};

/// Returns the first function call in the first candidate's parts.
///
/// A chunk without candidates has no function call.
pub fn extract_function_call(chunk: &ResponseChunk) -> Option<&FunctionCallPayload> {
    chunk
        .first_candidate()?
        .content
        .parts
        .iter()
        .find_map(Part::as_function_call)
}
