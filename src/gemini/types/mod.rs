pub mod chunk;
pub mod message;
pub mod part;

pub use chunk::{Candidate, Content, ResponseChunk};
pub use message::ConversationMessage;
pub use part::{FunctionCallContainer, FunctionCallPayload, Part, RawPart, TextPart};

use serde::{Deserialize, Deserializer};

/// Treats an explicit `null` the same as a missing field.
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
