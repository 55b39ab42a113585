//! Conversation module - Sessions and their message history.
//!
//! Sessions are append-only exchanges between one participant and one
//! agent. The application layer resolves the active session for a pair,
//! appends each turn, and persists through the session repository port.

mod message;
mod session;

pub use message::{Message, MessageId, MessageMetadata, Sender};
pub use session::{ConversationSession, HISTORY_WINDOW};
