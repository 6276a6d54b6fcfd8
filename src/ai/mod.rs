mod gateway;
mod parse;
mod prompt;

pub use gateway::{AiError, AiGateway, ChatMessage};
pub use parse::extract_analysis;
pub use prompt::build_messages;
