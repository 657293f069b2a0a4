pub mod chat_message;
pub mod check_in;
pub mod journal_entry;
pub mod mood;
pub mod recommendation;
