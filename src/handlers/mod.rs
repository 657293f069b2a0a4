pub mod chat;
pub mod check_ins;
pub mod dashboard;
pub mod health;
pub mod journal;
pub mod progress;
