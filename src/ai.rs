pub mod common;
pub mod config;
pub mod extract;
pub mod gpt;
pub mod prompts;
