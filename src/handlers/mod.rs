pub mod admin;
pub mod auth;
pub mod balance_sheet;
pub mod llm;
