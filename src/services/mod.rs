pub mod balance_sheet_service;
pub mod import_service;
pub mod llm;
pub mod market_data;
pub mod role_service;
pub mod sanitize;
