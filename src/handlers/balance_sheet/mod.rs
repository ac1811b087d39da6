mod companies;
mod sheet_delete;
mod sheet_get;
mod sheet_post;
mod sheet_put;

pub use companies::companies;
pub use sheet_delete::sheet_delete;
pub use sheet_get::sheet_get;
pub use sheet_post::sheet_post;
pub use sheet_put::sheet_put;
