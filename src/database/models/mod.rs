pub mod balance_sheet;
pub mod company;
pub mod user;

pub use balance_sheet::BalanceSheet;
pub use company::Company;
pub use user::User;
