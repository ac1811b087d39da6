mod callback;
mod login;
mod logout;
mod me;

pub use callback::callback;
pub use login::login;
pub use logout::logout;
pub use me::me;
