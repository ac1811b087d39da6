mod ping;
mod roles;

pub use ping::ping;
pub use roles::{role_get, role_update};
