mod health;
mod url;

pub use health::health_handler;
pub use url::{redirect_handler, resolve_handler, shorten_handler};
