mod auth;
mod bookmarks;
pub mod cache;
mod catalog;
mod config;

pub use self::auth::{login, logout, profile, register, whoami};
pub use self::bookmarks::{save, saved, toggle, unsave};
pub use self::catalog::{category, course, courses, event, events, search};
pub use self::config::config;
