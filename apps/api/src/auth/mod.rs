//! Auth prototype: signup, login, profile and logout for a standalone service.
//!
//! Not mounted on the résumé / roadmap router; see `routes::build_auth_router`.

pub mod handlers;
pub mod password;
pub mod store;
pub mod token;
