//! Mock user backend: a process-lifetime store and the service operations on top of it.

pub mod model;
pub mod service;
pub mod store;

pub use model::{NewUser, User};
pub use service::UserService;
pub use store::{InMemoryUserStore, UserStore};
