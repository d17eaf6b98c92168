//! User lookups and sign-in bookkeeping.

pub mod service;

pub use service::UserService;
