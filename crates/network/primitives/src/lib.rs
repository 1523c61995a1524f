pub mod client;
pub mod config;
pub mod error;
pub mod identity;
pub mod messages;
pub mod peer;
pub mod stream;
