//! Typed endpoint helpers. Each module adds methods to
//! [`OllamaClient`](crate::OllamaClient) and defines the request and
//! response bodies of its route.

pub mod blob;
pub mod chat;
pub mod copy;
pub mod create;
pub mod delete;
pub mod embed;
pub mod generate;
pub mod list;
pub mod process;
pub mod pull;
pub mod push;
pub mod show;
pub mod types;
pub mod version;
