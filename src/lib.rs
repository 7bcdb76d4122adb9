pub mod apis;
pub mod common;
pub mod domain;
pub mod observability;
pub mod pipeline;
pub mod server;
