//! Set, unset and view annotations on Cloud Foundry v3 resources.
pub mod args;
pub mod client;
pub mod commands;
pub mod config;
pub mod errors;
pub mod logging;
pub mod metadata;
pub mod resource;

#[cfg(test)]
mod test_support;
