pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod lister;
pub mod model;
pub mod pull;
pub mod resolver;
pub mod writer;
