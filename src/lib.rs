pub mod app;
pub mod assessment;
pub mod catalog;
pub mod chat;
pub mod cli;
pub mod config;
pub mod errors;
pub mod log;
pub mod prompt;
pub mod provider;
pub mod recommend;
pub mod roadmap;
pub mod store;
pub mod tracker;
pub mod ux;
pub mod wire;
