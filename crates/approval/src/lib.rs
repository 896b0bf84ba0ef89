pub mod abstract_trait;
pub mod config;
pub mod domain;
pub mod errors;
pub mod handler;
pub mod middleware;
pub mod provider;
pub mod service;
pub mod state;
