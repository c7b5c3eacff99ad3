pub mod coa;
pub mod config;
pub mod error;
pub mod health;
pub mod models;
pub mod routes;
pub mod services;
pub mod store;
pub mod validation;
