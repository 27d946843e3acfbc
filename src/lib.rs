pub mod auction;
pub mod auth;
pub mod bidding;
pub mod config;
pub mod database;
pub mod error;
pub mod forms;
pub mod handlers;
pub mod query;
pub mod routes;
pub mod scheduler;
pub mod state;
pub mod store;
