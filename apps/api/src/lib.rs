pub mod app;
pub mod assessments;
pub mod candidates;
pub mod config;
pub mod db;
pub mod errors;
pub mod forms;
pub mod jobs;
pub mod models;
pub mod notify;
pub mod routes;
pub mod session;
pub mod state;
pub mod store;
pub mod transport;
