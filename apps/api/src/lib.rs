pub mod config;
pub mod db;
pub mod documents;
pub mod errors;
pub mod extract;
pub mod llm_client;
pub mod models;
pub mod projects;
pub mod routes;
pub mod state;
pub mod templates;
pub mod timeline;
pub mod users;
