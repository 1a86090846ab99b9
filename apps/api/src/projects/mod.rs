// Projects: transactional creation from a template (with a supplied or
// generated timeline), read models, deletion and derived metrics.

pub mod handlers;
pub mod metrics;
pub mod models;
pub mod service;
pub mod store;
