// Users: the people projects are shared with and timeline entries are assigned to.

pub mod handlers;
pub mod models;
pub mod store;
