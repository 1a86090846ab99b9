// Timeline generation: prompt construction, completion parsing and the
// schedule audit run over generated entries.

pub mod generator;
pub mod handlers;
pub mod models;
pub mod prompts;
pub mod schedule;
