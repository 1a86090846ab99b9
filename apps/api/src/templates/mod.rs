// Templates: reusable section/subtitle structures that projects are built from.
// Read paths, transactional creation, and synthesis from document text.

pub mod handlers;
pub mod models;
pub mod prompts;
pub mod store;
pub mod synthesis;
