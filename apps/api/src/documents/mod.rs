// Document glue: PDF uploads that become templates, and text-to-LaTeX conversion.

pub mod handlers;
pub mod latex;
pub mod pdf;
pub mod prompts;
