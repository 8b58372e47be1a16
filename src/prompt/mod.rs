// src/prompt/mod.rs
// Prompt construction: the built-in template and the parser for custom ones

pub mod builder;
pub mod default;

pub use builder::{build_prompt, PromptTemplate, TemplateError};
pub use default::{DEFAULT_TEMPLATE, SECTION_MARKERS};
