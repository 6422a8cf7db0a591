//! Prompt domain
//!
//! Templates for the prompts sent to a coordinator during speaker selection.

mod template;

pub use template::PromptTemplate;
