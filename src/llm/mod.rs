//! Language-generation prompt ingredients

pub mod prompts;
