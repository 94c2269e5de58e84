pub mod builder;
pub mod ollama;
pub mod runtime;
pub mod traits;
