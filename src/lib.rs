pub mod config;
pub mod contour;
pub mod error;
pub mod pipeline;
pub mod types;

pub use config::OllamaConfig;
pub use error::EvalError;
pub use pipeline::builder::ProsodyEvaluatorBuilder;
pub use pipeline::runtime::ProsodyEvaluator;
pub use pipeline::traits::Classifier;
pub use types::{ActualLabel, ContourPoint, PitchContour, PitchSample};
