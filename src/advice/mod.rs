//! Advice generation: the single effectful call to the inference endpoint.

pub mod pipeline;
pub mod prompt;
pub mod schema;

pub use pipeline::AdvicePipeline;
pub use schema::{AdviceResult, Medicine};
