//! Identification workflow

pub mod pipeline;
pub mod policy;

pub use pipeline::{IdentificationPipeline, PipelineOutcome};
pub use policy::{PipelinePolicy, ProviderFailurePolicy, UnrecognizedFacePolicy};
