//! Reasoning provider adapters

pub mod codec;
pub mod openai_compatible;
pub mod registry;

pub use openai_compatible::OpenAiCompatibleProvider;
pub use registry::ProviderRegistry;
