pub mod error;
pub mod logging;
pub mod pipeline;
pub mod reader;
pub mod shift;
pub mod transformers;
