pub mod parser;
pub mod pipeline;

pub use parser::UserFormPayload;
pub use pipeline::PipelineResult;
