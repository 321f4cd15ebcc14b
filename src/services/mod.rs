pub mod answer_extractor;
pub mod export_formatter;
pub mod export_writer;
pub mod scroll_stabilizer;
pub mod time_normalizer;

pub use answer_extractor::AnswerExtractor;
pub use export_writer::ExportWriter;
pub use scroll_stabilizer::{ScrollStabilizer, StabilizeOutcome, StabilizerConfig};
