pub mod logging;

pub use logging::{LogSink, MemorySink, SharedSink, TracingSink};
