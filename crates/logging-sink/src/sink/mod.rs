mod message_sink;

pub use message_sink::{DynSink, MessageSink};
