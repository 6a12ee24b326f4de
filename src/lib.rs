pub mod error;
pub mod mask;
pub mod record;
pub mod console;
pub mod sink;
pub mod gelf;
pub mod dispatcher;
pub mod logger;

pub mod backend;
pub mod config;
pub mod env;
pub mod init;
pub mod noop_sink;

pub use logger::Logger;
pub use record::{Level, LogRecord, LogRecordFields};
