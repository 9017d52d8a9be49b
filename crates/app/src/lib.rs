pub mod config;
pub mod output;
pub mod pipeline;

pub use config::AppConfig;
pub use output::OutputDocument;
pub use pipeline::{run, run_and_save};
