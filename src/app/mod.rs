pub mod headless;

pub use headless::{load_config, run, RunError, RunOptions, RunSummary};
