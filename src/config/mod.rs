// Task configuration: typed task description, analyzer options, file loading
mod core;
mod loader;
pub mod options;

pub use self::core::{
    AnalyzerCommand, AnalyzerSection, TaskConfig, TaskConfigFile, DEFAULT_ANALYZER_PROGRAM,
    SCRATCH_DIR_NAME,
};
pub use loader::{
    default_config_template, directory_ancestors, find_config_file, load_config,
    load_task_config, parse_task_config, DEFAULT_CONFIG_FILE,
};
pub use options::{AnalyzerOptions, OptionValue, OverwritingStrategy, RECOGNIZED_OPTIONS};
