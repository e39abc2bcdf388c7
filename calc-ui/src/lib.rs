pub mod commands;
pub mod logging;
pub mod prefs_file;
pub mod repl;
pub mod settings;
