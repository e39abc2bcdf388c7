mod config;
mod history;
mod state;
mod variables;

pub use config::{
    AngleMode, ConfigError, DEFAULT_HISTORY_LIMIT, DEFAULT_PRECISION, DisplayMode, EngineConfig,
    MAX_PRECISION,
};
pub use history::History;
pub use state::{CalculatorState, PendingOperation};
pub use variables::{Variable, Variables};
