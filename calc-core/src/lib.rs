//! Calculation engine for an interactive calculator.
//!
//! The engine interprets discrete user actions (digit entry, operators,
//! scientific functions, memory and variable operations) and produces a
//! display value, an expression trace and a bounded history log. Rendering
//! and event wiring live outside this crate.

pub mod engine;
pub mod models;
pub mod prefs;

pub use engine::{
    Action, BinaryOp, Bracket, CalcError, Calculator, MemoryOp, ScientificFn, Sentinel,
    StateObserver,
};
pub use models::*;
pub use prefs::{MemoryPreferenceStore, PreferenceError, PreferenceStore, Preferences, Theme};
