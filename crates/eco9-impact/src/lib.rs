#![forbid(unsafe_code)]
//! Impact engine: turns a logged activity's category and value into an
//! estimate of CO2 saved and water conserved.
//!
//! [`calculate`] and [`calculate_impact`] are total: they accept any category
//! string and any number, never fail and never touch I/O. Input validation
//! lives one layer up in [`ImpactCalculator::calculate_checked`].

mod calculate;
mod checked;
mod resolve;
mod summary;
mod table;

pub use calculate::{calculate, calculate_impact, impact_for, round2};
pub use checked::{Assessment, ImpactCalculator, NegativeValuePolicy};
pub use resolve::{
    resolve, resolve_multiplier, MultiplierSource, Resolution, GLOBAL_DEFAULT_MULTIPLIER,
};
pub use summary::summarize;
pub use table::{builtin_table, load_table_from_path, table_fingerprint, TableFormat};

pub const CRATE_NAME: &str = "eco9-impact";
