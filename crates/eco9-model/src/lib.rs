#![forbid(unsafe_code)]
//! eco9 domain model.
//!
//! ```compile_fail
//! use eco9_model::ActivityCategory;
//!
//! fn exhaustive_match(c: ActivityCategory) -> &'static str {
//!     match c {
//!         ActivityCategory::Transport => "t",
//!         ActivityCategory::Energy => "e",
//!         ActivityCategory::Waste => "w",
//!         ActivityCategory::Diet => "d",
//!         ActivityCategory::Water => "h",
//!     }
//! }
//! ```

mod activity;
mod category;
mod impact;
mod multiplier;

pub use activity::{
    Activity, ActivityInput, ActivityPage, ActivityQuery, NewActivity, DEFAULT_PAGE_LIMIT,
    MAX_PAGE_LIMIT, NOTE_MAX_LEN, UNIT_MAX_LEN,
};
pub use category::{ActivityCategory, CATEGORY_MAX_LEN, KNOWN_CATEGORIES};
pub use impact::{CategoryTotals, ImpactResult, ImpactSummary};
pub use multiplier::{CategoryMultipliers, ImpactMultiplier, MultiplierTable, SubtypeMultiplier};

pub const CRATE_NAME: &str = "eco9-model";
