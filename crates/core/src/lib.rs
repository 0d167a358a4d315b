//! `prospetti-core` — payroll-hours validation and configuration engine.
//!
//! Pure engine crate: classifies extracted payslip rows, merges duplicates,
//! assembles the configuration contract and gates the export action.
//! No IO, no HTTP, no CLI dependencies.

pub mod assemble;
pub mod classify;
pub mod error;
pub mod fields;
pub mod gate;
pub mod merge;
pub mod model;
pub mod numeric;
pub mod preset;
pub mod state;

pub use assemble::assemble;
pub use classify::classify;
pub use error::CoreError;
pub use gate::{readiness, ExportReadiness};
pub use merge::{merge_rows, MergeReport};
pub use model::{ConfigDocument, ExtractedRow, ParsingConfig, Period, RiskLabel};
pub use preset::Preset;
pub use state::SessionState;
