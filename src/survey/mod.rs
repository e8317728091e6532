//! Survey ingestion
//!
//! Reads respondent rows, checks them against the expected column layout,
//! and turns each verified row into add/sub triples.

mod composite;
mod date;
mod error;
pub mod layout;
mod orchestrator;
mod patent;
mod row;

pub use composite::{Award, CompositeRecord, Degree, ServiceRole};
pub use date::{build_date, DateInterval};
pub use error::InputError;
pub use layout::{GroupCounts, SurveyLayout};
pub use orchestrator::{Identity, RowOrchestrator};
pub use patent::{OfflineRegistry, PatentRecord, PatentRegistry, PatentTable, RegistryError};
pub use row::{Row, Survey};
