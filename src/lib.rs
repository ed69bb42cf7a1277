pub mod board;
pub mod coverage;
pub mod employee;
#[cfg(feature = "http_api")]
pub mod http_api;
pub mod metadata;
pub mod persistence;
pub mod roster;
pub(crate) mod roster_validation;

pub use board::{AccountStatus, Board, BoardError, ChecklistEntry, DayCard};
pub use coverage::{CoverageTier, EverydayStatus};
pub use employee::Employee;
pub use metadata::RosterMetadata;
#[cfg(feature = "fetch")]
pub use persistence::fetch_roster_from_url;
pub use persistence::{
    PersistenceError, RosterSnapshot, load_roster_from_csv, load_roster_from_json,
    load_roster_from_str, save_roster_to_csv, save_roster_to_json, validate_employees,
};
pub use roster::Roster;
