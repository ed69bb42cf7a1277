use crate::employee::Employee;
use crate::roster_validation;
use polars::prelude::PolarsError;
use serde_json::Error as SerdeJsonError;
use std::fmt;
use std::io;

#[derive(Debug)]
pub enum PersistenceError {
    Serialization(SerdeJsonError),
    DataFrame(PolarsError),
    Io(io::Error),
    Csv(csv::Error),
    #[cfg(feature = "fetch")]
    Http(reqwest::Error),
    InvalidData(String),
}

impl fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersistenceError::Serialization(err) => write!(f, "serialization error: {err}"),
            PersistenceError::DataFrame(err) => write!(f, "dataframe conversion error: {err}"),
            PersistenceError::Io(err) => write!(f, "io error: {err}"),
            PersistenceError::Csv(err) => write!(f, "csv error: {err}"),
            #[cfg(feature = "fetch")]
            PersistenceError::Http(err) => write!(f, "http error: {err}"),
            PersistenceError::InvalidData(msg) => write!(f, "invalid data: {msg}"),
        }
    }
}

impl std::error::Error for PersistenceError {}

impl From<SerdeJsonError> for PersistenceError {
    fn from(value: SerdeJsonError) -> Self {
        Self::Serialization(value)
    }
}

impl From<PolarsError> for PersistenceError {
    fn from(value: PolarsError) -> Self {
        Self::DataFrame(value)
    }
}

impl From<io::Error> for PersistenceError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<csv::Error> for PersistenceError {
    fn from(value: csv::Error) -> Self {
        Self::Csv(value)
    }
}

#[cfg(feature = "fetch")]
impl From<reqwest::Error> for PersistenceError {
    fn from(value: reqwest::Error) -> Self {
        Self::Http(value)
    }
}

pub type PersistenceResult<T> = Result<T, PersistenceError>;

pub fn validate_employees(employees: &[Employee]) -> PersistenceResult<()> {
    roster_validation::validate_employee_collection(employees)
        .map_err(|err| PersistenceError::InvalidData(err.to_string()))
}

pub mod file;
#[cfg(feature = "fetch")]
pub mod http;

pub use file::{
    RosterSnapshot, load_roster_from_csv, load_roster_from_json, load_roster_from_str,
    save_roster_to_csv, save_roster_to_json,
};
#[cfg(feature = "fetch")]
pub use http::fetch_roster_from_url;
