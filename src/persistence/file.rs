use super::{PersistenceError, PersistenceResult};
use crate::{Employee, Roster, RosterMetadata};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// The wire format: the `employees` sequence is mandatory, metadata optional.
/// A payload without an `employees` array is rejected at deserialization.
#[derive(Serialize, Deserialize)]
pub struct RosterSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<RosterMetadata>,
    pub employees: Vec<Employee>,
}

impl RosterSnapshot {
    pub fn from_roster(roster: &Roster) -> PersistenceResult<Self> {
        let employees = roster.employees()?;
        super::validate_employees(&employees)?;
        Ok(Self {
            metadata: Some(roster.metadata().clone()),
            employees,
        })
    }

    pub fn into_roster(self) -> PersistenceResult<Roster> {
        super::validate_employees(&self.employees)?;
        let metadata = self.metadata.unwrap_or_default();
        let mut roster = Roster::new_with_metadata(metadata);
        for employee in self.employees {
            roster.upsert_employee_record(employee)?;
        }
        Ok(roster)
    }
}

pub fn save_roster_to_json<P: AsRef<Path>>(roster: &Roster, path: P) -> PersistenceResult<()> {
    let snapshot = RosterSnapshot::from_roster(roster)?;
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, &snapshot)?;
    Ok(())
}

pub fn load_roster_from_json<P: AsRef<Path>>(path: P) -> PersistenceResult<Roster> {
    let mut file = File::open(path)?;
    let mut text = String::new();
    file.read_to_string(&mut text)?;
    load_roster_from_str(&text)
}

/// Parse and validate a JSON dataset. Shared by the file loader and the
/// network fetch so both acquisition paths fail identically on bad input.
pub fn load_roster_from_str(text: &str) -> PersistenceResult<Roster> {
    let snapshot: RosterSnapshot = serde_json::from_str(text)?;
    let roster = snapshot.into_roster()?;
    tracing::info!(employees = roster.employee_count(), "roster loaded");
    Ok(roster)
}

#[derive(Default, Serialize, Deserialize)]
struct EmployeeCsvRecord {
    name: String,
    days_off: String,
    accounts: String,
    everyday: String,
    #[serde(default)]
    metadata_json: String,
}

impl From<&Employee> for EmployeeCsvRecord {
    fn from(employee: &Employee) -> Self {
        let mut record = EmployeeCsvRecord::default();
        record.name = employee.name.clone();
        record.days_off = join_dates(&employee.days_off);
        record.accounts = join_strings(&employee.accounts);
        record.everyday = employee.everyday.to_string();
        record
    }
}

impl EmployeeCsvRecord {
    fn metadata_row(roster: &Roster) -> PersistenceResult<Self> {
        let metadata_json = serde_json::to_string(roster.metadata())?;
        let mut record = EmployeeCsvRecord::default();
        record.name = "__metadata__".to_string();
        record.metadata_json = metadata_json;
        Ok(record)
    }

    fn is_metadata_row(&self) -> bool {
        !self.metadata_json.trim().is_empty()
    }

    fn into_employee(self) -> PersistenceResult<Employee> {
        if self.is_metadata_row() {
            return Err(PersistenceError::InvalidData(
                "metadata row cannot be converted to an employee".into(),
            ));
        }
        let mut employee = Employee::new(self.name, parse_flag(&self.everyday)?);
        employee.days_off = split_dates(&self.days_off)?;
        employee.accounts = split_strings(&self.accounts);
        Ok(employee)
    }
}

pub fn save_roster_to_csv<P: AsRef<Path>>(roster: &Roster, path: P) -> PersistenceResult<()> {
    let employees = roster.employees()?;
    super::validate_employees(&employees)?;
    let file = File::create(path)?;
    let mut writer = csv::Writer::from_writer(file);
    writer.serialize(EmployeeCsvRecord::metadata_row(roster)?)?;
    for employee in &employees {
        writer.serialize(EmployeeCsvRecord::from(employee))?;
    }
    writer.flush()?;
    Ok(())
}

pub fn load_roster_from_csv<P: AsRef<Path>>(path: P) -> PersistenceResult<Roster> {
    let file = File::open(path)?;
    let mut reader = csv::Reader::from_reader(file);
    let mut employees = Vec::new();
    let mut metadata: Option<RosterMetadata> = None;
    for record in reader.deserialize::<EmployeeCsvRecord>() {
        let record = record?;
        if record.is_metadata_row() {
            if metadata.is_some() {
                return Err(PersistenceError::InvalidData(
                    "CSV file contained multiple metadata rows".into(),
                ));
            }
            metadata = Some(serde_json::from_str(&record.metadata_json).map_err(|err| {
                PersistenceError::InvalidData(format!("invalid metadata json: {err}"))
            })?);
            continue;
        }
        employees.push(record.into_employee()?);
    }

    super::validate_employees(&employees)?;

    let mut roster = match metadata {
        Some(metadata) => Roster::new_with_metadata(metadata),
        None => Roster::new(),
    };
    for employee in employees {
        roster.upsert_employee_record(employee)?;
    }
    tracing::info!(employees = roster.employee_count(), "roster loaded from csv");
    Ok(roster)
}

fn join_dates(dates: &[NaiveDate]) -> String {
    dates
        .iter()
        .map(|d| d.format("%Y-%m-%d").to_string())
        .collect::<Vec<_>>()
        .join(";")
}

fn split_dates(input: &str) -> PersistenceResult<Vec<NaiveDate>> {
    if input.trim().is_empty() {
        return Ok(Vec::new());
    }
    input
        .split(';')
        .map(|part| {
            NaiveDate::parse_from_str(part.trim(), "%Y-%m-%d")
                .map_err(|e| PersistenceError::InvalidData(format!("invalid date '{part}': {e}")))
        })
        .collect()
}

fn join_strings(values: &[String]) -> String {
    values.join(";")
}

fn split_strings(input: &str) -> Vec<String> {
    if input.trim().is_empty() {
        return Vec::new();
    }
    input.split(';').map(|s| s.trim().to_string()).collect()
}

fn parse_flag(input: &str) -> PersistenceResult<bool> {
    match input.trim().to_ascii_lowercase().as_str() {
        "true" => Ok(true),
        "false" | "" => Ok(false),
        other => Err(PersistenceError::InvalidData(format!(
            "invalid boolean '{other}'"
        ))),
    }
}
