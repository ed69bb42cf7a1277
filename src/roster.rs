use crate::employee::Employee;
use crate::metadata::RosterMetadata;
use crate::roster_validation::{self, RosterValidationError};
use chrono::NaiveDate;
use polars::prelude::PlSmallStr;
use polars::prelude::*;
use std::collections::HashSet;

/// The validated employee dataset, backed by a DataFrame with one row per
/// employee. Once loaded it is read-only shared data for the board layer;
/// the editing methods exist for dataset preparation, and any edit requires
/// rebuilding the board.
#[derive(Debug)]
pub struct Roster {
    df: DataFrame,
    metadata: RosterMetadata,
}

impl Roster {
    pub(crate) fn from_parts(metadata: RosterMetadata) -> Self {
        let schema = Self::default_schema();
        let df = DataFrame::empty_with_schema(&schema);
        Self { df, metadata }
    }

    pub fn new() -> Self {
        Self::from_parts(RosterMetadata::default())
    }

    pub fn new_with_metadata(metadata: RosterMetadata) -> Self {
        Self::from_parts(metadata)
    }

    pub fn dataframe(&self) -> &DataFrame {
        &self.df
    }

    pub fn metadata(&self) -> &RosterMetadata {
        &self.metadata
    }

    pub fn team_name(&self) -> &str {
        &self.metadata.team_name
    }

    pub fn description(&self) -> &str {
        &self.metadata.description
    }

    pub fn set_metadata(&mut self, metadata: RosterMetadata) {
        self.metadata = metadata;
    }

    pub fn set_team_name(&mut self, name: impl Into<String>) {
        self.metadata.team_name = name.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.metadata.description = description.into();
    }

    pub fn employee_count(&self) -> usize {
        self.df.height()
    }

    pub fn is_empty(&self) -> bool {
        self.df.height() == 0
    }

    fn default_schema() -> Schema {
        Schema::from_iter(vec![
            Field::new("name".into(), DataType::String),
            Field::new("days_off".into(), DataType::List(Box::new(DataType::Date))),
            Field::new(
                "accounts".into(),
                DataType::List(Box::new(DataType::String)),
            ),
            Field::new("everyday".into(), DataType::Boolean),
        ])
    }

    /// All employees in dataset order.
    pub fn employees(&self) -> Result<Vec<Employee>, PolarsError> {
        let df = self.dataframe();
        let mut employees = Vec::with_capacity(df.height());
        for idx in 0..df.height() {
            employees.push(Employee::from_dataframe_row(df, idx)?);
        }
        Ok(employees)
    }

    pub fn find_employee(&self, name: &str) -> Result<Option<Employee>, PolarsError> {
        if self.df.height() == 0 {
            return Ok(None);
        }
        let names = self.df.column("name")?.str()?;
        for (idx, name_opt) in names.into_iter().enumerate() {
            if name_opt == Some(name) {
                let employee = Employee::from_dataframe_row(self.dataframe(), idx)?;
                return Ok(Some(employee));
            }
        }
        Ok(None)
    }

    /// Every distinct date that appears in any employee's days-off list,
    /// sorted ascending by calendar date.
    pub fn unique_days_off(&self) -> Result<Vec<NaiveDate>, PolarsError> {
        let mut seen = HashSet::new();
        let mut dates = Vec::new();
        for employee in self.employees()? {
            for day in employee.days_off {
                if seen.insert(day) {
                    dates.push(day);
                }
            }
        }
        dates.sort_unstable();
        Ok(dates)
    }

    /// Every distinct account referenced by any employee, in first-seen order.
    /// Deliberately not sorted.
    pub fn unique_accounts(&self) -> Result<Vec<String>, PolarsError> {
        let mut seen = HashSet::new();
        let mut accounts = Vec::new();
        for employee in self.employees()? {
            for account in employee.accounts {
                if seen.insert(account.clone()) {
                    accounts.push(account);
                }
            }
        }
        Ok(accounts)
    }

    fn validation_error(err: RosterValidationError) -> PolarsError {
        PolarsError::ComputeError(err.to_string().into())
    }

    pub fn upsert_employee_record(&mut self, employee: Employee) -> Result<(), PolarsError> {
        roster_validation::validate_employee(&employee).map_err(Self::validation_error)?;
        let name_exists = if self.df.height() == 0 {
            false
        } else {
            self.df
                .column("name")?
                .str()?
                .into_iter()
                .any(|v| v == Some(employee.name.as_str()))
        };

        if name_exists {
            self.update_list_date_column("days_off", &employee.name, &employee.days_off)?;
            self.update_list_str_column("accounts", &employee.name, employee.accounts.clone())?;
            self.update_bool_column("everyday", &employee.name, employee.everyday)?;
            return Ok(());
        }

        let new_row = employee.to_dataframe_row()?;
        self.df = self.df.vstack(&new_row)?;
        Ok(())
    }

    pub fn delete_employee(&mut self, name: &str) -> Result<bool, PolarsError> {
        if self.df.height() == 0 {
            return Ok(false);
        }
        let snapshot = self.df.clone();
        let mut kept: Vec<Employee> = Vec::with_capacity(snapshot.height());
        let mut found = false;
        for idx in 0..snapshot.height() {
            let employee = Employee::from_dataframe_row(&snapshot, idx)?;
            if employee.name == name {
                found = true;
                continue;
            }
            kept.push(employee);
        }
        if !found {
            return Ok(false);
        }

        self.df = DataFrame::empty_with_schema(&Self::default_schema());
        for employee in kept {
            self.upsert_employee_record(employee)?;
        }
        Ok(true)
    }

    fn update_bool_column(
        &mut self,
        column_name: &str,
        employee_name: &str,
        new_value: bool,
    ) -> Result<(), PolarsError> {
        let name_col = self.df.column("name")?;
        let target_col = self.df.column(column_name)?;

        let new_series = target_col
            .bool()?
            .into_iter()
            .zip(name_col.str()?.into_iter())
            .map(|(val, name)| {
                if name == Some(employee_name) {
                    Some(new_value)
                } else {
                    val
                }
            })
            .collect::<BooleanChunked>()
            .into_series()
            .with_name(column_name.into());

        self.df.replace(column_name, new_series)?;
        Ok(())
    }

    fn update_list_str_column(
        &mut self,
        column_name: &str,
        employee_name: &str,
        new_values: Vec<String>,
    ) -> Result<(), PolarsError> {
        let name_col = self.df.column("name")?;
        let target_col = self.df.column(column_name)?;

        let replacement = Series::new(PlSmallStr::from_static(""), new_values);
        let new_series = target_col
            .list()?
            .into_iter()
            .zip(name_col.str()?.into_iter())
            .map(|(val, name)| {
                if name == Some(employee_name) {
                    Some(replacement.clone())
                } else {
                    val
                }
            })
            .collect::<ListChunked>()
            .into_series()
            .with_name(column_name.into());

        self.df.replace(column_name, new_series)?;
        Ok(())
    }

    fn update_list_date_column(
        &mut self,
        column_name: &str,
        employee_name: &str,
        new_dates: &[NaiveDate],
    ) -> Result<(), PolarsError> {
        let name_col = self.df.column("name")?;
        let target_col = self.df.column(column_name)?;

        let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
        let days: Vec<i32> = new_dates
            .iter()
            .map(|d| (*d - epoch).num_days() as i32)
            .collect();
        let replacement =
            Series::new(PlSmallStr::from_static(""), days).cast(&DataType::Date)?;
        let new_series = target_col
            .list()?
            .into_iter()
            .zip(name_col.str()?.into_iter())
            .map(|(val, name)| {
                if name == Some(employee_name) {
                    Some(replacement.clone())
                } else {
                    val
                }
            })
            .collect::<ListChunked>()
            .into_series()
            // Collecting from Option<Series> degrades the inner dtype to the
            // physical i32; restore List(Date) before replacing the column.
            .cast(&DataType::List(Box::new(DataType::Date)))?
            .with_name(column_name.into());

        self.df.replace(column_name, new_series)?;
        Ok(())
    }
}

impl Default for Roster {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_schema_contains_expected_columns() {
        let schema = Roster::default_schema();
        for name in ["name", "days_off", "accounts", "everyday"] {
            assert!(schema.contains(name.into()), "missing column {name}");
        }
    }

    #[test]
    fn upsert_employee_inserts_and_updates() {
        let mut roster = Roster::new();
        let mut employee = Employee::new("Alice", false);
        employee.days_off = vec![NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()];
        employee.accounts = vec!["X".into()];
        roster.upsert_employee_record(employee.clone()).unwrap();
        assert_eq!(roster.employee_count(), 1);

        employee.everyday = true;
        employee.days_off = vec![NaiveDate::from_ymd_opt(2024, 1, 9).unwrap()];
        employee.accounts = vec!["X".into(), "Y".into()];
        roster.upsert_employee_record(employee).unwrap();
        assert_eq!(roster.employee_count(), 1);

        // The dates must survive the in-place column update, not just the
        // initial vstack.
        let stored = roster.find_employee("Alice").unwrap().unwrap();
        assert!(stored.everyday);
        assert_eq!(
            stored.days_off,
            vec![NaiveDate::from_ymd_opt(2024, 1, 9).unwrap()]
        );
        assert_eq!(stored.accounts, vec!["X".to_string(), "Y".to_string()]);
    }
}
