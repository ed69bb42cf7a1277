use crate::employee::Employee;
use std::collections::HashSet;
use std::fmt;

#[derive(Debug, Clone)]
pub struct RosterValidationError {
    message: String,
}

impl RosterValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for RosterValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for RosterValidationError {}

pub fn validate_employee(employee: &Employee) -> Result<(), RosterValidationError> {
    if employee.name.trim().is_empty() {
        return Err(RosterValidationError::new("employee has an empty name"));
    }

    let mut seen_days = HashSet::new();
    for day in &employee.days_off {
        if !seen_days.insert(*day) {
            return Err(RosterValidationError::new(format!(
                "employee '{}' lists day off {} more than once",
                employee.name, day
            )));
        }
    }

    for account in &employee.accounts {
        if account.trim().is_empty() {
            return Err(RosterValidationError::new(format!(
                "employee '{}' has an empty account identifier",
                employee.name
            )));
        }
    }

    Ok(())
}

pub fn validate_employee_collection(employees: &[Employee]) -> Result<(), RosterValidationError> {
    let mut seen_names = HashSet::new();
    for employee in employees {
        validate_employee(employee)?;
        if !seen_names.insert(employee.name.as_str()) {
            return Err(RosterValidationError::new(format!(
                "duplicate employee name '{}'",
                employee.name
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn rejects_empty_name() {
        let employee = Employee::new("  ", false);
        assert!(validate_employee(&employee).is_err());
    }

    #[test]
    fn rejects_repeated_day_off() {
        let mut employee = Employee::new("Dana", false);
        let day = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
        employee.days_off = vec![day, day];
        let err = validate_employee(&employee).unwrap_err();
        assert!(err.to_string().contains("more than once"));
    }

    #[test]
    fn rejects_duplicate_names_across_collection() {
        let employees = vec![Employee::new("Dana", false), Employee::new("Dana", true)];
        let err = validate_employee_collection(&employees).unwrap_err();
        assert!(err.to_string().contains("duplicate employee name"));
    }
}
