use crate::coverage::{self, CoverageTier, EverydayStatus};
use crate::employee::Employee;
use crate::roster::Roster;
use chrono::NaiveDate;
use polars::prelude::PolarsError;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum BoardError {
    UnknownDate(NaiveDate),
    UnknownEmployee(String),
    DisabledEntry { employee: String, date: NaiveDate },
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::UnknownDate(date) => write!(f, "no day card for {date}"),
            BoardError::UnknownEmployee(name) => write!(f, "employee '{name}' not on the board"),
            BoardError::DisabledEntry { employee, date } => write!(
                f,
                "employee '{employee}' is off on {date}; entry is disabled"
            ),
        }
    }
}

impl std::error::Error for BoardError {}

/// One checkbox on a day card. Disabled entries belong to employees who are
/// off that day; they start unchecked and stay unchecked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChecklistEntry {
    pub employee: String,
    pub disabled: bool,
    pub checked: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountStatus {
    pub account: String,
    pub tier: CoverageTier,
}

/// The rendered unit for one calendar date requiring coverage. Built once per
/// load; only checkbox state and the derived indicators mutate afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayCard {
    pub date: NaiveDate,
    pub entries: Vec<ChecklistEntry>,
    pub accounts: Vec<AccountStatus>,
    pub everyday: EverydayStatus,
}

impl DayCard {
    fn new(date: NaiveDate, employees: &[Employee], accounts: &[String]) -> Self {
        let entries = employees
            .iter()
            .map(|e| ChecklistEntry {
                employee: e.name.clone(),
                disabled: e.is_off(date),
                checked: false,
            })
            .collect();
        let accounts = accounts
            .iter()
            .map(|account| AccountStatus {
                account: account.clone(),
                tier: CoverageTier::Uncovered,
            })
            .collect();
        Self {
            date,
            entries,
            accounts,
            everyday: EverydayStatus::Unmet,
        }
    }

    pub fn entry(&self, employee: &str) -> Option<&ChecklistEntry> {
        self.entries.iter().find(|e| e.employee == employee)
    }

    pub fn account(&self, account: &str) -> Option<&AccountStatus> {
        self.accounts.iter().find(|a| a.account == account)
    }

    pub fn checked_names(&self) -> HashSet<&str> {
        self.entries
            .iter()
            .filter(|e| e.checked)
            .map(|e| e.employee.as_str())
            .collect()
    }

    /// Recompute both indicators from the current checked set. Previously
    /// applied tiers are overwritten wholesale, never layered.
    fn recompute(&mut self, employees: &[Employee]) {
        let checked = self.checked_names();
        let everyday = coverage::everyday_status(employees, &checked);
        let tiers: Vec<CoverageTier> = self
            .accounts
            .iter()
            .map(|status| {
                let count = coverage::account_count(employees, &checked, &status.account);
                CoverageTier::from_count(count)
            })
            .collect();
        for (status, tier) in self.accounts.iter_mut().zip(tiers) {
            status.tier = tier;
        }
        self.everyday = everyday;
    }
}

/// The full checklist surface: one card per distinct day-off date, in
/// ascending calendar order, plus the dataset the cards were derived from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Board {
    employees: Vec<Employee>,
    days: Vec<DayCard>,
}

impl Board {
    pub fn build(roster: &Roster) -> Result<Self, PolarsError> {
        let employees = roster.employees()?;
        let dates = roster.unique_days_off()?;
        let accounts = roster.unique_accounts()?;
        let days = dates
            .into_iter()
            .map(|date| DayCard::new(date, &employees, &accounts))
            .collect();
        Ok(Self { employees, days })
    }

    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    pub fn days(&self) -> &[DayCard] {
        &self.days
    }

    pub fn day(&self, date: NaiveDate) -> Option<&DayCard> {
        self.days.iter().find(|card| card.date == date)
    }

    pub fn day_count(&self) -> usize {
        self.days.len()
    }

    /// Apply a checkbox command and recompute the affected card. Toggling a
    /// disabled entry is rejected without changing any state.
    pub fn toggle(
        &mut self,
        employee: &str,
        date: NaiveDate,
        checked: bool,
    ) -> Result<&DayCard, BoardError> {
        let card_idx = self
            .days
            .iter()
            .position(|card| card.date == date)
            .ok_or(BoardError::UnknownDate(date))?;

        let employees = &self.employees;
        let card = &mut self.days[card_idx];
        let entry = card
            .entries
            .iter_mut()
            .find(|e| e.employee == employee)
            .ok_or_else(|| BoardError::UnknownEmployee(employee.to_string()))?;
        if entry.disabled {
            return Err(BoardError::DisabledEntry {
                employee: employee.to_string(),
                date,
            });
        }
        entry.checked = checked;
        tracing::debug!(employee, %date, checked, "checkbox toggled");
        card.recompute(employees);
        Ok(&self.days[card_idx])
    }

    /// Recompute every card from its current checked set. Idempotent: running
    /// this twice without an intervening toggle changes nothing the second
    /// time.
    pub fn recompute_all(&mut self) {
        let employees = &self.employees;
        self.days
            .par_iter_mut()
            .for_each(|card| card.recompute(employees));
    }
}
