use crate::employee::Employee;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Staffing level of one account on one day. Exactly one tier applies at a
/// time; the tier is a step function of how many checked employees list the
/// account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoverageTier {
    Uncovered,
    Green,
    Blue,
    Purple,
}

impl CoverageTier {
    pub fn from_count(count: usize) -> Self {
        match count {
            0 => CoverageTier::Uncovered,
            1 => CoverageTier::Green,
            2 => CoverageTier::Blue,
            _ => CoverageTier::Purple,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CoverageTier::Uncovered => "uncovered",
            CoverageTier::Green => "green",
            CoverageTier::Blue => "blue",
            CoverageTier::Purple => "purple",
        }
    }
}

impl fmt::Display for CoverageTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EverydayStatus {
    Unmet,
    Met,
}

impl EverydayStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EverydayStatus::Unmet => "unmet",
            EverydayStatus::Met => "met",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EverydayStatus::Unmet => "Everyday Requirement: Unmet",
            EverydayStatus::Met => "Everyday Requirement: Met",
        }
    }
}

impl fmt::Display for EverydayStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Met iff at least one checked employee carries the everyday flag. A checked
/// entry can never belong to an employee who is off that day (those entries
/// are disabled), so no day-off re-check is needed here.
pub fn everyday_status(employees: &[Employee], checked: &HashSet<&str>) -> EverydayStatus {
    let covered = employees
        .iter()
        .any(|e| e.everyday && checked.contains(e.name.as_str()));
    if covered {
        EverydayStatus::Met
    } else {
        EverydayStatus::Unmet
    }
}

/// How many checked employees list the given account.
pub fn account_count(employees: &[Employee], checked: &HashSet<&str>, account: &str) -> usize {
    employees
        .iter()
        .filter(|e| checked.contains(e.name.as_str()) && e.covers(account))
        .count()
}
