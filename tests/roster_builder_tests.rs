use chrono::NaiveDate;
use coverage_board::{Employee, Roster, RosterMetadata};

fn d(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn sample_roster() -> Roster {
    let mut roster = Roster::new();

    let mut alice = Employee::new("Alice", true);
    alice.days_off = vec![d(2024, 1, 9), d(2024, 1, 2)];
    alice.accounts = vec!["X".to_string()];
    roster.upsert_employee_record(alice).unwrap();

    let mut bob = Employee::new("Bob", false);
    bob.days_off = vec![d(2024, 1, 2), d(2024, 1, 16)];
    bob.accounts = vec!["X".to_string(), "Y".to_string()];
    roster.upsert_employee_record(bob).unwrap();

    roster
}

#[test]
fn unique_days_off_dedupes_and_sorts_by_calendar_date() {
    let roster = sample_roster();
    let days = roster.unique_days_off().unwrap();
    // 2024-01-02 appears for both employees but is listed once.
    assert_eq!(days, vec![d(2024, 1, 2), d(2024, 1, 9), d(2024, 1, 16)]);
}

#[test]
fn unique_accounts_keeps_first_seen_order() {
    let roster = sample_roster();
    let accounts = roster.unique_accounts().unwrap();
    assert_eq!(accounts, vec!["X".to_string(), "Y".to_string()]);
}

#[test]
fn employees_preserve_dataset_order() {
    let roster = sample_roster();
    let employees = roster.employees().unwrap();
    let names: Vec<&str> = employees.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["Alice", "Bob"]);
}

#[test]
fn find_employee_returns_none_for_unknown_name() {
    let roster = sample_roster();
    assert!(roster.find_employee("Cara").unwrap().is_none());
    let bob = roster.find_employee("Bob").unwrap().unwrap();
    assert_eq!(bob.accounts.len(), 2);
}

#[test]
fn delete_employee_removes_row() {
    let mut roster = sample_roster();
    assert!(roster.delete_employee("Alice").unwrap());
    assert_eq!(roster.employee_count(), 1);
    assert!(!roster.delete_employee("Alice").unwrap());

    // Alice's sole day off (2024-01-09) disappears with her.
    let days = roster.unique_days_off().unwrap();
    assert_eq!(days, vec![d(2024, 1, 2), d(2024, 1, 16)]);
}

#[test]
fn upsert_rejects_empty_name() {
    let mut roster = Roster::new();
    let err = roster
        .upsert_employee_record(Employee::new("   ", false))
        .expect_err("empty names are invalid");
    assert!(err.to_string().contains("empty name"));
}

#[test]
fn metadata_setters_update_in_place() {
    let mut roster = Roster::new_with_metadata(RosterMetadata {
        team_name: "Night Shift".into(),
        description: "Coverage rota".into(),
    });
    assert_eq!(roster.team_name(), "Night Shift");

    roster.set_description("Updated rota");
    assert_eq!(roster.description(), "Updated rota");
}

#[test]
fn empty_roster_has_no_derived_sets() {
    let roster = Roster::new();
    assert!(roster.is_empty());
    assert!(roster.unique_days_off().unwrap().is_empty());
    assert!(roster.unique_accounts().unwrap().is_empty());
}
