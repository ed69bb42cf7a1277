use chrono::NaiveDate;
use coverage_board::{Employee, Roster};

fn d(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn employee_roundtrips_through_roster_dataframe() {
    let mut roster = Roster::new();

    let mut employee = Employee::new("Alice", true);
    employee.days_off = vec![d(2024, 1, 2), d(2024, 1, 9)];
    employee.accounts = vec!["X".to_string(), "Y".to_string()];

    roster.upsert_employee_record(employee.clone()).unwrap();
    assert_eq!(roster.dataframe().height(), 1);

    let row = Employee::from_dataframe_row(roster.dataframe(), 0).unwrap();
    assert_eq!(row, employee);
}

#[test]
fn employee_without_days_off_roundtrips() {
    let mut roster = Roster::new();
    let mut employee = Employee::new("Bob", false);
    employee.accounts = vec!["X".to_string()];
    roster.upsert_employee_record(employee.clone()).unwrap();

    let row = Employee::from_dataframe_row(roster.dataframe(), 0).unwrap();
    assert!(row.days_off.is_empty());
    assert_eq!(row, employee);
}

#[test]
fn employee_serializes_with_camel_case_keys() {
    let mut employee = Employee::new("Alice", true);
    employee.days_off = vec![d(2024, 1, 2)];
    employee.accounts = vec!["X".to_string()];

    let value = serde_json::to_value(&employee).unwrap();
    assert_eq!(value["name"], "Alice");
    assert_eq!(value["daysOff"][0], "2024-01-02");
    assert_eq!(value["accounts"][0], "X");
    assert_eq!(value["everyday"], true);
}

#[test]
fn employee_deserializes_wire_format() {
    let json = r#"{
        "name": "Bob",
        "daysOff": ["2024-02-05"],
        "accounts": ["X", "Y"],
        "everyday": false
    }"#;
    let employee: Employee = serde_json::from_str(json).unwrap();
    assert_eq!(employee.name, "Bob");
    assert_eq!(employee.days_off, vec![d(2024, 2, 5)]);
    assert_eq!(employee.accounts, vec!["X".to_string(), "Y".to_string()]);
    assert!(!employee.everyday);
}

#[test]
fn is_off_and_covers_check_membership() {
    let mut employee = Employee::new("Alice", false);
    employee.days_off = vec![d(2024, 1, 2)];
    employee.accounts = vec!["X".to_string()];

    assert!(employee.is_off(d(2024, 1, 2)));
    assert!(!employee.is_off(d(2024, 1, 3)));
    assert!(employee.covers("X"));
    assert!(!employee.covers("Y"));
}
