use chrono::NaiveDate;
use coverage_board::{
    Board, DayCard, Employee, Roster, load_roster_from_csv, load_roster_from_json,
    save_roster_to_csv, save_roster_to_json,
};
use polars::prelude::{AnyValue, DataFrame};
use std::io::{self, Write};

fn parse_date_list(s: &str) -> Option<Vec<NaiveDate>> {
    if s.trim().is_empty() {
        return Some(Vec::new());
    }
    s.split(',')
        .map(|p| NaiveDate::parse_from_str(p.trim(), "%Y-%m-%d").ok())
        .collect()
}

fn parse_string_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .collect()
}

fn format_date_days(days: i32) -> String {
    let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
    (epoch + chrono::Duration::days(days as i64)).to_string()
}

fn render_employees_table(df: &DataFrame) -> String {
    let columns = df.get_columns();
    let col_names: Vec<String> = columns.iter().map(|c| c.name().to_string()).collect();

    let cell = |col: &polars::prelude::Column, row_idx: usize| -> String {
        match col.get(row_idx) {
            Ok(AnyValue::Null) => String::new(),
            Ok(AnyValue::String(s)) => s.to_string(),
            Ok(AnyValue::Boolean(v)) => v.to_string(),
            Ok(AnyValue::List(inner)) if col.name() == "days_off" => {
                if let Ok(ca) = inner.date() {
                    (0..ca.len())
                        .filter_map(|i| ca.get(i))
                        .map(format_date_days)
                        .collect::<Vec<_>>()
                        .join(",")
                } else {
                    String::new()
                }
            }
            Ok(AnyValue::List(inner)) => {
                if let Ok(ca) = inner.str() {
                    ca.into_iter()
                        .flatten()
                        .collect::<Vec<_>>()
                        .join(",")
                } else {
                    String::new()
                }
            }
            Ok(av) => av.to_string(),
            Err(_) => String::new(),
        }
    };

    let mut widths: Vec<usize> = col_names.iter().map(|n| n.len()).collect();
    for (ci, col) in columns.iter().enumerate() {
        for row_idx in 0..df.height() {
            let s = cell(col, row_idx);
            if s.len() > widths[ci] {
                widths[ci] = s.len();
            }
        }
    }

    let mut sep = String::new();
    sep.push('+');
    for w in &widths {
        sep.push_str(&"-".repeat(*w + 2));
        sep.push('+');
    }

    let mut out = String::new();
    out.push_str(&sep);
    out.push('\n');

    out.push('|');
    for (i, name) in col_names.iter().enumerate() {
        out.push(' ');
        out.push_str(name);
        let pad = widths[i] - name.len();
        if pad > 0 {
            out.push_str(&" ".repeat(pad));
        }
        out.push(' ');
        out.push('|');
    }
    out.push('\n');
    out.push_str(&sep);
    out.push('\n');

    for row_idx in 0..df.height() {
        out.push('|');
        for (ci, col) in columns.iter().enumerate() {
            let s = cell(col, row_idx);
            out.push(' ');
            out.push_str(&s);
            let pad = widths[ci].saturating_sub(s.len());
            if pad > 0 {
                out.push_str(&" ".repeat(pad));
            }
            out.push(' ');
            out.push('|');
        }
        out.push('\n');
    }

    out.push_str(&sep);
    out.push('\n');
    out
}

fn render_day_card(card: &DayCard) -> String {
    let mut out = String::new();
    out.push_str(&format!("Day: {}  ({})\n", card.date, card.everyday.label()));
    for entry in &card.entries {
        let mark = if entry.disabled {
            "----"
        } else if entry.checked {
            "[x] "
        } else {
            "[ ] "
        };
        let off = if entry.disabled { " (off)" } else { "" };
        out.push_str(&format!("  {} {}{}\n", mark, entry.employee, off));
    }
    let accounts = card
        .accounts
        .iter()
        .map(|status| format!("{}={}", status.account, status.tier))
        .collect::<Vec<_>>()
        .join("  ");
    if !accounts.is_empty() {
        out.push_str(&format!("  accounts: {accounts}\n"));
    }
    out
}

fn render_board(board: &Board) -> String {
    if board.days().is_empty() {
        return "No day cards (no days off in the dataset).\n".to_string();
    }
    board.days().iter().map(render_day_card).collect()
}

fn print_help() {
    println!(
        "Commands:\n  help                               Show this help\n  show                               Show the employee dataset\n  board                              Show every day card\n  day <YYYY-MM-DD>                   Show one day card\n  check <name> <YYYY-MM-DD>          Check an employee for a day\n  uncheck <name> <YYYY-MM-DD>        Uncheck an employee for a day\n  add <name> <true|false> [days_off_csv] [accounts_csv]\n                                     Upsert an employee (dates like 2024-01-02,2024-01-09)\n  delete <name>                      Remove an employee and rebuild the board\n  load <json|csv> <path>             Load a roster from disk\n  fetch <url>                        Fetch a roster over HTTP\n  save <json|csv> <path>             Persist the roster to disk\n  meta show                          Show roster metadata\n  meta name <text...>                Update team name\n  meta desc <text...>                Update description\n  quit|exit                          Exit"
    );
}

fn print_metadata(roster: &Roster) {
    let metadata = roster.metadata();
    println!("Team name  : {}", metadata.team_name);
    println!("Description: {}", metadata.description);
}

fn rebuild_board(roster: &Roster) -> Option<Board> {
    match Board::build(roster) {
        Ok(board) => Some(board),
        Err(e) => {
            println!("Error building board: {}", e);
            None
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut roster = Roster::new();
    let mut board = Board::build(&roster).expect("empty roster always builds");

    if let Some(path) = std::env::args().nth(1) {
        match load_roster_from_json(&path) {
            Ok(loaded) => {
                roster = loaded;
                if let Some(b) = rebuild_board(&roster) {
                    board = b;
                }
            }
            Err(e) => println!("Error loading {}: {}", path, e),
        }
    }

    println!("Coverage Board (CLI) - type 'help' for commands\n");
    println!("{}", render_employees_table(roster.dataframe()));

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        let _ = io::stdout().flush();
        line.clear();
        if stdin.read_line(&mut line).is_err() {
            break;
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let mut parts = input.split_whitespace();
        let cmd = parts.next().unwrap_or("");

        match cmd {
            "help" => {
                print_help();
            }
            "quit" | "exit" => break,
            "show" => {
                println!("{}", render_employees_table(roster.dataframe()));
            }
            "board" => {
                println!("{}", render_board(&board));
            }
            "day" => {
                let date_s = parts.next();
                match date_s.and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()) {
                    Some(date) => match board.day(date) {
                        Some(card) => println!("{}", render_day_card(card)),
                        None => println!("No day card for {date}."),
                    },
                    None => println!("Usage: day <YYYY-MM-DD>"),
                }
            }
            "check" | "uncheck" => {
                let name_s = parts.next();
                let date_s = parts.next();
                match (name_s, date_s) {
                    (Some(name), Some(date_s)) => {
                        let date = match NaiveDate::parse_from_str(date_s, "%Y-%m-%d") {
                            Ok(d) => d,
                            Err(_) => {
                                println!("Invalid date (YYYY-MM-DD)");
                                continue;
                            }
                        };
                        match board.toggle(name, date, cmd == "check") {
                            Ok(card) => println!("{}", render_day_card(card)),
                            Err(e) => println!("Error: {}", e),
                        }
                    }
                    _ => println!("Usage: {} <name> <YYYY-MM-DD>", cmd),
                }
            }
            "add" => {
                let name_s = parts.next();
                let everyday_s = parts.next();
                let days_s = parts.next();
                let accounts_s = parts.next();
                match (name_s, everyday_s) {
                    (Some(name), Some(everyday_s)) => {
                        let everyday = match everyday_s.to_ascii_lowercase().as_str() {
                            "true" => true,
                            "false" => false,
                            _ => {
                                println!("Invalid bool (true|false)");
                                continue;
                            }
                        };
                        let days_off = match days_s.map(parse_date_list) {
                            Some(Some(dates)) => dates,
                            Some(None) => {
                                println!("Invalid date list (YYYY-MM-DD, comma separated)");
                                continue;
                            }
                            None => Vec::new(),
                        };
                        let mut employee = Employee::new(name, everyday);
                        employee.days_off = days_off;
                        employee.accounts =
                            accounts_s.map(parse_string_list).unwrap_or_default();
                        match roster.upsert_employee_record(employee) {
                            Ok(_) => {
                                println!("Employee upserted.");
                                if let Some(b) = rebuild_board(&roster) {
                                    board = b;
                                }
                                println!("{}", render_employees_table(roster.dataframe()));
                            }
                            Err(e) => println!("Error: {}", e),
                        }
                    }
                    _ => println!("Usage: add <name> <true|false> [days_off_csv] [accounts_csv]"),
                }
            }
            "delete" => match parts.next() {
                Some(name) => match roster.delete_employee(name) {
                    Ok(true) => {
                        println!("Deleted employee {name}.");
                        if let Some(b) = rebuild_board(&roster) {
                            board = b;
                        }
                        println!("{}", render_employees_table(roster.dataframe()));
                    }
                    Ok(false) => println!("Employee {name} not found."),
                    Err(e) => println!("Error deleting employee: {}", e),
                },
                None => println!("Usage: delete <name>"),
            },
            "load" => {
                let format_s = parts.next();
                let path_s = parts.next();
                match (format_s, path_s) {
                    (Some(format), Some(path)) => {
                        let loaded = match format {
                            "json" => load_roster_from_json(path),
                            "csv" => load_roster_from_csv(path),
                            _ => {
                                println!("Usage: load <json|csv> <path>");
                                continue;
                            }
                        };
                        match loaded {
                            Ok(new_roster) => {
                                roster = new_roster;
                                if let Some(b) = rebuild_board(&roster) {
                                    board = b;
                                }
                                println!("Roster loaded from {path}.");
                                println!("{}", render_employees_table(roster.dataframe()));
                            }
                            Err(e) => println!("Error loading roster: {}", e),
                        }
                    }
                    _ => println!("Usage: load <json|csv> <path>"),
                }
            }
            "fetch" => match parts.next() {
                #[cfg(feature = "fetch")]
                Some(url) => match coverage_board::fetch_roster_from_url(url) {
                    Ok(new_roster) => {
                        roster = new_roster;
                        if let Some(b) = rebuild_board(&roster) {
                            board = b;
                        }
                        println!("Roster fetched from {url}.");
                        println!("{}", render_employees_table(roster.dataframe()));
                    }
                    Err(e) => println!("Error fetching roster: {}", e),
                },
                #[cfg(not(feature = "fetch"))]
                Some(_) => println!("Rebuild with the `fetch` feature to enable HTTP loading."),
                None => println!("Usage: fetch <url>"),
            },
            "save" => {
                let format_s = parts.next();
                let path_s = parts.next();
                match (format_s, path_s) {
                    (Some(format), Some(path)) => {
                        let saved = match format {
                            "json" => save_roster_to_json(&roster, path),
                            "csv" => save_roster_to_csv(&roster, path),
                            _ => {
                                println!("Usage: save <json|csv> <path>");
                                continue;
                            }
                        };
                        match saved {
                            Ok(_) => println!("Roster saved to {path}."),
                            Err(e) => println!("Error saving roster: {}", e),
                        }
                    }
                    _ => println!("Usage: save <json|csv> <path>"),
                }
            }
            "meta" => match parts.next() {
                Some("show") => print_metadata(&roster),
                Some("name") => {
                    let rest: Vec<&str> = parts.collect();
                    if rest.is_empty() {
                        println!("Usage: meta name <text...>");
                    } else {
                        roster.set_team_name(rest.join(" "));
                        println!("Team name updated.");
                    }
                }
                Some("desc") => {
                    let rest: Vec<&str> = parts.collect();
                    if rest.is_empty() {
                        println!("Usage: meta desc <text...>");
                    } else {
                        roster.set_description(rest.join(" "));
                        println!("Description updated.");
                    }
                }
                _ => println!("Usage: meta show|name|desc"),
            },
            other => {
                println!("Unknown command '{other}'. Type 'help' for commands.");
            }
        }
    }
}
