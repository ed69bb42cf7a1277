use super::PersistenceResult;
use crate::Roster;

/// Fetch the conventional `employees.json` resource over HTTP and parse it.
/// Any network or HTTP-status failure aborts the load; there is no retry.
pub fn fetch_roster_from_url(url: &str) -> PersistenceResult<Roster> {
    let body = reqwest::blocking::get(url)?.error_for_status()?.text()?;
    match super::file::load_roster_from_str(&body) {
        Ok(roster) => Ok(roster),
        Err(err) => {
            tracing::error!(url, error = %err, "failed to load roster from url");
            Err(err)
        }
    }
}
