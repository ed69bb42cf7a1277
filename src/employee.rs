use chrono::{Duration, NaiveDate};
use polars::prelude::PlSmallStr;
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// One staff member from the loaded dataset. Immutable once loaded; the board
/// layer never writes back into employee records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub name: String,
    pub days_off: Vec<NaiveDate>,
    pub accounts: Vec<String>,
    pub everyday: bool,
}

impl Employee {
    pub fn new(name: impl Into<String>, everyday: bool) -> Self {
        Self {
            name: name.into(),
            days_off: Vec::new(),
            accounts: Vec::new(),
            everyday,
        }
    }

    /// True if this employee is off on the given date and therefore not
    /// selectable for coverage that day.
    pub fn is_off(&self, date: NaiveDate) -> bool {
        self.days_off.contains(&date)
    }

    pub fn covers(&self, account: &str) -> bool {
        self.accounts.iter().any(|a| a == account)
    }

    pub fn to_dataframe_row(&self) -> PolarsResult<DataFrame> {
        let mut columns: Vec<Column> = Vec::with_capacity(4);

        let name_data: [&str; 1] = [self.name.as_str()];
        columns.push(Series::new(PlSmallStr::from_static("name"), name_data).into_column());

        columns.push(Self::series_from_date_list("days_off", &self.days_off)?.into_column());
        columns.push(Self::series_from_string_list("accounts", &self.accounts).into_column());

        let everyday_data: [bool; 1] = [self.everyday];
        columns.push(Series::new(PlSmallStr::from_static("everyday"), everyday_data).into_column());

        DataFrame::new(columns)
    }

    pub fn from_dataframe_row(df: &DataFrame, row_idx: usize) -> PolarsResult<Self> {
        let name = df
            .column("name")?
            .str()?
            .get(row_idx)
            .ok_or_else(|| PolarsError::ComputeError("employee row missing name".into()))?
            .to_string();

        let days_off = Self::vec_from_date_list(df.column("days_off")?.list()?, row_idx)?;
        let accounts = Self::vec_from_string_list(df.column("accounts")?.list()?, row_idx)?;
        let everyday = df
            .column("everyday")?
            .bool()?
            .get(row_idx)
            .unwrap_or(false);

        Ok(Self {
            name,
            days_off,
            accounts,
            everyday,
        })
    }

    fn series_from_date_list(name: &str, dates: &[NaiveDate]) -> PolarsResult<Series> {
        let days: Vec<i32> = dates.iter().map(|d| Self::date_to_i32(*d)).collect();
        let inner = Series::new(PlSmallStr::from_static(""), days).cast(&DataType::Date)?;
        // Re-cast the wrapping list so the column keeps the logical Date
        // dtype instead of the physical i32 representation.
        Series::new(name.into(), &[inner]).cast(&DataType::List(Box::new(DataType::Date)))
    }

    fn series_from_string_list(name: &str, values: &[String]) -> Series {
        let inner_values: Vec<&str> = values.iter().map(|s| s.as_str()).collect();
        let inner = Series::new(PlSmallStr::from_static(""), inner_values);
        Series::new(name.into(), &[inner])
    }

    fn vec_from_date_list(list: &ListChunked, row_idx: usize) -> PolarsResult<Vec<NaiveDate>> {
        if let Some(series) = list.get_as_series(row_idx) {
            // `get_as_series` yields the physical i32 representation; cast
            // back to the logical Date dtype before decoding.
            let series = series.cast(&DataType::Date)?;
            let dates = series.date()?;
            let mut out = Vec::with_capacity(dates.len());
            for idx in 0..dates.len() {
                if let Some(days) = dates.get(idx) {
                    out.push(Self::date_from_i32(days));
                }
            }
            Ok(out)
        } else {
            Ok(Vec::new())
        }
    }

    fn vec_from_string_list(list: &ListChunked, row_idx: usize) -> PolarsResult<Vec<String>> {
        if let Some(series) = list.get_as_series(row_idx) {
            Ok(series
                .str()?
                .into_iter()
                .flatten()
                .map(ToOwned::to_owned)
                .collect::<Vec<_>>())
        } else {
            Ok(Vec::new())
        }
    }

    fn date_to_i32(date: NaiveDate) -> i32 {
        let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
        (date - epoch).num_days() as i32
    }

    fn date_from_i32(days: i32) -> NaiveDate {
        let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
        epoch + Duration::days(days as i64)
    }
}
