use chrono::{Datelike, Duration, NaiveDate};

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Expand a single period token into its (first, last) day.
fn period_bounds(p: &str) -> Result<(NaiveDate, NaiveDate), String> {
    // YYYY-MM-DD
    if let Ok(d) = NaiveDate::parse_from_str(p, "%Y-%m-%d") {
        return Ok((d, d));
    }

    // YYYY-MM
    if let Ok(first) = NaiveDate::parse_from_str(&format!("{p}-01"), "%Y-%m-%d") {
        let last = last_day_of_month(first.year(), first.month())
            .ok_or_else(|| format!("Invalid period: {}", p))?;
        return Ok((first, last));
    }

    // YYYY
    if p.len() == 4
        && let Ok(year) = p.parse::<i32>()
    {
        let first = NaiveDate::from_ymd_opt(year, 1, 1);
        let last = NaiveDate::from_ymd_opt(year, 12, 31);
        if let (Some(first), Some(last)) = (first, last) {
            return Ok((first, last));
        }
    }

    Err(format!("Invalid period: {}", p))
}

/// Parse a period filter into an inclusive date range.
///
/// Supported: `YYYY`, `YYYY-MM`, `YYYY-MM-DD` and `start:end` ranges of
/// those forms. `all` means no filtering and yields `None`.
pub fn parse_period(p: &str) -> Result<Option<(NaiveDate, NaiveDate)>, String> {
    let p = p.trim();
    if p.eq_ignore_ascii_case("all") {
        return Ok(None);
    }

    if let Some((start, end)) = p.split_once(':') {
        let (first, _) = period_bounds(start.trim())?;
        let (_, last) = period_bounds(end.trim())?;
        if last < first {
            return Err(format!("Invalid period: {} (end before start)", p));
        }
        return Ok(Some((first, last)));
    }

    period_bounds(p).map(Some)
}

pub fn current_month_bounds() -> (NaiveDate, NaiveDate) {
    let today = today();
    let first = today.with_day(1).unwrap_or(today);
    let last = last_day_of_month(today.year(), today.month()).unwrap_or(today);
    (first, last)
}

pub fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let (ny, nm) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(ny, nm, 1).map(|d| d - Duration::days(1))
}
