use anyhow::Context;
use chrono::{DateTime, NaiveDate, Utc};

/// Parses a user-supplied as-of time: RFC 3339, or a bare `YYYY-MM-DD` meaning
/// midnight UTC of that day. `None` yields `now_utc`.
pub fn resolve_as_of(arg: Option<&str>, now_utc: DateTime<Utc>) -> anyhow::Result<DateTime<Utc>> {
    let Some(s) = arg.map(str::trim) else {
        return Ok(now_utc);
    };

    if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
        return Ok(ts.with_timezone(&Utc));
    }

    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("as-of must be RFC 3339 or YYYY-MM-DD (got {s:?})"))?;
    let midnight = date.and_hms_opt(0, 0, 0).context("invalid midnight")?;
    Ok(midnight.and_utc())
}
