use crate::error::AppError;
use time::format_description::FormatItem;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime, UtcOffset};

const DATE_FORMAT: &[FormatItem<'static>] = format_description!("[year]-[month]-[day]");
const TODAY_ENV_VAR: &str = "MINDSYNC_TODAY";

pub fn parse_date(raw: &str) -> Result<Date, AppError> {
    let trimmed = raw.trim();
    Date::parse(trimmed, DATE_FORMAT)
        .map_err(|_| AppError::invalid_input(format!("date must be YYYY-MM-DD, got '{trimmed}'")))
}

/// `YYYY-MM-DD` key used for per-day records.
pub fn date_key(date: Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}

/// The current local calendar day, or the day pinned by `MINDSYNC_TODAY`.
pub fn today() -> Result<Date, AppError> {
    if let Ok(value) = std::env::var(TODAY_ENV_VAR)
        && !value.trim().is_empty()
    {
        return parse_date(&value);
    }

    Ok(OffsetDateTime::now_utc().to_offset(local_offset()).date())
}

pub fn now_rfc3339() -> Result<String, AppError> {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .map_err(|err| AppError::invalid_data(err.to_string()))
}

fn local_offset() -> UtcOffset {
    UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC)
}

#[cfg(test)]
mod tests {
    use super::{date_key, parse_date};
    use time::macros::date;

    #[test]
    fn parse_and_format_calendar_dates() {
        let parsed = parse_date(" 2025-03-07 ").unwrap();
        assert_eq!(parsed, date!(2025 - 03 - 07));
        assert_eq!(date_key(parsed), "2025-03-07");
    }

    #[test]
    fn parse_date_rejects_timestamps() {
        let err = parse_date("2025-03-07T10:00:00Z").unwrap_err();
        assert_eq!(err.code(), "invalid_input");
    }
}
