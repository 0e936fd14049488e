use chrono::{DateTime, NaiveDate, NaiveDateTime};

const FULL: &str = "%Y-%m-%d %H:%M";
const SHORT: &str = "%Y-%m-%d";

fn parse(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.naive_local()))
        .or_else(|| {
            NaiveDate::parse_from_str(raw, SHORT)
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

/// `2025-11-17 10:30`; нераспознанная строка возвращается как есть.
pub fn format_date(raw: &str) -> String {
    parse(raw).map_or_else(|| raw.to_string(), |dt| dt.format(FULL).to_string())
}

/// `2025-11-17`; нераспознанная строка возвращается как есть.
pub fn format_date_short(raw: &str) -> String {
    parse(raw).map_or_else(|| raw.to_string(), |dt| dt.format(SHORT).to_string())
}

/// Отметка времени модели в полном формате.
pub fn format_timestamp(value: &NaiveDateTime) -> String {
    value.format(FULL).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_wire_timestamps() {
        assert_eq!(format_date("2025-11-17T10:30:59.123"), "2025-11-17 10:30");
        assert_eq!(format_date("2025-11-17T10:30:00"), "2025-11-17 10:30");
        assert_eq!(format_date_short("2025-11-17T10:30:00"), "2025-11-17");
        assert_eq!(format_date("2025-11-17T10:30:00+03:00"), "2025-11-17 10:30");
    }

    #[test]
    fn unknown_input_is_returned_verbatim() {
        assert_eq!(format_date("yesterday"), "yesterday");
        assert_eq!(format_date_short(""), "");
    }
}
