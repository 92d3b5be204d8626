//! Record normalization
//!
//! Turns the loosely typed meeting and format records returned by the
//! meeting-list service into [`Meeting`] and [`Format`] values. Any missing
//! or malformed required field rejects the record; nothing is silently dropped.

use crate::types::{BookletError, HeaderField, Result, ValidationError};
use chrono::{NaiveTime, TimeDelta, Timelike};
use serde_json::Value;

/// One record as delivered by the data service: field name to JSON value
pub type RawRecord = serde_json::Map<String, Value>;

/// Canonical weekday names, Sunday = 1 through Saturday = 7
pub const WEEKDAYS: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Header shown for meetings missing the grouping field
pub const UNGROUPED_LABEL: &str = "Other";

/// Name for a 1-based weekday number
pub fn weekday_name(weekday: u8) -> Option<&'static str> {
    WEEKDAYS.get(usize::from(weekday).checked_sub(1)?).copied()
}

#[derive(Debug, Clone, PartialEq)]
pub struct Meeting {
    pub name: String,
    pub start_time: NaiveTime,
    pub duration: TimeDelta,
    /// 1 = Sunday .. 7 = Saturday
    pub weekday: u8,
    pub facility: Option<String>,
    pub street: Option<String>,
    pub city: Option<String>,
    pub province: Option<String>,
    pub postal_code: Option<String>,
    pub nation: Option<String>,
    /// Comma separated format codes, e.g. "O,WC,BT"
    pub formats: String,
    pub format_ids: Vec<i64>,
}

impl Meeting {
    pub fn from_record(record: &RawRecord) -> std::result::Result<Self, ValidationError> {
        Ok(Self {
            name: required_str(record, "meeting_name")?,
            start_time: time_field(record, "start_time")?,
            duration: duration_field(record, "duration_time")?,
            weekday: weekday_field(record, "weekday_tinyint")?,
            facility: optional_str(record, "location_text")?,
            street: optional_str(record, "location_street")?,
            city: optional_str(record, "location_municipality")?,
            province: optional_str(record, "location_province")?,
            postal_code: optional_str(record, "location_postal_code_1")?,
            nation: match optional_str(record, "location_nation")? {
                Some(nation) => Some(nation),
                None => optional_str(record, "nation")?,
            },
            formats: optional_str(record, "formats")?.unwrap_or_default(),
            format_ids: int_list_field(record, "format_shared_id_list")?,
        })
    }

    /// Facility, street, city, province and postal code joined with ", "
    pub fn location(&self) -> String {
        [
            &self.facility,
            &self.street,
            &self.city,
            &self.province,
            &self.postal_code,
        ]
        .into_iter()
        .filter_map(|part| part.as_deref())
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
    }

    /// The text a section header shows for this meeting under `field`
    pub fn group_label(&self, field: HeaderField) -> String {
        let label = match field {
            HeaderField::Weekday => weekday_name(self.weekday).map(str::to_string),
            HeaderField::City => self.city.clone(),
        };
        label.unwrap_or_else(|| UNGROUPED_LABEL.to_string())
    }

    /// 12-hour clock, e.g. `7:30PM`; midnight is `12:00AM`
    pub fn display_start_time(&self) -> String {
        let (pm, hour) = self.start_time.hour12();
        format!(
            "{}:{:02}{}",
            hour,
            self.start_time.minute(),
            if pm { "PM" } else { "AM" }
        )
    }

    /// Decimal hours with one place, e.g. `1.5HR`
    pub fn display_duration(&self) -> String {
        format!("{:.1}HR", self.duration.num_minutes() as f64 / 60.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Format {
    pub id: i64,
    pub key: String,
    pub name: String,
    pub description: Option<String>,
}

impl Format {
    pub fn from_record(record: &RawRecord) -> std::result::Result<Self, ValidationError> {
        let id = required_str(record, "id")?;
        Ok(Self {
            id: parse_int("id", &id)?,
            key: required_str(record, "key_string")?,
            name: required_str(record, "name_string")?,
            description: match optional_str(record, "description_string")? {
                Some(description) => Some(description),
                None => optional_str(record, "description")?,
            },
        })
    }

    /// Empty cell used to even out the legend table
    pub(crate) fn blank() -> Self {
        Self {
            id: -1,
            key: String::new(),
            name: String::new(),
            description: None,
        }
    }
}

/// Normalize every meeting record, failing on the first invalid one
pub fn normalize_meetings(records: &[RawRecord]) -> Result<Vec<Meeting>> {
    records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            Meeting::from_record(record).map_err(|e| {
                log::debug!("meeting record {} rejected: {}", index, e);
                BookletError::Validation(e)
            })
        })
        .collect()
}

/// Normalize format records, ordered by key with duplicate keys removed
pub fn normalize_formats(records: &[RawRecord]) -> Result<Vec<Format>> {
    let mut formats = records
        .iter()
        .map(Format::from_record)
        .collect::<std::result::Result<Vec<_>, _>>()?;
    formats.sort_by(|a, b| a.key.cmp(&b.key));
    formats.dedup_by(|a, b| a.key == b.key);
    Ok(formats)
}

// =============================================================================
// Field coercion
// =============================================================================

fn replace_curly_quotes(s: &str) -> String {
    s.replace(['\u{2018}', '\u{2019}'], "'")
}

/// Field as text: strings pass through, numbers become their decimal form
fn field_text(
    record: &RawRecord,
    key: &str,
) -> std::result::Result<Option<String>, ValidationError> {
    match record.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(replace_curly_quotes(s))),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(ValidationError::new(
            key,
            format!("expected text, found {}", other),
        )),
    }
}

fn required_str(record: &RawRecord, key: &str) -> std::result::Result<String, ValidationError> {
    if !record.contains_key(key) {
        return Err(ValidationError::new(key, "missing required field"));
    }
    match field_text(record, key)? {
        Some(value) if !value.trim().is_empty() => Ok(value.trim().to_string()),
        _ => Err(ValidationError::new(key, "required value is empty")),
    }
}

fn optional_str(
    record: &RawRecord,
    key: &str,
) -> std::result::Result<Option<String>, ValidationError> {
    Ok(field_text(record, key)?
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty()))
}

fn parse_int(key: &str, value: &str) -> std::result::Result<i64, ValidationError> {
    value
        .trim()
        .parse()
        .map_err(|_| ValidationError::new(key, format!("'{}' is not a number", value)))
}

fn weekday_field(record: &RawRecord, key: &str) -> std::result::Result<u8, ValidationError> {
    let value = parse_int(key, &required_str(record, key)?)?;
    match u8::try_from(value) {
        Ok(day @ 1..=7) => Ok(day),
        _ => Err(ValidationError::new(
            key,
            format!("{} is not a weekday between 1 and 7", value),
        )),
    }
}

fn int_list_field(record: &RawRecord, key: &str) -> std::result::Result<Vec<i64>, ValidationError> {
    match optional_str(record, key)? {
        None => Ok(Vec::new()),
        Some(list) => list.split(',').map(|id| parse_int(key, id)).collect(),
    }
}

/// Split `H:MM` or `H:MM:SS` into numeric parts
fn clock_parts(value: &str) -> Option<(u32, u32, u32)> {
    let parts = value
        .split(':')
        .map(|p| p.trim().parse::<u32>().ok())
        .collect::<Option<Vec<_>>>()?;
    match parts.as_slice() {
        [h, m] if *m < 60 => Some((*h, *m, 0)),
        [h, m, s] if *m < 60 && *s < 60 => Some((*h, *m, *s)),
        _ => None,
    }
}

/// `H:MM`, `H:MM:SS`, or a bare count of minutes since midnight
pub fn parse_time(value: &str) -> Option<NaiveTime> {
    let value = value.trim();
    if value.contains(':') {
        let (h, m, s) = clock_parts(value)?;
        NaiveTime::from_hms_opt(h, m, s)
    } else {
        let minutes: u32 = value.parse().ok()?;
        NaiveTime::from_hms_opt(minutes / 60, minutes % 60, 0)
    }
}

/// `H:MM`, `H:MM:SS`, or a bare count of minutes
pub fn parse_duration(value: &str) -> Option<TimeDelta> {
    let value = value.trim();
    if value.contains(':') {
        let (h, m, s) = clock_parts(value)?;
        Some(
            TimeDelta::hours(h.into()) + TimeDelta::minutes(m.into()) + TimeDelta::seconds(s.into()),
        )
    } else {
        let minutes: u32 = value.parse().ok()?;
        Some(TimeDelta::minutes(minutes.into()))
    }
}

fn time_field(record: &RawRecord, key: &str) -> std::result::Result<NaiveTime, ValidationError> {
    let value = required_str(record, key)?;
    parse_time(&value).ok_or_else(|| {
        ValidationError::new(
            key,
            format!("'{}' is neither H:MM nor minutes since midnight", value),
        )
    })
}

fn duration_field(record: &RawRecord, key: &str) -> std::result::Result<TimeDelta, ValidationError> {
    let value = required_str(record, key)?;
    parse_duration(&value).ok_or_else(|| {
        ValidationError::new(key, format!("'{}' is neither H:MM nor minutes", value))
    })
}
