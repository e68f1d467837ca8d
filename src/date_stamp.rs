//! The date convention used to stamp new transactions and to find "today".
//!
//! Transactions store their date as a formatted string, and the daily limit
//! check compares those strings for equality. Both sides must therefore use
//! the same [DateStamp], otherwise today's expenses never match.

use time::{
    Date, OffsetDateTime,
    format_description::{self, OwnedFormatItem},
    macros::date,
};

use crate::{Error, timezone::get_local_offset};

/// The default date format, e.g. "10/19/2026" (month/day/year without padding).
pub const DEFAULT_DATE_FORMAT: &str = "[month padding:none]/[day padding:none]/[year]";

/// Formats dates in a fixed timezone and format.
#[derive(Debug, Clone)]
pub struct DateStamp {
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    local_timezone: String,
    format: OwnedFormatItem,
}

impl DateStamp {
    /// Create a new [DateStamp].
    ///
    /// `format` is a [time format description](https://time-rs.github.io/book/api/format-description.html)
    /// that must only use date components.
    ///
    /// # Errors
    /// Returns an [Error::InvalidTimezoneError] if `local_timezone` is not a
    /// canonical timezone name, or an [Error::InvalidDateFormat] if `format`
    /// cannot be parsed or cannot format a date.
    pub fn new(local_timezone: &str, format: &str) -> Result<Self, Error> {
        if get_local_offset(local_timezone).is_none() {
            return Err(Error::InvalidTimezoneError(local_timezone.to_owned()));
        }

        let format = format_description::parse_owned::<2>(format)
            .map_err(|error| Error::InvalidDateFormat(format!("{format:?}: {error}")))?;

        // Catch formats that ask for components a date does not have, e.g. "[hour]".
        date!(2000 - 01 - 01)
            .format(&format)
            .map_err(|error| Error::InvalidDateFormat(error.to_string()))?;

        Ok(Self {
            local_timezone: local_timezone.to_owned(),
            format,
        })
    }

    /// Today's date in the local timezone, formatted.
    ///
    /// # Errors
    /// Returns an [Error::InvalidTimezoneError] if the timezone can no longer
    /// be resolved.
    pub fn today(&self) -> Result<String, Error> {
        let local_offset = get_local_offset(&self.local_timezone)
            .ok_or_else(|| Error::InvalidTimezoneError(self.local_timezone.clone()))?;

        let today = OffsetDateTime::now_utc().to_offset(local_offset).date();

        self.format(today)
    }

    /// Format `date` with this stamp's format.
    pub fn format(&self, date: Date) -> Result<String, Error> {
        date.format(&self.format)
            .map_err(|error| Error::DateFormatError(error.to_string()))
    }
}
