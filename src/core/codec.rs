//! Line codec for the inventory file.
//!
//! Each record is one line of five comma-separated fields:
//! `name,length,kind,info,amount_owed`. There is no quoting, so a comma inside
//! a name or trailer tag cannot be represented. Line breaks inside a name or
//! tag are rejected when the record is built.

use crate::domain::model::{
    BoatRecord, Location, LocationKind, MAX_LENGTH, MAX_SLIP, MAX_STORAGE, MIN_LENGTH, MIN_SLIP,
    MIN_STORAGE,
};
use crate::utils::error::{FieldError, ParseError};
use crate::utils::validation::validate_range;

pub const FIELD_COUNT: usize = 5;

/// Parses one line of the data file (or one line typed at the add prompt).
pub fn parse_line(line: &str) -> Result<BoatRecord, ParseError> {
    let line = line.trim_end_matches(['\r', '\n']);
    parse_fields(line.split(','))
}

/// Builds a record from already-split fields, applying the same checks as
/// [`BoatRecord::new`].
pub fn parse_fields<'a, I>(fields: I) -> Result<BoatRecord, ParseError>
where
    I: IntoIterator<Item = &'a str>,
{
    let fields: Vec<&str> = fields.into_iter().collect();
    let [name, length, kind, info, amount] = fields[..] else {
        return Err(ParseError::malformed(format!(
            "expected {} fields, found {}",
            FIELD_COUNT,
            fields.len()
        )));
    };

    if name.is_empty() {
        return Err(ParseError::malformed("boat name is empty"));
    }

    let length: i64 = length
        .trim()
        .parse()
        .map_err(|_| ParseError::malformed(format!("length '{}' is not an integer", length)))?;
    validate_range("length", length, MIN_LENGTH as i64, MAX_LENGTH as i64)?;

    let kind = LocationKind::from_name(kind.trim())
        .ok_or_else(|| ParseError::malformed(format!("unknown place type '{}'", kind)))?;

    let location = parse_location(kind, info)?;

    let amount_owed: f64 = amount
        .trim()
        .parse()
        .map_err(|_| ParseError::malformed(format!("amount '{}' is not a number", amount)))?;
    if !amount_owed.is_finite() {
        return Err(ParseError::malformed(format!(
            "amount '{}' is not a finite number",
            amount
        )));
    }

    let record = BoatRecord::new(name, length as u32, location, amount_owed)?;
    Ok(record)
}

fn parse_location(kind: LocationKind, info: &str) -> Result<Location, ParseError> {
    let location = match kind {
        LocationKind::Slip => {
            let number = parse_number("slip number", info)?;
            validate_range("slip number", number, MIN_SLIP as i64, MAX_SLIP as i64)?;
            Location::Slip(number as u32)
        }
        LocationKind::Storage => {
            let number = parse_number("storage number", info)?;
            validate_range("storage number", number, MIN_STORAGE as i64, MAX_STORAGE as i64)?;
            Location::Storage(number as u32)
        }
        LocationKind::Land => {
            let bay = info
                .chars()
                .next()
                .ok_or_else(|| ParseError::malformed("bay letter is empty"))?;
            Location::Land(bay)
        }
        LocationKind::Trailer => {
            if info.is_empty() {
                return Err(ParseError::malformed("trailer tag is empty"));
            }
            Location::trailer(info)
        }
    };
    location.validate()?;
    Ok(location)
}

fn parse_number(field: &str, info: &str) -> Result<i64, FieldError> {
    info.trim()
        .parse()
        .map_err(|_| FieldError::new(field, info, "Must be an integer"))
}

/// The five data-file fields of a record, in column order.
pub fn to_fields(record: &BoatRecord) -> [String; FIELD_COUNT] {
    [
        record.name.clone(),
        record.length.to_string(),
        record.kind().as_str().to_string(),
        record.location.info(),
        format!("{:.2}", record.amount_owed),
    ]
}

/// Renders a record as one data-file line, without the line terminator.
pub fn format_line(record: &BoatRecord) -> String {
    to_fields(record).join(",")
}
