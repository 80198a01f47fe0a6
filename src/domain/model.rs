use crate::utils::error::FieldError;
use crate::utils::validation::{
    validate_max_chars, validate_non_empty_string, validate_range, validate_single_line,
};
use std::fmt;

/// Most boats the marina can hold at once.
pub const MAX_BOATS: usize = 120;
pub const MAX_NAME_LENGTH: usize = 127;
pub const MAX_TRAILER_TAG_LENGTH: usize = 9;

pub const MIN_LENGTH: u32 = 1;
pub const MAX_LENGTH: u32 = 100;
pub const MIN_SLIP: u32 = 1;
pub const MAX_SLIP: u32 = 85;
pub const MIN_STORAGE: u32 = 1;
pub const MAX_STORAGE: u32 = 50;
pub const MIN_BAY: char = 'A';
pub const MAX_BAY: char = 'Z';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LocationKind {
    Slip,
    Land,
    Trailer,
    Storage,
}

impl LocationKind {
    pub const ALL: [LocationKind; 4] = [
        LocationKind::Slip,
        LocationKind::Land,
        LocationKind::Trailer,
        LocationKind::Storage,
    ];

    /// Name used in the data file. Trailers are spelled `trailor` on disk.
    pub fn as_str(&self) -> &'static str {
        match self {
            LocationKind::Slip => "slip",
            LocationKind::Land => "land",
            LocationKind::Trailer => "trailor",
            LocationKind::Storage => "storage",
        }
    }

    /// Case-insensitive lookup of a data-file kind name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for LocationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a boat is kept, with the detail that belongs to that kind of place.
#[derive(Debug, Clone, PartialEq)]
pub enum Location {
    Slip(u32),
    Land(char),
    Trailer(String),
    Storage(u32),
}

impl Location {
    /// Builds a trailer location, keeping at most nine characters of the tag.
    pub fn trailer(tag: &str) -> Self {
        Location::Trailer(tag.chars().take(MAX_TRAILER_TAG_LENGTH).collect())
    }

    pub fn kind(&self) -> LocationKind {
        match self {
            Location::Slip(_) => LocationKind::Slip,
            Location::Land(_) => LocationKind::Land,
            Location::Trailer(_) => LocationKind::Trailer,
            Location::Storage(_) => LocationKind::Storage,
        }
    }

    /// The detail as it appears in the info column of the data file.
    pub fn info(&self) -> String {
        match self {
            Location::Slip(number) | Location::Storage(number) => number.to_string(),
            Location::Land(bay) => bay.to_string(),
            Location::Trailer(tag) => tag.clone(),
        }
    }

    pub fn validate(&self) -> Result<(), FieldError> {
        match self {
            Location::Slip(number) => validate_range("slip number", *number, MIN_SLIP, MAX_SLIP),
            Location::Land(bay) => validate_range("bay letter", *bay, MIN_BAY, MAX_BAY),
            Location::Trailer(tag) => {
                validate_non_empty_string("trailer tag", tag)?;
                validate_single_line("trailer tag", tag)?;
                validate_max_chars("trailer tag", tag, MAX_TRAILER_TAG_LENGTH)
            }
            Location::Storage(number) => {
                validate_range("storage number", *number, MIN_STORAGE, MAX_STORAGE)
            }
        }
    }
}

/// Monthly charge in dollars per foot of boat length, by kind of place.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateTable {
    pub slip: f64,
    pub land: f64,
    pub trailer: f64,
    pub storage: f64,
}

impl RateTable {
    pub fn rate(&self, kind: LocationKind) -> f64 {
        match kind {
            LocationKind::Slip => self.slip,
            LocationKind::Land => self.land,
            LocationKind::Trailer => self.trailer,
            LocationKind::Storage => self.storage,
        }
    }
}

impl Default for RateTable {
    fn default() -> Self {
        Self {
            slip: 12.50,
            land: 14.00,
            trailer: 25.00,
            storage: 11.20,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoatRecord {
    pub name: String,
    /// Length in feet.
    pub length: u32,
    pub location: Location,
    pub amount_owed: f64,
}

impl BoatRecord {
    pub fn new(
        name: impl Into<String>,
        length: u32,
        location: Location,
        amount_owed: f64,
    ) -> Result<Self, FieldError> {
        let record = Self {
            name: name.into(),
            length,
            location,
            amount_owed,
        };
        record.validate()?;
        Ok(record)
    }

    /// Checks every bounded field. The owed amount is deliberately unbounded.
    pub fn validate(&self) -> Result<(), FieldError> {
        validate_non_empty_string("name", &self.name)?;
        validate_single_line("name", &self.name)?;
        validate_max_chars("name", &self.name, MAX_NAME_LENGTH)?;
        validate_range("length", self.length, MIN_LENGTH, MAX_LENGTH)?;
        self.location.validate()
    }

    pub fn kind(&self) -> LocationKind {
        self.location.kind()
    }
}

/// One row of the inventory listing.
impl fmt::Display for BoatRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<20} {:>3}' ", self.name, self.length)?;
        match &self.location {
            Location::Slip(number) => write!(f, "   slip   # {:>2}   ", number)?,
            Location::Land(bay) => write!(f, "   land      {}   ", bay)?,
            Location::Trailer(tag) => write!(f, "trailor {}   ", tag)?,
            Location::Storage(number) => write!(f, "storage # {:>2}   ", number)?,
        }
        write!(f, "Owes ${:>8.2}", self.amount_owed)
    }
}
