use crate::domain::model::BoatRecord;
use std::cmp::Ordering;

/// ASCII case-insensitive name equality.
pub fn names_equal(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b)
}

/// ASCII case-insensitive lexicographic ordering of two names.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    a.bytes()
        .map(|byte| byte.to_ascii_lowercase())
        .cmp(b.bytes().map(|byte| byte.to_ascii_lowercase()))
}

/// Index of the first boat whose name matches, ignoring case.
pub fn find_by_name(boats: &[BoatRecord], name: &str) -> Option<usize> {
    boats.iter().position(|boat| names_equal(&boat.name, name))
}

pub fn sort_boats(boats: &mut [BoatRecord]) {
    boats.sort_by(|a, b| compare_names(&a.name, &b.name));
}

pub fn is_sorted(boats: &[BoatRecord]) -> bool {
    boats
        .windows(2)
        .all(|pair| compare_names(&pair[0].name, &pair[1].name) != Ordering::Greater)
}
