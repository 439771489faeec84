//! Strict parsing of `{id}` and `{id1-id2-...}` path segments.

use std::str::FromStr;

use platform_api::ApiError;

const SEPARATOR: char = '-';

/// Employee ids addressed by a delete path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IdSet {
    One(i32),
    /// Hyphen-separated list, duplicates removed, first-seen order kept.
    Many(Vec<i32>),
}

impl FromStr for IdSet {
    type Err = ApiError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        if !raw.contains(SEPARATOR) {
            return parse_id(raw).map(IdSet::One);
        }
        let mut ids = Vec::new();
        for segment in raw.split(SEPARATOR) {
            let id = parse_id(segment)?;
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
        Ok(IdSet::Many(ids))
    }
}

/// A single positive employee id.
pub fn parse_id(raw: &str) -> Result<i32, ApiError> {
    if raw.is_empty() {
        return Err(ApiError::invalid("empty id segment"));
    }
    match raw.parse::<i32>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(ApiError::invalid(format!(
            "`{raw}` is not a positive integer id"
        ))),
    }
}
