//! Response schema variants
//!
//! The vendor has changed the shape of its page-rendering responses between
//! API versions: older versions nest selling units two levels deep and use
//! `selling_unit`, newer ones go one level deeper and use `sellingUnit`.

use serde::{Deserialize, Serialize};

/// First API version that renders pages with the current shape
const CURRENT_SCHEMA_SINCE: u32 = 17;

/// Named shape of undocumented page-rendering responses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseSchema {
    /// API versions before 17
    Legacy,
    /// API version 17 and later
    Current,
}

impl ResponseSchema {
    /// Pick the schema for a configured API version
    ///
    /// Non-numeric versions are assumed to be current.
    #[must_use]
    pub fn for_api_version(version: &str) -> Self {
        match version.trim().parse::<u32>() {
            Ok(v) if v < CURRENT_SCHEMA_SINCE => Self::Legacy,
            _ => Self::Current,
        }
    }

    /// Field names under `content` that hold a selling unit, most likely first
    #[must_use]
    pub fn selling_unit_fields(self) -> &'static [&'static str] {
        match self {
            Self::Legacy => &["selling_unit", "sellingUnit"],
            Self::Current => &["sellingUnit", "selling_unit"],
        }
    }

    /// How many levels below the root the traversal descends
    #[must_use]
    pub fn max_depth(self) -> usize {
        match self {
            Self::Legacy => 2,
            Self::Current => 3,
        }
    }
}

impl Default for ResponseSchema {
    fn default() -> Self {
        Self::Current
    }
}
