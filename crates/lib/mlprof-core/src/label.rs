use std::fmt::Display;

use serde::Deserialize;

const DISPLAY_SEPARATOR: &str = ", ";
const FILE_SEPARATOR: &str = "_";

/// Name of a measurement series.
///
/// A series is named either by a single identifier or by an ordered list of
/// identifiers (for example framework and device). Lists are joined with
/// `", "` for the legend and with `"_"` wherever a file system friendly key
/// is needed.
#[derive(Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(untagged)]
pub enum SeriesLabel {
    Single(String),
    Composite(Vec<String>),
}

impl SeriesLabel {
    pub fn display_name(&self) -> String {
        match self {
            SeriesLabel::Single(name) => name.clone(),
            SeriesLabel::Composite(parts) => parts.join(DISPLAY_SEPARATOR),
        }
    }

    pub fn file_stem(&self) -> String {
        match self {
            SeriesLabel::Single(name) => name.clone(),
            SeriesLabel::Composite(parts) => parts.join(FILE_SEPARATOR),
        }
    }
}

impl Display for SeriesLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl From<&str> for SeriesLabel {
    fn from(name: &str) -> Self {
        Self::Single(name.to_string())
    }
}

impl From<Vec<&str>> for SeriesLabel {
    fn from(parts: Vec<&str>) -> Self {
        Self::Composite(parts.into_iter().map(str::to_string).collect())
    }
}
