//! The posting calendar: `posts/schedule.json`.

use indexmap::IndexMap;
use serde::Deserialize;

/// Week → day → post path (relative to the posts directory).
///
/// Loaded verbatim; order is preserved so listings match the file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct Schedule(pub IndexMap<String, IndexMap<String, String>>);

impl Schedule {
    /// Days for a week key, falling back to the `default` entry.
    pub fn week(&self, week: &str) -> Option<&IndexMap<String, String>> {
        self.0.get(week).or_else(|| self.0.get("default"))
    }

    /// Every scheduled entry in file order: `(week, day, path)`.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str, &str)> {
        self.0.iter().flat_map(|(week, days)| {
            days.iter()
                .map(move |(day, path)| (week.as_str(), day.as_str(), path.as_str()))
        })
    }
}
