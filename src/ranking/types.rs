use crate::domain::{Mode, RatingRecord};

/// Display string the profile page uses for a mode with no games.
pub const UNRATED: &str = "Unrated";

/// One marker per compared user; the marker set bounds the batch size.
pub const MAX_COMPARED_USERS: usize = Marker::ALL.len();

/// Sort key for a displayed rating value. "Unrated" and anything else
/// that is not an integer ranks below every real rating.
pub fn rating_sort_key(value: &str) -> i64 {
    value.trim().parse().unwrap_or(-1)
}

/// Pawn markers handed out to compared users, in hand-out order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Red,
    Blue,
    Yellow,
    Green,
    Orange,
}

impl Marker {
    pub const ALL: [Marker; 5] = [
        Marker::Red,
        Marker::Blue,
        Marker::Yellow,
        Marker::Green,
        Marker::Orange,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Marker::Red => "red",
            Marker::Blue => "blue",
            Marker::Yellow => "yellow",
            Marker::Green => "green",
            Marker::Orange => "orange",
        }
    }
}

/// Marker ownership for one comparison request. Assignment order is
/// processing order; nothing carries over between requests.
#[derive(Debug, Default)]
pub struct MarkerAssignment {
    entries: Vec<(String, Marker)>,
}

impl MarkerAssignment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hands the next free marker to `username`. Returns None when the
    /// user already holds one or the set is exhausted.
    pub fn assign(&mut self, username: &str) -> Option<Marker> {
        if self.marker_for(username).is_some() {
            return None;
        }
        let marker = *Marker::ALL.get(self.entries.len())?;
        self.entries.push((username.to_string(), marker));
        Some(marker)
    }

    pub fn marker_for(&self, username: &str) -> Option<Marker> {
        self.entries
            .iter()
            .find(|(name, _)| name == username)
            .map(|(_, marker)| *marker)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Marker)> {
        self.entries.iter().map(|(name, marker)| (name.as_str(), *marker))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Per-mode columns of (username, value), in processing order. A user
/// appears under a mode only if their record held a value there.
#[derive(Debug)]
pub struct ComparisonTable {
    columns: Vec<(Mode, Vec<(String, String)>)>,
}

impl Default for ComparisonTable {
    fn default() -> Self {
        Self::new()
    }
}

impl ComparisonTable {
    pub fn new() -> Self {
        Self {
            columns: Mode::ALL.into_iter().map(|mode| (mode, Vec::new())).collect(),
        }
    }

    pub fn add_user(&mut self, username: &str, ratings: &RatingRecord) {
        for (mode, column) in &mut self.columns {
            if let Some(value) = ratings.get(*mode) {
                column.push((username.to_string(), value.to_string()));
            }
        }
    }

    pub fn column(&self, mode: Mode) -> &[(String, String)] {
        self.columns
            .iter()
            .find(|(entry_mode, _)| *entry_mode == mode)
            .map(|(_, column)| column.as_slice())
            .unwrap_or(&[])
    }

    /// Sorts one mode's column, best rating first. The sort is stable,
    /// so equal ratings keep processing order.
    pub fn ranked(&self, mode: Mode) -> RankedModeEntry {
        let mut entries = self.column(mode).to_vec();
        entries.sort_by_key(|(_, value)| std::cmp::Reverse(rating_sort_key(value)));
        RankedModeEntry { mode, entries }
    }

    /// Rankings for every mode that has something to show, in display
    /// order. Modes whose shown sequence is empty are left out.
    pub fn rankings(&self) -> Vec<RankedModeEntry> {
        Mode::ALL
            .into_iter()
            .map(|mode| self.ranked(mode))
            .filter(|entry| !entry.shown().is_empty())
            .collect()
    }
}

/// One mode's sorted (username, value) sequence. Built on demand from
/// the table; never stored.
#[derive(Debug)]
pub struct RankedModeEntry {
    pub mode: Mode,
    entries: Vec<(String, String)>,
}

impl RankedModeEntry {
    /// The displayed prefix: everything up to the first "Unrated".
    /// Entries sorted behind that gap stay hidden even when present.
    pub fn shown(&self) -> &[(String, String)] {
        let cut = self
            .entries
            .iter()
            .position(|(_, value)| value == UNRATED)
            .unwrap_or(self.entries.len());
        &self.entries[..cut]
    }

    #[cfg(test)]
    fn all(&self) -> &[(String, String)] {
        &self.entries
    }
}
