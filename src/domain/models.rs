use std::fmt;

/// The closed set of chess.com rating modes, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    Bullet,
    Blitz,
    Rapid,
    Daily,
    Puzzles,
    PuzzleRush,
    Live960,
    Daily960,
    Bughouse,
    Crazyhouse,
    ThreeCheck,
    KingOfTheHill,
}

impl Mode {
    pub const ALL: [Mode; 12] = [
        Mode::Bullet,
        Mode::Blitz,
        Mode::Rapid,
        Mode::Daily,
        Mode::Puzzles,
        Mode::PuzzleRush,
        Mode::Live960,
        Mode::Daily960,
        Mode::Bughouse,
        Mode::Crazyhouse,
        Mode::ThreeCheck,
        Mode::KingOfTheHill,
    ];

    /// Display label, exactly as the profile page prints it.
    pub fn label(self) -> &'static str {
        match self {
            Mode::Bullet => "Bullet",
            Mode::Blitz => "Blitz",
            Mode::Rapid => "Rapid",
            Mode::Daily => "Daily",
            Mode::Puzzles => "Puzzles",
            Mode::PuzzleRush => "Puzzle Rush",
            Mode::Live960 => "Live 960",
            Mode::Daily960 => "Daily 960",
            Mode::Bughouse => "Bughouse",
            Mode::Crazyhouse => "Crazyhouse",
            Mode::ThreeCheck => "3 Check",
            Mode::KingOfTheHill => "King of the Hill",
        }
    }

    /// Parse a page label back into a mode.
    pub fn from_label(label: &str) -> Option<Mode> {
        Mode::ALL.into_iter().find(|mode| mode.label() == label)
    }

    fn index(self) -> usize {
        Mode::ALL.iter().position(|&mode| mode == self).unwrap_or(0)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Per-mode ratings for one user. Every mode is structurally present;
/// modes the user has not played hold `None`. Values are the page's
/// display strings (numeric text or "Unrated").
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RatingRecord {
    values: [Option<String>; Mode::ALL.len()],
}

impl RatingRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, mode: Mode, value: impl Into<String>) {
        self.values[mode.index()] = Some(value.into());
    }

    pub fn get(&self, mode: Mode) -> Option<&str> {
        self.values[mode.index()].as_deref()
    }

    /// All modes in display order, rated or not.
    pub fn iter(&self) -> impl Iterator<Item = (Mode, Option<&str>)> {
        Mode::ALL.into_iter().map(|mode| (mode, self.get(mode)))
    }

    /// Only the modes with a value, in display order.
    pub fn rated(&self) -> impl Iterator<Item = (Mode, &str)> {
        self.iter().filter_map(|(mode, value)| Some((mode, value?)))
    }

    pub fn has_ratings(&self) -> bool {
        self.values.iter().any(Option::is_some)
    }
}

/// Sidebar activity lines (Games, Puzzles, Lessons), in page order.
/// Unlike `RatingRecord` there is no fixed superset: only labels the
/// page actually exposes appear here.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeneralActivityRecord {
    entries: Vec<(String, String)>,
}

impl GeneralActivityRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, label: impl Into<String>, value: impl Into<String>) {
        self.entries.push((label.into(), value.into()));
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(label, value)| (label.as_str(), value.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Everything one profile extraction yields.
#[derive(Debug, Clone)]
pub struct ProfileStats {
    /// Case-correct username as the platform stores it.
    pub username: String,
    pub avatar_url: String,
    pub ratings: RatingRecord,
    pub activity: GeneralActivityRecord,
}
