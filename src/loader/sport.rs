use std::fmt;

/// Sports that have a published projection file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sport {
    Nba,
    Nfl,
    Nhl,
}

impl Sport {
    /// Exact, case-sensitive match on the host's sport code.
    pub fn from_code(code: &str) -> Option<Sport> {
        match code {
            "nba" => Some(Sport::Nba),
            "nfl" => Some(Sport::Nfl),
            "nhl" => Some(Sport::Nhl),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Sport::Nba => "nba",
            Sport::Nfl => "nfl",
            Sport::Nhl => "nhl",
        }
    }

    /// Logical file name under the store's `data/` directory.
    pub fn data_file(&self) -> &'static str {
        match self {
            Sport::Nba => "rotogrinders_nba.json",
            Sport::Nfl => "rotogrinders_nfl.json",
            Sport::Nhl => "rotogrinders_nhl.json",
        }
    }
}

impl fmt::Display for Sport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
