use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DayType {
    #[default]
    All,
    Weekday,
    Holiday,
}

impl DayType {
    pub const ALL: [Self; 3] = [Self::All, Self::Weekday, Self::Holiday];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Weekday => "weekday",
            Self::Holiday => "holiday",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "all" => Some(Self::All),
            "weekday" => Some(Self::Weekday),
            "holiday" => Some(Self::Holiday),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "Whole period",
            Self::Weekday => "Weekdays",
            Self::Holiday => "Weekends & holidays",
        }
    }

    pub const fn cycle_next(self) -> Self {
        match self {
            Self::All => Self::Weekday,
            Self::Weekday => Self::Holiday,
            Self::Holiday => Self::All,
        }
    }

    pub const fn cycle_prev(self) -> Self {
        match self {
            Self::All => Self::Holiday,
            Self::Weekday => Self::All,
            Self::Holiday => Self::Weekday,
        }
    }

    /// Whether a calendar day passes this day-type filter. Saturday and Sunday
    /// count as holidays.
    pub fn admits(self, weekday: chrono::Weekday) -> bool {
        let weekend = matches!(weekday, chrono::Weekday::Sat | chrono::Weekday::Sun);
        match self {
            Self::All => true,
            Self::Weekday => !weekend,
            Self::Holiday => weekend,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ModeFamily {
    Spatial,
    Statistical,
}

impl ModeFamily {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Spatial => "spatial",
            Self::Statistical => "statistical",
        }
    }

    pub const fn index(self) -> usize {
        match self {
            Self::Spatial => 0,
            Self::Statistical => 1,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Spatial => "Maps",
            Self::Statistical => "Charts",
        }
    }

    pub const fn other(self) -> Self {
        match self {
            Self::Spatial => Self::Statistical,
            Self::Statistical => Self::Spatial,
        }
    }
}
