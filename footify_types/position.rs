use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Playing role on the pitch.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Position {
    Goalkeeper,
    RightBack,
    LeftBack,
    CenterBack,
    CentralDefensiveMidfielder,
    RightMidfielder,
    LeftMidfielder,
    CentralMidfielder,
    CentralAttackingMidfielder,
    RightWinger,
    LeftWinger,
    #[default]
    CenterForward,
    Striker,
}

impl Position {
    pub const ALL: [Position; 13] = [
        Position::Goalkeeper,
        Position::RightBack,
        Position::LeftBack,
        Position::CenterBack,
        Position::CentralDefensiveMidfielder,
        Position::RightMidfielder,
        Position::LeftMidfielder,
        Position::CentralMidfielder,
        Position::CentralAttackingMidfielder,
        Position::RightWinger,
        Position::LeftWinger,
        Position::CenterForward,
        Position::Striker,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            Position::Goalkeeper => "Goalkeeper",
            Position::RightBack => "Right Back",
            Position::LeftBack => "Left Back",
            Position::CenterBack => "Center Back",
            Position::CentralDefensiveMidfielder => "Central Defensive Midfielder",
            Position::RightMidfielder => "Right Midfielder",
            Position::LeftMidfielder => "Left Midfielder",
            Position::CentralMidfielder => "Central Midfielder",
            Position::CentralAttackingMidfielder => "Central Attacking Midfielder",
            Position::RightWinger => "Right Winger",
            Position::LeftWinger => "Left Winger",
            Position::CenterForward => "Center Forward",
            Position::Striker => "Striker",
        }
    }

    pub fn abbreviation(&self) -> &'static str {
        match self {
            Position::Goalkeeper => "GK",
            Position::RightBack => "RB",
            Position::LeftBack => "LB",
            Position::CenterBack => "CB",
            Position::CentralDefensiveMidfielder => "CDM",
            Position::RightMidfielder => "RM",
            Position::LeftMidfielder => "LM",
            Position::CentralMidfielder => "CM",
            Position::CentralAttackingMidfielder => "CAM",
            Position::RightWinger => "RW",
            Position::LeftWinger => "LW",
            Position::CenterForward => "CF",
            Position::Striker => "ST",
        }
    }

    /// Stable name used in storage, e.g. `CENTRAL_MIDFIELDER`.
    pub fn as_key(&self) -> &'static str {
        match self {
            Position::Goalkeeper => "GOALKEEPER",
            Position::RightBack => "RIGHT_BACK",
            Position::LeftBack => "LEFT_BACK",
            Position::CenterBack => "CENTER_BACK",
            Position::CentralDefensiveMidfielder => "CENTRAL_DEFENSIVE_MIDFIELDER",
            Position::RightMidfielder => "RIGHT_MIDFIELDER",
            Position::LeftMidfielder => "LEFT_MIDFIELDER",
            Position::CentralMidfielder => "CENTRAL_MIDFIELDER",
            Position::CentralAttackingMidfielder => "CENTRAL_ATTACKING_MIDFIELDER",
            Position::RightWinger => "RIGHT_WINGER",
            Position::LeftWinger => "LEFT_WINGER",
            Position::CenterForward => "CENTER_FORWARD",
            Position::Striker => "STRIKER",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Position {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Position::ALL
            .into_iter()
            .find(|p| p.as_key() == s)
            .ok_or_else(|| s.to_string())
    }
}
