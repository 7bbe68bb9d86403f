use core::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RuleCode {
    BombCountdownRange,
    BombCellCollision,
    BombOnBlockedTile,
    AgentOutOfBounds,
    AgentInsideTerrain,
    AgentBombAccounting,
    BoxCountMismatch,
    FlameOnWall,
    UnknownSelfAgent,
}

impl fmt::Display for RuleCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BombCountdownRange => write!(f, "BOMB_COUNTDOWN_RANGE"),
            Self::BombCellCollision => write!(f, "BOMB_CELL_COLLISION"),
            Self::BombOnBlockedTile => write!(f, "BOMB_ON_BLOCKED_TILE"),
            Self::AgentOutOfBounds => write!(f, "AGENT_OUT_OF_BOUNDS"),
            Self::AgentInsideTerrain => write!(f, "AGENT_INSIDE_TERRAIN"),
            Self::AgentBombAccounting => write!(f, "AGENT_BOMB_ACCOUNTING"),
            Self::BoxCountMismatch => write!(f, "BOX_COUNT_MISMATCH"),
            Self::FlameOnWall => write!(f, "FLAME_ON_WALL"),
            Self::UnknownSelfAgent => write!(f, "UNKNOWN_SELF_AGENT"),
        }
    }
}

impl std::error::Error for RuleCode {}
