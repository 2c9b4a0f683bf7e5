use serde::{Deserialize, Serialize};

/// Side of the intersection a lane sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Position in `ALL`, used to index the direction tables.
    pub fn index(self) -> usize {
        match self {
            Direction::North => 0,
            Direction::East => 1,
            Direction::South => 2,
            Direction::West => 3,
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }

    /// True for East/West.
    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::East | Direction::West)
    }

    /// Both directions lie on the same axis (N/S or E/W).
    pub fn same_axis(self, other: Direction) -> bool {
        self.is_horizontal() == other.is_horizontal()
    }
}

/// How a route relates to the other movements of the intersection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteKind {
    /// Ordinary through traffic sharing the junction box.
    Through,
    /// Grade-separated movement with its own geometry.
    Isolated,
    /// Protected turn shown as an arrow, carved out of a cycle.
    Conditional,
}

/// Scheduling strategy of an intersection controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkingMode {
    /// Rotate cycles, each green for its configured time.
    Fixed,
    /// Rotate cycles, green time sized from the cycle's pressure.
    Variable,
    /// Like `Variable`, but cycles with no waiting traffic are skipped.
    VariableSkipEmpty,
}
