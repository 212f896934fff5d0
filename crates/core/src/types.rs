//! Player tokens and game outcomes shared by every crate in the engine.

use std::fmt;

/// One of the two players.
///
/// `X` always moves first. Empty cells are represented as `Option<Player>::None`.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum Player {
    X,
    O,
}

impl Player {
    /// Get the opposing player.
    pub fn opposite(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// Signed value used in line sums: `X = +1`, `O = -1`.
    pub fn sign(self) -> i8 {
        match self {
            Player::X => 1,
            Player::O => -1,
        }
    }

    /// Inverse of [`Player::sign`]; returns `None` for zero.
    pub fn from_sign(sign: i8) -> Option<Self> {
        match sign.signum() {
            1 => Some(Player::X),
            -1 => Some(Player::O),
            _ => None,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::X => write!(f, "X"),
            Player::O => write!(f, "O"),
        }
    }
}

/// Result of a board (a single sub-board or the whole game).
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Default)]
pub enum Outcome {
    /// Still being played.
    #[default]
    Incomplete,
    /// Three in a row for this player.
    Win(Player),
    /// Every square filled or decided without a winning line.
    Draw,
}

impl Outcome {
    /// Whether the board is finished (won or drawn).
    pub fn is_decided(self) -> bool {
        !matches!(self, Outcome::Incomplete)
    }

    /// The winning player, if the outcome is decisive.
    pub fn winner(self) -> Option<Player> {
        match self {
            Outcome::Win(player) => Some(player),
            _ => None,
        }
    }

    /// Contribution of this outcome to a line sum one level up.
    ///
    /// Draws and unfinished boards are neutral.
    pub fn sign(self) -> i8 {
        match self {
            Outcome::Win(player) => player.sign(),
            Outcome::Incomplete | Outcome::Draw => 0,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Incomplete => write!(f, "in progress"),
            Outcome::Win(player) => write!(f, "{} wins", player),
            Outcome::Draw => write!(f, "draw"),
        }
    }
}
