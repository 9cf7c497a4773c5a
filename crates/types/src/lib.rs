//! Shared types and constants
//!
//! Plain data shared by the core, the runtime and the terminal adapters. Nothing
//! here depends on I/O, so every crate in the workspace can use it.
//!
//! # Board Dimensions
//!
//! - **Rows**: 20 by default (indexed top to bottom)
//! - **Columns**: 10 by default (indexed left to right)
//! - **Spawn anchor**: (0, 0), the top-left corner
//!
//! # Timing
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `GRAVITY_MS` | 500 | Interval between gravity steps |
//! | `FRAME_MS` | 16 | Render cadence (~60 FPS) |
//!
//! # Cell Values
//!
//! A board cell is a `u8`: [`EMPTY`] (0) or the color id of one shape (1..=7).
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{Command, ShapeKind, DEFAULT_COLS, DEFAULT_ROWS};
//!
//! let kind = ShapeKind::from_str("t").unwrap();
//! assert_eq!(kind, ShapeKind::T);
//! assert_eq!(kind.color_id(), 6);
//! assert_eq!(ShapeKind::from_color_id(6), Some(ShapeKind::T));
//!
//! assert_eq!(Command::from_str("moveLeft"), Some(Command::MoveLeft));
//!
//! assert_eq!(DEFAULT_ROWS, 20);
//! assert_eq!(DEFAULT_COLS, 10);
//! ```

/// Default board height in rows
pub const DEFAULT_ROWS: u8 = 20;

/// Default board width in columns
pub const DEFAULT_COLS: u8 = 10;

/// Gravity interval (one row every 500ms)
pub const GRAVITY_MS: u64 = 500;

/// Render cadence in milliseconds (16ms ≈ 60 FPS)
pub const FRAME_MS: u64 = 16;

/// Largest shape matrix side. The I piece is 4 cells long.
pub const MAX_SHAPE_SIDE: usize = 4;

/// A single cell value: [`EMPTY`] or a shape color id.
pub type Cell = u8;

/// Value of an empty cell.
pub const EMPTY: Cell = 0;

/// Highest valid color id.
pub const MAX_COLOR_ID: Cell = 7;

/// The seven shape kinds, in catalog order.
///
/// The color id of each kind is its 1-based catalog position:
/// I=1, J=2, L=3, O=4, S=5, T=6, Z=7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl ShapeKind {
    /// All kinds in catalog order.
    pub const ALL: [ShapeKind; 7] = [
        ShapeKind::I,
        ShapeKind::J,
        ShapeKind::L,
        ShapeKind::O,
        ShapeKind::S,
        ShapeKind::T,
        ShapeKind::Z,
    ];

    /// Color id written into the board for this kind's cells.
    pub fn color_id(&self) -> Cell {
        match self {
            ShapeKind::I => 1,
            ShapeKind::J => 2,
            ShapeKind::L => 3,
            ShapeKind::O => 4,
            ShapeKind::S => 5,
            ShapeKind::T => 6,
            ShapeKind::Z => 7,
        }
    }

    /// Inverse of [`ShapeKind::color_id`].
    ///
    /// ```
    /// use blockfall_types::ShapeKind;
    ///
    /// assert_eq!(ShapeKind::from_color_id(1), Some(ShapeKind::I));
    /// assert_eq!(ShapeKind::from_color_id(0), None);
    /// assert_eq!(ShapeKind::from_color_id(8), None);
    /// ```
    pub fn from_color_id(id: Cell) -> Option<Self> {
        match id {
            1..=MAX_COLOR_ID => Some(Self::ALL[(id - 1) as usize]),
            _ => None,
        }
    }

    /// Parse kind from its letter (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(ShapeKind::I),
            "j" => Some(ShapeKind::J),
            "l" => Some(ShapeKind::L),
            "o" => Some(ShapeKind::O),
            "s" => Some(ShapeKind::S),
            "t" => Some(ShapeKind::T),
            "z" => Some(ShapeKind::Z),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::I => "i",
            ShapeKind::J => "j",
            ShapeKind::L => "l",
            ShapeKind::O => "o",
            ShapeKind::S => "s",
            ShapeKind::T => "t",
            ShapeKind::Z => "z",
        }
    }
}

/// Discrete commands the input layer issues to the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Move piece one column left
    MoveLeft,
    /// Move piece one column right
    MoveRight,
    /// Move piece one row down, landing it if blocked
    MoveDown,
    /// Rotate piece 90° clockwise
    Rotate,
    /// Start over with an empty board
    Restart,
}

impl Command {
    /// Parse command from its camelCase name (case-insensitive)
    ///
    /// ```
    /// use blockfall_types::Command;
    ///
    /// assert_eq!(Command::from_str("rotate"), Some(Command::Rotate));
    /// assert_eq!(Command::from_str("MOVEDOWN"), Some(Command::MoveDown));
    /// assert_eq!(Command::from_str("hardDrop"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(Command::MoveLeft),
            "moveright" => Some(Command::MoveRight),
            "movedown" => Some(Command::MoveDown),
            "rotate" => Some(Command::Rotate),
            "restart" => Some(Command::Restart),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Command::MoveLeft => "moveLeft",
            Command::MoveRight => "moveRight",
            Command::MoveDown => "moveDown",
            Command::Rotate => "rotate",
            Command::Restart => "restart",
        }
    }
}

/// Externally observable controller phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    /// A piece is active and descending.
    #[default]
    Falling,
    /// A freshly spawned piece collided with settled blocks.
    GameOver,
}

/// What happens when a rotated shape would collide at the current anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RotationPolicy {
    /// Keep the old orientation when the rotated shape collides.
    #[default]
    Soft,
    /// Commit the rotation without any check.
    Unchecked,
}

impl RotationPolicy {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "soft" => Some(RotationPolicy::Soft),
            "unchecked" => Some(RotationPolicy::Unchecked),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RotationPolicy::Soft => "soft",
            RotationPolicy::Unchecked => "unchecked",
        }
    }
}

/// What happens when a new piece spawns on top of settled blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SpawnPolicy {
    /// Enter [`Phase::GameOver`].
    #[default]
    GameOver,
    /// Keep falling with the overlap in place.
    Unchecked,
}

impl SpawnPolicy {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "game-over" | "gameover" => Some(SpawnPolicy::GameOver),
            "unchecked" => Some(SpawnPolicy::Unchecked),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SpawnPolicy::GameOver => "game-over",
            SpawnPolicy::Unchecked => "unchecked",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_ids_follow_catalog_order() {
        for (i, kind) in ShapeKind::ALL.iter().enumerate() {
            assert_eq!(kind.color_id() as usize, i + 1);
            assert_eq!(ShapeKind::from_color_id(kind.color_id()), Some(*kind));
        }
    }

    #[test]
    fn shape_kind_names_roundtrip() {
        for kind in ShapeKind::ALL {
            assert_eq!(ShapeKind::from_str(kind.as_str()), Some(kind));
            assert_eq!(ShapeKind::from_str(&kind.as_str().to_uppercase()), Some(kind));
        }
        assert_eq!(ShapeKind::from_str("x"), None);
    }

    #[test]
    fn command_names_roundtrip() {
        for cmd in [
            Command::MoveLeft,
            Command::MoveRight,
            Command::MoveDown,
            Command::Rotate,
            Command::Restart,
        ] {
            assert_eq!(Command::from_str(cmd.as_str()), Some(cmd));
        }
    }

    #[test]
    fn policy_defaults_check_moves() {
        assert_eq!(RotationPolicy::default(), RotationPolicy::Soft);
        assert_eq!(SpawnPolicy::default(), SpawnPolicy::GameOver);
        assert_eq!(SpawnPolicy::from_str("gameover"), Some(SpawnPolicy::GameOver));
        assert_eq!(RotationPolicy::from_str("kick"), None);
    }
}
