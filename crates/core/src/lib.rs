//! Core game logic - pure, deterministic, and testable
//!
//! Everything about the rules of the game lives here, with no dependency on
//! terminals, timers or threads:
//!
//! - [`shapes`]: shape matrices and the catalog of seven templates
//! - [`rotation`]: the 90° clockwise rotation transform
//! - [`board`]: the settled-cell grid with merge and line clearing
//! - [`collision`]: legality of a shape at a position
//! - [`source`]: where the next piece comes from (seeded random or scripted)
//! - [`game_state`]: the controller tying it all together
//! - [`snapshot`]: read-only copies handed to renderers
//!
//! # Example
//!
//! ```
//! use blockfall_core::{Board, DropOutcome, GameRules, GameState, SequenceSource};
//! use blockfall_core::types::{Command, ShapeKind};
//!
//! let mut game = GameState::new(
//!     Board::new(20, 10),
//!     SequenceSource::repeat(ShapeKind::O),
//!     GameRules::default(),
//! );
//!
//! game.apply(Command::MoveRight);
//! assert_eq!(game.active().x, 1);
//!
//! // Drop to the floor: 18 steps down, then the landing step.
//! for _ in 0..18 {
//!     assert_eq!(game.move_down(), DropOutcome::Moved);
//! }
//! assert_eq!(game.move_down(), DropOutcome::Landed { lines_cleared: 0 });
//! assert_eq!(game.board().filled_count(), 4);
//! ```

pub mod board;
pub mod collision;
pub mod game_state;
pub mod rotation;
pub mod shapes;
pub mod snapshot;
pub mod source;

pub use blockfall_types as types;

pub use board::Board;
pub use collision::is_collision;
pub use game_state::{ActivePiece, DropOutcome, GameRules, GameState};
pub use rotation::rotate;
pub use shapes::{pick_random, random_kind, template, Shape};
pub use snapshot::GameSnapshot;
pub use source::{RandomSource, SequenceSource, ShapeSource};
