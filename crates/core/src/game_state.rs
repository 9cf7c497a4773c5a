//! Game state module - the controller that owns the board and the falling piece
//!
//! Every mutation goes through [`GameState`]: lateral moves, gravity steps,
//! rotation, landing (merge + line clear + respawn) and restart. All operations
//! are total; a move that is not allowed simply reports that nothing changed.

use tracing::{debug, info};

use crate::board::Board;
use crate::collision::is_collision;
use crate::rotation::rotate;
use crate::shapes::{template, Shape};
use crate::snapshot::GameSnapshot;
use crate::source::{RandomSource, ShapeSource};
use crate::types::*;

/// The falling piece: a shape plus its board anchor.
///
/// Shape cell `(row, col)` sits on board cell `(y + row, x + col)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub kind: ShapeKind,
    pub shape: Shape,
    pub x: i32,
    pub y: i32,
}

impl ActivePiece {
    /// Fresh template of `kind` at the spawn anchor (0, 0).
    pub fn spawn(kind: ShapeKind) -> Self {
        Self {
            kind,
            shape: template(kind),
            x: 0,
            y: 0,
        }
    }

    /// Would the piece collide after shifting by (dx, dy)?
    pub fn collides_at(&self, board: &Board, dx: i32, dy: i32) -> bool {
        is_collision(board, &self.shape, self.x + dx, self.y + dy)
    }

    /// Board coordinates `(row, col, value)` of the occupied cells.
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32, Cell)> + '_ {
        self.shape
            .occupied()
            .map(move |(r, c, value)| (self.y + r as i32, self.x + c as i32, value))
    }
}

/// Policies for the two moves that the classic rules leave unchecked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct GameRules {
    pub rotation: RotationPolicy,
    pub spawn: SpawnPolicy,
}

impl GameRules {
    /// No rotation check and no spawn check.
    pub fn unchecked() -> Self {
        Self {
            rotation: RotationPolicy::Unchecked,
            spawn: SpawnPolicy::Unchecked,
        }
    }
}

/// Result of a gravity step or manual move-down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    /// The piece moved one row down.
    Moved,
    /// The piece was merged into the board and a new one spawned.
    Landed { lines_cleared: usize },
    /// The game is over; nothing happened.
    Halted,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState<S = RandomSource> {
    board: Board,
    active: ActivePiece,
    phase: Phase,
    rules: GameRules,
    source: S,
    /// Increments on restart.
    episode: u32,
    /// Pieces spawned in the current episode, including the active one.
    pieces_spawned: u64,
}

impl GameState<RandomSource> {
    /// Default 20x10 board, default rules, seeded random shapes.
    pub fn seeded(seed: u64) -> Self {
        Self::new(
            Board::new(DEFAULT_ROWS as usize, DEFAULT_COLS as usize),
            RandomSource::new(seed),
            GameRules::default(),
        )
    }
}

impl<S: ShapeSource> GameState<S> {
    /// Start a game on `board` and spawn the first piece.
    pub fn new(board: Board, mut source: S, rules: GameRules) -> Self {
        let first = source.next_kind();
        let mut state = Self {
            board,
            active: ActivePiece::spawn(first),
            phase: Phase::Falling,
            rules,
            source,
            episode: 0,
            pieces_spawned: 1,
        };
        state.check_spawn();
        state
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> &ActivePiece {
        &self.active
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn rules(&self) -> GameRules {
        self.rules
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn episode(&self) -> u32 {
        self.episode
    }

    pub fn pieces_spawned(&self) -> u64 {
        self.pieces_spawned
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            board: self.board.clone(),
            active: self.active.clone(),
            phase: self.phase,
            episode: self.episode,
            pieces_spawned: self.pieces_spawned,
        }
    }

    /// Move the piece one column left. False if blocked.
    pub fn move_left(&mut self) -> bool {
        self.shift(-1)
    }

    /// Move the piece one column right. False if blocked.
    pub fn move_right(&mut self) -> bool {
        self.shift(1)
    }

    fn shift(&mut self, dx: i32) -> bool {
        if self.phase != Phase::Falling || self.active.collides_at(&self.board, dx, 0) {
            return false;
        }
        self.active.x += dx;
        true
    }

    /// Move the piece one row down, or land it if the row below is blocked.
    pub fn move_down(&mut self) -> DropOutcome {
        if self.phase != Phase::Falling {
            return DropOutcome::Halted;
        }

        if !self.active.collides_at(&self.board, 0, 1) {
            self.active.y += 1;
            return DropOutcome::Moved;
        }

        let lines_cleared = self.land();
        DropOutcome::Landed { lines_cleared }
    }

    /// Turn the piece 90° clockwise.
    ///
    /// With [`RotationPolicy::Soft`] a rotation that would collide at the
    /// current anchor is refused and false is returned.
    pub fn rotate(&mut self) -> bool {
        if self.phase != Phase::Falling {
            return false;
        }

        let rotated = rotate(&self.active.shape);
        if self.rules.rotation == RotationPolicy::Soft
            && is_collision(&self.board, &rotated, self.active.x, self.active.y)
        {
            return false;
        }

        self.active.shape = rotated;
        true
    }

    /// Remove every full row. Returns the number removed.
    pub fn clear_lines(&mut self) -> usize {
        self.board.clear_full_rows()
    }

    /// Merge, clear lines, respawn.
    ///
    /// Only reached from `move_down` after the check one row below failed, so
    /// the current position itself is legal.
    fn land(&mut self) -> usize {
        let written = self
            .board
            .merge(&self.active.shape, self.active.x, self.active.y);
        let lines = self.clear_lines();

        debug!(
            kind = self.active.kind.as_str(),
            x = self.active.x,
            y = self.active.y,
            written,
            lines,
            "piece landed"
        );

        self.spawn_piece();
        lines
    }

    /// Replace the active piece with the next kind from the source at (0, 0).
    ///
    /// Returns false if the spawn collided and the rules ended the game.
    pub fn spawn_piece(&mut self) -> bool {
        let kind = self.source.next_kind();
        self.active = ActivePiece::spawn(kind);
        self.pieces_spawned += 1;
        self.check_spawn()
    }

    fn check_spawn(&mut self) -> bool {
        if self.rules.spawn == SpawnPolicy::GameOver && self.active.collides_at(&self.board, 0, 0)
        {
            self.phase = Phase::GameOver;
            info!(
                episode = self.episode,
                pieces = self.pieces_spawned,
                "spawn blocked, game over"
            );
            return false;
        }

        debug!(kind = self.active.kind.as_str(), "spawned piece");
        true
    }

    /// Empty the board and start a new episode.
    pub fn restart(&mut self) {
        self.board.clear();
        self.phase = Phase::Falling;
        self.episode = self.episode.wrapping_add(1);
        self.pieces_spawned = 0;
        self.spawn_piece();
    }

    /// Apply one input command. Returns whether anything changed.
    pub fn apply(&mut self, command: Command) -> bool {
        match command {
            Command::MoveLeft => self.move_left(),
            Command::MoveRight => self.move_right(),
            Command::MoveDown => self.move_down() != DropOutcome::Halted,
            Command::Rotate => self.rotate(),
            Command::Restart => {
                self.restart();
                true
            }
        }
    }
}

impl Default for GameState<RandomSource> {
    fn default() -> Self {
        Self::seeded(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::SequenceSource;

    fn game(rows: usize, cols: usize, kinds: &[ShapeKind]) -> GameState<SequenceSource> {
        GameState::new(
            Board::new(rows, cols),
            SequenceSource::new(kinds).unwrap(),
            GameRules::default(),
        )
    }

    #[test]
    fn test_new_game_state() {
        let state = game(20, 10, &[ShapeKind::T]);
        assert_eq!(state.phase(), Phase::Falling);
        assert_eq!(state.active().kind, ShapeKind::T);
        assert_eq!((state.active().x, state.active().y), (0, 0));
        assert_eq!(state.pieces_spawned(), 1);
        assert_eq!(state.board().filled_count(), 0);
    }

    #[test]
    fn test_move_left_at_wall_is_noop() {
        let mut state = game(20, 10, &[ShapeKind::O]);
        assert!(!state.move_left());
        assert_eq!(state.active().x, 0);
    }

    #[test]
    fn test_move_right_until_wall() {
        let mut state = game(20, 10, &[ShapeKind::O]);
        let mut moves = 0;
        while state.move_right() {
            moves += 1;
        }
        assert_eq!(moves, 8);
        assert_eq!(state.active().x, 8);
    }

    #[test]
    fn test_move_down_increments_y() {
        let mut state = game(20, 10, &[ShapeKind::I]);
        assert_eq!(state.move_down(), DropOutcome::Moved);
        assert_eq!(state.active().y, 1);
    }

    #[test]
    fn test_landing_on_floor_merges_and_respawns() {
        let mut state = game(4, 4, &[ShapeKind::O, ShapeKind::T]);
        assert_eq!(state.move_down(), DropOutcome::Moved);
        assert_eq!(state.move_down(), DropOutcome::Moved);
        assert_eq!(state.move_down(), DropOutcome::Landed { lines_cleared: 0 });

        let rows = state.board().to_rows();
        assert_eq!(rows[2], vec![4, 4, 0, 0]);
        assert_eq!(rows[3], vec![4, 4, 0, 0]);
        assert_eq!(state.active().kind, ShapeKind::T);
        assert_eq!((state.active().x, state.active().y), (0, 0));
        assert_eq!(state.pieces_spawned(), 2);
    }

    #[test]
    fn test_landing_clears_completed_line() {
        let board = Board::from_rows(&[
            [0, 0, 0, 0],
            [0, 0, 0, 0],
            [0, 0, 0, 0],
            [0, 0, 0, 0],
        ])
        .unwrap();
        let mut state = GameState::new(
            board,
            SequenceSource::repeat(ShapeKind::I),
            GameRules::default(),
        );
        for _ in 0..3 {
            assert_eq!(state.move_down(), DropOutcome::Moved);
        }
        assert_eq!(state.move_down(), DropOutcome::Landed { lines_cleared: 1 });
        assert_eq!(state.board().filled_count(), 0);
    }

    #[test]
    fn test_soft_rotation_refused_at_floor() {
        // I lying on the bottom row of a 4-row board cannot turn vertical there.
        let mut state = game(4, 10, &[ShapeKind::I]);
        for _ in 0..3 {
            state.move_down();
        }
        assert_eq!(state.active().y, 3);
        let before = state.active().shape.clone();
        assert!(!state.rotate());
        assert_eq!(state.active().shape, before);
    }

    #[test]
    fn test_unchecked_rotation_commits() {
        let mut state = GameState::new(
            Board::new(4, 10),
            SequenceSource::repeat(ShapeKind::I),
            GameRules::unchecked(),
        );
        for _ in 0..3 {
            state.move_down();
        }
        assert!(state.rotate());
        assert_eq!(state.active().shape.rows(), 4);
    }

    #[test]
    fn test_spawn_blocked_ends_game() {
        let mut board = Board::new(4, 4);
        board.set(0, 0, 7);
        let state = GameState::new(board, SequenceSource::repeat(ShapeKind::O), GameRules::default());
        assert!(state.is_game_over());
    }

    #[test]
    fn test_game_over_ignores_commands() {
        let mut board = Board::new(4, 4);
        board.set(1, 1, 7);
        let mut state = GameState::new(board, SequenceSource::repeat(ShapeKind::O), GameRules::default());
        assert!(state.is_game_over());
        assert!(!state.move_right());
        assert!(!state.rotate());
        assert_eq!(state.move_down(), DropOutcome::Halted);
        assert!(!state.apply(Command::MoveDown));
    }

    #[test]
    fn test_unchecked_spawn_keeps_falling() {
        let mut board = Board::new(4, 4);
        board.set(0, 0, 7);
        let state = GameState::new(board, SequenceSource::repeat(ShapeKind::O), GameRules::unchecked());
        assert_eq!(state.phase(), Phase::Falling);
    }

    #[test]
    fn test_restart_resets_board_and_bumps_episode() {
        let mut state = game(4, 4, &[ShapeKind::O]);
        while state.move_down() == DropOutcome::Moved {}
        assert!(state.board().filled_count() > 0);

        assert!(state.apply(Command::Restart));
        assert_eq!(state.board().filled_count(), 0);
        assert_eq!(state.episode(), 1);
        assert_eq!(state.pieces_spawned(), 1);
        assert_eq!(state.phase(), Phase::Falling);
    }

    #[test]
    fn test_apply_dispatch() {
        let mut state = game(20, 10, &[ShapeKind::T]);
        assert!(state.apply(Command::MoveRight));
        assert_eq!(state.active().x, 1);
        assert!(state.apply(Command::MoveLeft));
        assert_eq!(state.active().x, 0);
        assert!(state.apply(Command::MoveDown));
        assert_eq!(state.active().y, 1);
        assert!(state.apply(Command::Rotate));
        assert_eq!(state.active().shape.rows(), 3);
    }

    #[test]
    fn test_snapshot_matches_state() {
        let mut state = game(20, 10, &[ShapeKind::L]);
        state.move_right();
        let snap = state.snapshot();
        assert_eq!(snap.active, *state.active());
        assert_eq!(snap.board, *state.board());
        assert!(snap.playable());
    }

    #[test]
    fn test_seeded_is_deterministic() {
        let mut a = GameState::seeded(99);
        let mut b = GameState::seeded(99);
        for _ in 0..200 {
            a.move_down();
            b.move_down();
        }
        assert_eq!(a.snapshot(), b.snapshot());
    }
}
