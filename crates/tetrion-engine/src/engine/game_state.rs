use rand::Rng as _;

use crate::core::{
    board::Board,
    piece::{Direction, Piece},
    shape::ShapeKind,
};

use super::{
    game_stats::GameStats,
    piece_bag::{PieceBag, PieceSeed},
};

/// Coarse phase of a game, derived from the pause and game-over flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum SessionState {
    Playing,
    Paused,
    GameOver,
}

/// A single game: the board, the falling piece, the upcoming shapes and the score.
///
/// The driver calls [`Self::advance`] once per frame with the elapsed time
/// and forwards player input to the command methods. Blocked moves and
/// rotations are silently ignored.
///
/// # Example
///
/// ```
/// use tetrion_engine::{Direction, GameState};
///
/// let mut game = GameState::new(20, 10);
/// game.move_piece(Direction::Right);
/// game.rotate_piece(false);
/// game.drop_piece();
/// game.advance(16);
///
/// assert_eq!(game.board().landed_count(), 4);
/// assert!(game.is_running());
/// ```
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    piece: Piece,
    bag: PieceBag,
    stats: GameStats,
    elapsed: u64,
    paused: bool,
    game_over: bool,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(Board::DEFAULT_ROWS, Board::DEFAULT_COLS)
    }
}

impl GameState {
    /// Starts a new game on an empty `rows × cols` board with a random seed.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    #[must_use]
    pub fn new(rows: usize, cols: usize) -> Self {
        Self::with_seed(rows, cols, rand::rng().random())
    }

    /// Like [`Self::new`], but with a specific seed for the shape sequence.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero, or if the board is too small for
    /// every shape to spawn inside it (fewer than 3 rows or 7 columns).
    #[must_use]
    pub fn with_seed(rows: usize, cols: usize, seed: PieceSeed) -> Self {
        let board = Board::new(rows, cols);
        assert!(
            ShapeKind::ALL
                .into_iter()
                .all(|kind| board.is_valid(&spawn_piece(kind, &board))),
            "board of {rows}x{cols} is too small to spawn every shape"
        );
        let mut bag = PieceBag::with_seed(seed);
        let piece = spawn_piece(bag.pop_next(), &board);
        Self {
            board,
            piece,
            bag,
            stats: GameStats::new(),
            elapsed: 0,
            paused: false,
            game_over: false,
        }
    }

    /// Replaces this game with a fresh one of the same dimensions.
    pub fn reset(&mut self) {
        *self = Self::new(self.board.rows(), self.board.cols());
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the falling piece.
    #[must_use]
    pub fn piece(&self) -> &Piece {
        &self.piece
    }

    /// Returns the shape that will spawn after the current piece lands.
    #[must_use]
    pub fn next_shape(&self) -> ShapeKind {
        self.bag.peek_next()
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.stats.score()
    }

    /// Returns the zero-based level.
    #[must_use]
    pub fn level(&self) -> usize {
        self.stats.level()
    }

    /// Returns the gravity interval in milliseconds.
    #[must_use]
    pub fn speed(&self) -> u64 {
        self.stats.speed_ms()
    }

    /// Returns the time accumulated since the last gravity step, in milliseconds.
    #[must_use]
    pub fn elapsed(&self) -> u64 {
        self.elapsed
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Returns `true` if the game is neither paused nor over.
    #[must_use]
    pub fn is_running(&self) -> bool {
        !(self.paused || self.game_over)
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        if self.game_over {
            SessionState::GameOver
        } else if self.paused {
            SessionState::Paused
        } else {
            SessionState::Playing
        }
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    /// Flips the pause flag. Has no effect once the game is over.
    pub fn toggle_pause(&mut self) {
        if !self.game_over {
            self.paused = !self.paused;
        }
    }

    /// Replaces the falling piece with the next shape from the bag.
    ///
    /// The spawn position is not checked; a blocked spawn shows up as a
    /// game over on the following [`Self::advance`].
    pub fn spawn_next_piece(&mut self) {
        self.piece = spawn_piece(self.bag.pop_next(), &self.board);
    }

    /// Moves the falling piece if the board allows it.
    ///
    /// Returns whether the piece moved. A blocked move is not an error.
    pub fn move_piece(&mut self, direction: Direction) -> bool {
        let moved = self.board.can_move(&self.piece, direction);
        if moved {
            self.piece.move_by(direction);
        }
        moved
    }

    /// Rotates the falling piece if the board allows it.
    ///
    /// Returns whether the piece rotated. A blocked rotation is not an error.
    pub fn rotate_piece(&mut self, counterclockwise: bool) -> bool {
        let rotated = self.board.can_rotate(&self.piece, counterclockwise);
        if rotated {
            self.piece.rotate(counterclockwise);
        }
        rotated
    }

    /// Moves the falling piece straight down until it has landed.
    ///
    /// The piece is not fixed to the board here; that happens on the next
    /// [`Self::advance`].
    pub fn drop_piece(&mut self) {
        while self.move_piece(Direction::Down) {}
    }

    /// Advances the game by `delta_ms` milliseconds.
    ///
    /// In order: apply gravity once the accumulated time reaches the current
    /// speed, land the piece and spawn the next one if it cannot fall, clear
    /// full lines and score them, then end the game if anything occupies the
    /// top row. Does nothing while paused or after game over.
    pub fn advance(&mut self, delta_ms: u64) {
        if !self.is_running() {
            return;
        }

        self.elapsed += delta_ms;
        if self.elapsed >= self.speed() && !self.board.has_landed(&self.piece) {
            self.move_piece(Direction::Down);
            self.elapsed = 0;
        }

        if self.board.has_landed(&self.piece) {
            self.board.land(&self.piece);
            self.stats.record_landing();
            self.spawn_next_piece();
        }

        let lines = self.board.remove_full_lines();
        self.stats.record_line_clear(lines);

        if self.board.is_row_occupied(0) {
            self.game_over = true;
        }
    }
}

/// Places a new piece of `kind` at the top of the board.
///
/// I and O spawn at the center column, every other shape at the left edge.
fn spawn_piece(kind: ShapeKind, board: &Board) -> Piece {
    let col = match kind {
        ShapeKind::I | ShapeKind::O => {
            i32::try_from(board.cols() / 2).expect("board width fits in i32")
        }
        _ => 0,
    };
    Piece::new(kind, 0, col)
}
