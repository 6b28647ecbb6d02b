//! Game logic on top of the core data structures.
//!
//! - [`GameState`] - One game: board, falling piece, upcoming shapes, score
//! - [`GameStats`] - Score table, score-driven leveling and line counters
//! - [`PieceBag`] - 7-bag shape generation
//! - [`PieceSeed`] - Seed for deterministic shape generation
//!
//! # Game Flow
//!
//! 1. Create a [`GameState`] (random or seeded)
//! 2. Each frame, forward player input (move, rotate, drop, pause)
//! 3. Each frame, call [`GameState::advance`] with the elapsed milliseconds
//! 4. Read the board, the falling piece and the stats to render
//! 5. Stop when [`GameState::is_game_over`] turns true, or [`GameState::reset`]
//!
//! # Example
//!
//! ```
//! use tetrion_engine::{Direction, GameState, PieceSeed};
//!
//! let seed: PieceSeed = "0123456789abcdef0123456789abcdef".parse().unwrap();
//! let mut game = GameState::with_seed(20, 10, seed);
//!
//! while !game.is_game_over() {
//!     game.move_piece(Direction::Left);
//!     game.drop_piece();
//!     game.advance(16);
//! }
//!
//! println!("final score: {}", game.score());
//! ```

pub use self::{game_state::*, game_stats::*, piece_bag::*};

mod game_state;
mod game_stats;
mod piece_bag;
