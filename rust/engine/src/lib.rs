//! # line98-engine: Ball-Puzzle Rules Engine
//!
//! A deterministic rules engine for the Line98 ball puzzle: colored balls on
//! a 9×9 grid, moved along open orthogonal paths, cleared in runs of five or
//! more along rows, columns and diagonals.
//!
//! ## Core Modules
//!
//! - [`cells`] - Ball colors and cell contents
//! - [`grid`] - Board geometry, the cell buffer and its string codec
//! - [`path`] - Breadth-first path finding over empty cells
//! - [`lines`] - Run detection and clearing
//! - [`spawner`] - Random ball placement and the potential-line heuristic
//! - [`rules`] - Move request validation
//! - [`engine`] - Move orchestration and session creation
//! - [`game`] - Session state, spawn queue and persisted record
//! - [`logger`] - JSONL game logs
//! - [`errors`] - Error types for moves and decoding
//!
//! ## Quick Start
//!
//! ```rust
//! use line98_engine::engine::Engine;
//!
//! let mut engine = Engine::new(Some(42));
//! let mut session = engine.create_session("player-1");
//!
//! // Move the first ball to the first empty cell it can reach.
//! let from = session.board().iter().find(|(_, c)| !c.is_empty()).map(|(i, _)| i).unwrap();
//! let to = (0..81)
//!     .find(|&to| {
//!         session.board().is_empty_at(to)
//!             && line98_engine::path::find_path(session.board(), from, to).is_some()
//!     })
//!     .unwrap();
//!
//! let outcome = engine.apply_move(&mut session, from, to).unwrap();
//! assert_eq!(outcome.path.first(), Some(&from));
//! assert_eq!(outcome.path.last(), Some(&to));
//! ```
//!
//! ## Deterministic Gameplay
//!
//! Spawning is driven by a seeded ChaCha20 generator, so the same seed and
//! the same moves reproduce the same game:
//!
//! ```rust
//! use line98_engine::engine::Engine;
//!
//! let a = Engine::new(Some(7)).create_session("p");
//! let b = Engine::new(Some(7)).create_session("p");
//! assert_eq!(a, b);
//! ```
//!
//! ## Persisted Form
//!
//! Boards and spawn queues round-trip through compact symbol strings:
//!
//! ```rust
//! use line98_engine::grid::Board;
//!
//! let text = format!("RGB{}", "-".repeat(78));
//! let board: Board = text.parse().unwrap();
//! assert_eq!(board.to_string(), text);
//! ```

pub mod cells;
pub mod engine;
pub mod errors;
pub mod game;
pub mod grid;
pub mod lines;
pub mod logger;
pub mod path;
pub mod rules;
pub mod spawner;
