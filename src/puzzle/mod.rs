//! Puzzle input: JSON puzzle files, command-line seeds, and the built-in
//! worked example. Everything here ends in a built [`crate::graph::Pyramid`].

pub mod example;
pub mod file;
pub mod seed;

pub use example::worked_example;
pub use file::{KnownSpec, PuzzleSpec, load_puzzle_file};
pub use seed::{parse_seed, parse_seeds};
