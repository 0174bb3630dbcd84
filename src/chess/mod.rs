//! Implementation of the chess board, its rules and specifics.

pub mod attacks;
pub mod board;
pub mod core;
pub mod error;
pub mod mailbox;
pub mod movegen;
pub mod movelist;
