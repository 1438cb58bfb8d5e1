//! Mansion Crawler: a text adventure in a browser terminal.
//!
//! The engine under [`mansion`] is plain Rust and runs anywhere; [`input`]
//! and [`widgets`] hold the ratzilla front-end pieces the binary wires up.

pub mod input;
pub mod mansion;
pub mod widgets;
