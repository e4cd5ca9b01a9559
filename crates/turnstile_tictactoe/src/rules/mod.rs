//! Game rules for tic-tac-toe.
//!
//! Pure functions over a [`Board`](super::Board). Nothing here locks or
//! waits; callers own any synchronization.

pub mod draw;
pub mod win;

pub use draw::{check_draw, is_full};
pub use win::{LINES, check_win, winner};
