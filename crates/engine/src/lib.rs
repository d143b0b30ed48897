//! Controller layer over the puzzle core
//!
//! [`Session`] plays one level at a time: it forwards commands to the board,
//! keeps a bounded undo history, and resolves pointer drags into legal drop
//! positions with [`constrain_drag`].

pub mod config;
pub mod drag;
pub mod session;

pub use config::SessionConfig;
pub use drag::constrain_drag;
pub use session::Session;
