//! Warrant of Decay Core - session runtime
//!
//! Wraps the pure rules in `warrant_logic` with the parts that need state
//! and I/O: a seeded random source, an undo history and save files.
//!
//! # Example
//!
//! ```rust,no_run
//! use warrant_core::prelude::*;
//!
//! let mut session = Session::new_run(Rules::default());
//! let target = session.state().current_node().unwrap().connections[0].clone();
//! session.apply(&Command::Travel { target });
//!
//! let mut save = Vec::new();
//! session.save(&mut save).unwrap();
//! ```

pub mod persistence;
pub mod session;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::persistence::SaveError;
    pub use crate::session::Session;
    pub use warrant_logic::engine::Command;
    pub use warrant_logic::goods::Commodity;
    pub use warrant_logic::rules::Rules;
    pub use warrant_logic::ship::UpgradeTrack;
    pub use warrant_logic::state::GameState;
}
