mod competition;
mod state;
mod tab;

pub use competition::*;
pub use state::*;
pub use tab::*;
