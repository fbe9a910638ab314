mod controller;
mod fsm;
mod state;

pub use controller::*;
pub use fsm::*;
pub use state::*;
