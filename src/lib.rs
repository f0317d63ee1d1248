mod brain;
mod config;
mod coord;
mod fleet;
mod fog;
mod game;
mod generator;
mod logging;
mod storage;
mod ui;
mod validator;

pub use brain::*;
pub use config::*;
pub use coord::*;
pub use fleet::*;
pub use fog::*;
pub use game::*;
pub use generator::*;
pub use logging::init_logging;
pub use storage::*;
pub use ui::*;
pub use validator::*;
