mod board_server;
mod builder;
pub use board_server::*;
pub use builder::*;
