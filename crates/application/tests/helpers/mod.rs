mod mock_ports;
mod packets;

pub use mock_ports::*;
pub use packets::*;
