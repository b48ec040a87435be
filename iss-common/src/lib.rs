pub mod types;

pub use types::{Coordinates, IpAddress, PassWindow, PassWindowList};
