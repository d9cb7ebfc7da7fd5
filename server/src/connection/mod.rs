pub(crate) mod connection;
pub(crate) mod registry;

pub use connection::Connection;
pub use registry::{ConnectionRegistry, FreePool};
