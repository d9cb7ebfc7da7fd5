pub(crate) mod connection;

pub use connection::Connection;
