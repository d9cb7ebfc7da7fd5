pub(crate) mod server;
pub(crate) mod server_config;

pub use server::Server;
pub use server_config::ServerConfig;
