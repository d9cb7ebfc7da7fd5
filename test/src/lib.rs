
pub use helpers::*;
pub use loopback::{LoopbackNetwork, LoopbackRelay};
