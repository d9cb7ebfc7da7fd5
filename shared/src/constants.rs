/// Upper bound on messages drained per connection in a single poll.
///
/// A connection producing more than this in one tick has the remainder
/// delivered on subsequent ticks, bounding per-tick latency spikes at the
/// cost of added delivery latency under burst load.
pub const MAX_MESSAGES_PER_TICK: usize = 256;

/// Largest payload the relay SDK accepts in a single send call.
pub const MAX_MESSAGE_SIZE: usize = 512 * 1024;
