
/// Seat index in the roster; order is fixed for the session.
pub type PlayerId = u8;

/// Tags the tick subscription a `Tick` request came from.
pub type Generation = u64;
