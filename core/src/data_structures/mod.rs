//! Graph and pairing value types consumed by the matchers.

pub mod graph;
pub mod pairing;

pub use self::graph::*;
pub use self::pairing::*;
