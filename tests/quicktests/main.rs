//! Property tests for `OrderedTree` using only its public API.

mod ordered;
