//! Property-based tests using proptest.
