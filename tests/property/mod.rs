//! Property-based tests for digest and comparison guarantees
