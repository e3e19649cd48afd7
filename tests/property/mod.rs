//! Property-based tests for configuration merge laws
