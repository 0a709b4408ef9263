//! Integration tests for greet-site live in `tests/`.
