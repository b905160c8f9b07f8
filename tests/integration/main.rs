//! Integration tests, compiled as one test binary.

mod helpers;

mod cli_test;
mod engine_test;
mod parse_test;
mod preferences_test;
