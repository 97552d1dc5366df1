//! Unit tests for configuration loading and precedence.
//!
//! Tests are organised into modules by functional area:
//! - `helpers`: Shared test utilities
//! - `precedence`: Layer precedence tests
//! - `backend_resolution`: Dialect, base URL, key and timeout resolution
//! - `prompt_source`: `prompt` / `prompt_file` resolution and operation mode

mod helpers;
