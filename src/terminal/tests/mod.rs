//! Screen emulator tests.
//!
//! - grid_tests: text placement, wrapping, cursor and erase handling
//! - color_tests: SGR parsing into palette indices
//!
//! Charset and editing cases live in grid_tests as well.
