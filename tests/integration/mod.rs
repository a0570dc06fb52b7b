//! Integration tests for mvn-changes
//!
//! Each test builds a throwaway git repository holding a small multi-module
//! Maven project and runs the compiled binary against it.

mod helpers;
mod test_checkout;
