//! faqmatch end-to-end test support
//!
//! - `harness`: temporary corpus directories
//! - `mocks`: deterministic embedders and corpus fixtures
