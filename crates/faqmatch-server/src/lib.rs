//! faqmatch Server
//!
//! Glue around `faqmatch-core`: the axum chat endpoint and the logging
//! setup shared by the `faqmatch-server` and `faqmatch` binaries.

pub mod http;
pub mod logging;
