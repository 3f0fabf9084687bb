//! Header comparison helpers for assertions on replies and recorded hits.

mod headers;

pub use headers::{headers_equal, headers_include};
