//! Core domain types for procedures and response templates.

pub mod procedure;
