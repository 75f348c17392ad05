//! Styled fragment support
//!
//! Runs a stylesheet analyzer over CSS-in-JS fragments by wrapping them in a synthetic rule
//! and translating every coordinate between the caller's text and the wrapped text.

pub mod position;
pub mod service;
pub mod translator;
pub mod wrapper;

#[cfg(test)]
mod service_tests;
