///! This module includes common things we can reuse across the analyzer and the server

pub mod document;
pub mod tree_utils;
