//! Tests for the descriptor module

mod test_utils;
mod element_tests;
mod reader_writer_tests;
