//! JSON format tests
