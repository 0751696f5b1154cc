extern crate self as headerdb_core;

pub mod log;
