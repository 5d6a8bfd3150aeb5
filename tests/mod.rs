// Integration tests for pgsnap

pub mod helpers;
