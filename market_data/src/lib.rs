// src/lib.rs

pub mod client;
pub mod models;
