//! mead CLI内部モジュール

pub mod cli;
pub mod config;
pub mod render;
