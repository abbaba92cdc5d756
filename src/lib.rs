// src/lib.rs
pub mod app;
pub mod config;
pub mod export;
pub mod fetch;
pub mod pipeline;
pub mod rank;
pub mod render;
pub mod session;
pub mod table;
pub mod view;
