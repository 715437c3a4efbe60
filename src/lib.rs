pub mod api;
pub mod app;
pub mod config;
pub mod controller;
pub mod models;
pub mod session;
pub mod state;
pub mod storage;
pub mod sync;
pub mod ui;

#[cfg(test)]
mod testing;
