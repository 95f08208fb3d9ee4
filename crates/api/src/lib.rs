//! HTTP serving layer for the flight delay predictor

pub mod api;
pub mod config;
