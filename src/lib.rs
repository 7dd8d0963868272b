//! Storybook service: turns an uploaded PDF into a simplified children's
//! storybook and answers questions about it.
//!
//! The HTTP surface lives in [`routes`]; the orchestration of gates, retry
//! and the image cache lives in [`services::ai`].

pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
