pub mod app;
pub mod commands;
pub mod config;
pub mod support;
pub mod zendesk;
