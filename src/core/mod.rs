pub mod billing;
pub mod chart;
pub mod config;
pub mod details;
pub mod error;
pub mod formatter;
pub mod i18n;
pub mod kind;
pub mod matcher;
pub mod metrics;
pub mod models;
pub mod pipeline;
pub mod providers;
pub mod renderer;
pub mod rules;
