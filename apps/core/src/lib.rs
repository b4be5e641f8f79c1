pub mod action_executor;
pub mod config;
pub mod contract;
pub mod core_service;
pub mod dispatcher;
pub mod logging;
pub mod model;
pub mod plugin_registry;
pub mod query;
pub mod resolver;
pub mod runtime;
pub mod session;
pub mod transport;
