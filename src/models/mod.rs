pub mod hub_config;
pub mod link;
pub mod state;
pub mod theme;
