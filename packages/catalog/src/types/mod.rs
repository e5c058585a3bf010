pub mod config;
pub mod item;
pub mod listing;
pub mod site;
