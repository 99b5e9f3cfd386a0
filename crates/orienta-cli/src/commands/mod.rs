pub mod account;
pub mod config;
pub mod guides;
pub mod status;
pub mod study;
