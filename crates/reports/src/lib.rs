pub mod handler;
pub mod models;
pub mod report;
pub mod service;
