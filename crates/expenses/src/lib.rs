pub mod handler;
pub mod models;
mod repository;
pub mod service;
pub mod summary;
