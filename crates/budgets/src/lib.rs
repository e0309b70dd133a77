pub mod compare;
pub mod handler;
pub mod models;
mod repository;
pub mod service;
