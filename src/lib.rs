pub mod config;
pub mod db;
pub mod entities;
pub mod error;
pub mod handlers;
pub mod repository;
pub mod routers;
pub mod state;
