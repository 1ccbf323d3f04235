pub mod api;
pub mod config;
pub mod model;
pub mod repository;
pub mod services;
pub mod validation;
pub mod web;
