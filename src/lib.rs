pub mod backend;
pub mod config;
pub mod controllers;
pub mod error;
pub mod models;
pub mod routes;
pub mod state;
pub mod ui;
pub mod views;
