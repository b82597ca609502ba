//! roombook: book rooms for intervals within a daily window, without double-booking.

pub mod api;
pub mod booking;
pub mod config;
pub mod db;
pub mod models;
