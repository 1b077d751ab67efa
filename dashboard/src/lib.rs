pub mod config;
pub mod entities;
pub mod event;
pub mod task;
pub mod validation;
pub mod web;
