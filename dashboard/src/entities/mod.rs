//! sea-orm entity definitions for the dashboard tables.

pub mod event;
pub mod task;
