pub mod header;
pub mod record_modal;
pub mod schedule_grid;
