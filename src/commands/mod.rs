// Applying tasks
pub mod menu;
pub mod run;

// Read-only
pub mod list;
pub mod status;
