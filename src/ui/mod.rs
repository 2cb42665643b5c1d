//! User interface and interaction
//!
//! This module contains all components related to user interaction,
//! including CLI parsing, terminal output, progress spinners and the
//! interactive dashboard session.

pub mod cli;
pub mod color;
pub mod output;
pub mod progress;
pub mod session;

// Re-export commonly used items
pub use cli::{Cli, Commands, cli_to_config};
pub use output::{display_dashboard, display_report};
pub use progress::ProgressReporter;
pub use session::{DashboardSession, RenderSettings, fetch_dataset, selection_from_flags};
