//! Progress spinner helpers using indicatif

use indicatif::{ProgressBar, ProgressStyle};

use super::styling::{print_success, print_warning};

/// Create a spinner for indeterminate progress
pub fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::default_spinner()
        .template("    {spinner:.cyan} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏");
    pb.set_style(style);
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

/// Clear a spinner and print a success line in its place.
/// The line goes to stdout so it survives non-interactive runs.
pub fn finish_with_success(pb: &ProgressBar, message: &str) {
    pb.finish_and_clear();
    print_success(message);
}

/// Clear a spinner and print a warning line in its place
pub fn finish_with_warning(pb: &ProgressBar, message: &str) {
    pb.finish_and_clear();
    print_warning(message);
}
