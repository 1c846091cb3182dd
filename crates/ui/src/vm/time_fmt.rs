use services::sessions::format_remaining;

#[must_use]
pub fn timer_label(remaining_secs: u32) -> String {
    format!("Time left: {}", format_remaining(remaining_secs))
}
