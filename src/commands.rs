//! Keyboard-shortcut commands mapped to reminder durations (manifest
//! `commands` entries handled by the background worker)

/// Delay in minutes for a quick-reminder command, None for unknown commands
pub fn duration_for_command(command: &str) -> Option<i64> {
    match command {
        "quick-reminder-30min" => Some(30),
        "quick-reminder-60min" => Some(60),
        "quick-reminder-3h" => Some(180),
        "quick-reminder-6h" => Some(360),
        "quick-reminder-1d" => Some(1440),
        "quick-reminder-2d" => Some(2880),
        "quick-reminder-3d" => Some(4320),
        "quick-reminder-4d" => Some(5760),
        "quick-reminder-14d" => Some(20160),
        _ => None,
    }
}
