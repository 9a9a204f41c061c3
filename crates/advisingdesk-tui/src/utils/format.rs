use advisingdesk_core::models::Course;

/// Truncate a string to a maximum length, adding ellipsis if needed
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    }
}

/// `value`, or `default` when it is blank
pub fn or_default<'a>(value: &'a str, default: &'a str) -> &'a str {
    if value.trim().is_empty() {
        default
    } else {
        value
    }
}

/// GPA with two decimals, as on the statistics strip
pub fn format_gpa(gpa: f64) -> String {
    format!("{:.2}", gpa)
}

/// Course tag: `CS301 - Algorithms (3 cr)`
pub fn course_tag(course: &Course) -> String {
    format!("{} - {} ({} cr)", course.code(), course.name(), course.credits())
}

/// Text progress bar `[#####-----]` of `width` cells at `percent`
pub fn credit_bar(percent: u16, width: usize) -> String {
    let filled = (usize::from(percent.min(100)) * width + 50) / 100;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}
