pub(crate) mod betting;
pub(crate) mod rounds;

/// Percentage as the clients display it: explicit `+` on gains.
pub(crate) fn display_percentage(percentage: f64) -> String {
    if percentage > 0.0 {
        format!("+{percentage}")
    } else {
        format!("{percentage}")
    }
}
