use crate::api::Time;

/// Day-first date, as shown under comments and articles
pub fn format_date(t: &Time) -> String {
    t.format("%d/%m/%Y").to_string()
}
