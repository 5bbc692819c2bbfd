pub mod inventory;
pub mod sale;
pub mod show;
pub mod show_summary;
pub mod tour;
pub mod user;

/// Format an amount in cents as a plain decimal string (`1999` -> `"19.99"`).
pub fn format_cents(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("{sign}{}.{:02}", abs / 100, abs % 100)
}

#[cfg(test)]
mod tests {
    use super::format_cents;

    #[test]
    fn format_cents_pads_fraction() {
        assert_eq!(format_cents(0), "0.00");
        assert_eq!(format_cents(5), "0.05");
        assert_eq!(format_cents(8000), "80.00");
        assert_eq!(format_cents(1999), "19.99");
        assert_eq!(format_cents(-250), "-2.50");
    }
}
