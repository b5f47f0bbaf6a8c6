use chrono::{DateTime, Utc};

const THOUSAND: u64 = 1_000;
const MILLION: u64 = 1_000_000;

/// Abbreviates a count with one decimal and a `K` or `M` suffix above a
/// thousand or a million respectively.
pub fn format_count(count: u64) -> String {
    if count >= MILLION {
        format!("{:.1}M", count as f64 / MILLION as f64)
    } else if count >= THOUSAND {
        format!("{:.1}K", count as f64 / THOUSAND as f64)
    } else {
        count.to_string()
    }
}

/// Renders an account creation time as "Joined <Month> <Year>".
pub fn format_join_date(joined_at: DateTime<Utc>) -> String {
    format!("Joined {}", joined_at.format("%B %Y"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_count_keeps_small_numbers_verbatim() {
        assert_eq!("0", format_count(0));
        assert_eq!("999", format_count(999));
    }

    #[test]
    fn format_count_abbreviates_thousands() {
        assert_eq!("1.5K", format_count(1_500));
        assert_eq!("999.9K", format_count(999_940));
    }

    #[test]
    fn format_count_abbreviates_millions() {
        assert_eq!("2.5M", format_count(2_500_000));
    }

    #[test]
    fn format_join_date_renders_month_and_year() {
        let joined_at = DateTime::parse_from_rfc3339("2011-03-19T08:15:00Z")
            .unwrap()
            .with_timezone(&Utc);

        assert_eq!("Joined March 2011", format_join_date(joined_at));
    }
}
