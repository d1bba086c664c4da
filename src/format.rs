use chrono::{DateTime, Utc};

/// `HH:MM:SS`, prefixed with `Nd ` once the span reaches a full day.
pub fn format_delta_time(seconds: u64) -> String {
    let days = seconds / 86_400;
    let hours = (seconds % 86_400) / 3600;
    let minutes = (seconds % 3600) / 60;
    let seconds = seconds % 60;
    if days > 0 {
        format!("{}d {:02}:{:02}:{:02}", days, hours, minutes, seconds)
    } else {
        format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
    }
}

/// Empty when the moment never happened.
pub fn format_absolute_time(time: Option<DateTime<Utc>>) -> String {
    match time {
        Some(time) => time.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn delta_under_a_day() {
        assert_eq!(format_delta_time(0), "00:00:00");
        assert_eq!(format_delta_time(3_723), "01:02:03");
    }

    #[test]
    fn delta_with_days() {
        assert_eq!(format_delta_time(86_400 * 2 + 59), "2d 00:00:59");
    }

    #[test]
    fn absolute_time() {
        let time = Utc.with_ymd_and_hms(2019, 3, 14, 15, 9, 26).unwrap();
        assert_eq!(format_absolute_time(Some(time)), "2019-03-14 15:09:26");
        assert_eq!(format_absolute_time(None), "");
    }
}
