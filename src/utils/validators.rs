use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::attendance::AttendanceStatus;

pub const FULL_NAME_MAX_LEN: usize = 100;
pub const DEPARTMENT_MAX_LEN: usize = 50;
/// Width of the `employees.email` column.
pub const EMAIL_MAX_LEN: usize = 255;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("email regex compiles")
});

static EMPLOYEE_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^EMP\d{3,}$").expect("employee id regex compiles"));

static ISO_DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("date regex compiles"));

pub fn validate_email(email: &str) -> bool {
    email.len() <= EMAIL_MAX_LEN && EMAIL_RE.is_match(email)
}

pub fn validate_employee_id_format(employee_id: &str) -> bool {
    EMPLOYEE_ID_RE.is_match(employee_id)
}

/// Parses a strict `YYYY-MM-DD` string that names a real calendar day.
pub fn parse_date(date: &str) -> Option<NaiveDate> {
    if !ISO_DATE_RE.is_match(date) {
        return None;
    }
    NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()
}

pub fn parse_attendance_status(status: &str) -> Option<AttendanceStatus> {
    status.parse().ok()
}

/// Length in characters, not bytes.
pub fn validate_length(value: &str, max: usize) -> bool {
    (1..=max).contains(&value.chars().count())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn email_shapes() {
        assert!(validate_email("aarav@company.com"));
        assert!(validate_email("first.last+hr@mail.example.co"));
        assert!(!validate_email("aarav@company"));
        assert!(!validate_email("aarav.company.com"));
        assert!(!validate_email("aarav@company.c"));
        assert!(!validate_email(""));

        let local = "a".repeat(EMAIL_MAX_LEN - "@company.com".len());
        assert!(validate_email(&format!("{local}@company.com")));
        assert!(!validate_email(&format!("{local}x@company.com")));
    }

    #[test]
    fn employee_id_format() {
        assert!(validate_employee_id_format("EMP001"));
        assert!(validate_employee_id_format("EMP1000"));
        assert!(!validate_employee_id_format("EMP01"));
        assert!(!validate_employee_id_format("emp001"));
        assert!(!validate_employee_id_format("EMP001x"));
    }

    #[test]
    fn dates_must_be_strict_and_real() {
        assert_eq!(
            parse_date("2025-02-06"),
            NaiveDate::from_ymd_opt(2025, 2, 6)
        );
        assert!(parse_date("2024-02-29").is_some());
        for bad in ["2025-02-29", "2025-13-01", "2025-2-6", "06-02-2025", "2025-02-06T00:00:00"] {
            assert!(parse_date(bad).is_none(), "{bad}");
        }
    }

    #[test]
    fn statuses_are_a_closed_set() {
        assert_eq!(
            parse_attendance_status("Half Day"),
            Some(AttendanceStatus::HalfDay)
        );
        assert_eq!(
            parse_attendance_status("Present"),
            Some(AttendanceStatus::Present)
        );
        assert_eq!(
            parse_attendance_status("Absent"),
            Some(AttendanceStatus::Absent)
        );
        assert_eq!(parse_attendance_status("Leave"), Some(AttendanceStatus::Leave));
        for bad in ["present", "HalfDay", "Sick", ""] {
            assert!(parse_attendance_status(bad).is_none(), "{bad}");
        }
    }

    #[test]
    fn length_counts_chars() {
        assert!(!validate_length("", 50));
        assert!(validate_length("IT", 50));
        assert!(validate_length(&"é".repeat(50), 50));
        assert!(!validate_length(&"a".repeat(51), 50));
    }

    proptest! {
        #[test]
        fn formatted_dates_round_trip(days in 0i64..200_000) {
            let date = NaiveDate::from_ymd_opt(1900, 1, 1).unwrap() + chrono::Duration::days(days);
            let text = date.format("%Y-%m-%d").to_string();
            prop_assert_eq!(parse_date(&text), Some(date));
        }
    }
}
