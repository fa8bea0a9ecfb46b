//! Regex patterns for locating and segmenting the line-item table.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Line-item table span: from "Line" up to (excluding) "License:"
    pub static ref BODY_SPAN: Regex = Regex::new(
        r"(?s)(Line.*?)License:"
    ).unwrap();

    // Manufacturing part number (e.g. 1234567-890123)
    pub static ref MFG_PART_NUMBER: Regex = Regex::new(
        r"^\d{7}-\d{5,6}$"
    ).unwrap();

    // Country line in the "Assembled In" column (e.g. "CN China")
    pub static ref COUNTRY_LINE: Regex = Regex::new(
        r"^[A-Z]{2}\s+[A-Z][a-z]"
    ).unwrap();
}

/// Whether a token is a plain number once thousands and decimal separators
/// are removed ("1,000.00" and "10" are; "10 pcs" and "." are not).
pub fn is_numeric_token(token: &str) -> bool {
    let digits: String = token.chars().filter(|c| *c != ',' && *c != '.').collect();
    !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_token() {
        assert!(is_numeric_token("10"));
        assert!(is_numeric_token("1,000.00"));
        assert!(is_numeric_token("0.5"));
        assert!(!is_numeric_token("."));
        assert!(!is_numeric_token(""));
        assert!(!is_numeric_token("10 pcs"));
        assert!(!is_numeric_token("1234567-890123"));
    }

    #[test]
    fn test_part_number_shape() {
        assert!(MFG_PART_NUMBER.is_match("1234567-890123"));
        assert!(MFG_PART_NUMBER.is_match("1234567-89012"));
        assert!(!MFG_PART_NUMBER.is_match("1234567-8901"));
        assert!(!MFG_PART_NUMBER.is_match("123456-890123"));
        assert!(!MFG_PART_NUMBER.is_match("MKT-001"));
    }

    #[test]
    fn test_country_line_shape() {
        assert!(COUNTRY_LINE.is_match("CN China"));
        assert!(COUNTRY_LINE.is_match("US United States"));
        assert!(!COUNTRY_LINE.is_match("China"));
        assert!(!COUNTRY_LINE.is_match("CN china"));
        assert!(!COUNTRY_LINE.is_match("10"));
    }

    #[test]
    fn test_body_span() {
        let text = "Header\nLine\nTotal\n1\nLicense: none\nLine again License:";
        let caps = BODY_SPAN.captures(text).unwrap();
        assert_eq!(&caps[1], "Line\nTotal\n1\n");
    }
}
