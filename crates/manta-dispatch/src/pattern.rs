use regex::Regex;

use crate::DispatchError;

/// Translates an MQTT topic filter into an anchored regex.
///
/// `+` matches exactly one topic level (`([^/]+)`); `#` matches the
/// remainder of the topic, including nested levels (`(.*)`). Both become
/// capturing groups so a matching dispatch can recover the wildcard
/// segments as handler arguments; [`crate::Dispatcher::dispatch`] further
/// splits a `#` capture on `/` into one positional argument per segment.
pub fn mqtt_to_regex(filter: &str) -> Result<Regex, DispatchError> {
    let mut pattern = String::with_capacity(filter.len() * 2 + 2);
    pattern.push('^');
    for segment in filter.split('/') {
        if !pattern.ends_with('^') {
            pattern.push('/');
        }
        match segment {
            "+" => pattern.push_str("([^/]+)"),
            "#" => pattern.push_str("(.*)"),
            other => pattern.push_str(&regex::escape(other)),
        }
    }
    pattern.push('$');

    Regex::new(&pattern).map_err(|e| DispatchError::InvalidPattern(filter.to_string(), e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plus_matches_single_level() {
        let re = mqtt_to_regex("acks/+").unwrap();
        assert!(re.is_match("acks/123"));
        assert!(!re.is_match("acks/123/456"));
    }

    #[test]
    fn hash_matches_remainder() {
        let re = mqtt_to_regex("payment_requests/#").unwrap();
        assert!(re.is_match("payment_requests/123/nano"));
    }

    #[test]
    fn captures_wildcard_segments() {
        let re = mqtt_to_regex("payment_requests/+/+").unwrap();
        let caps = re.captures("payment_requests/123/nano").unwrap();
        assert_eq!(&caps[1], "123");
        assert_eq!(&caps[2], "nano");
    }

    #[test]
    fn literal_segments_are_escaped() {
        let re = mqtt_to_regex("merchant_order_request/+").unwrap();
        assert!(re.is_match("merchant_order_request/abc"));
        assert!(!re.is_match("merchant_order_requestXabc"));
    }

    #[test]
    fn pattern_is_anchored() {
        let re = mqtt_to_regex("payments/+").unwrap();
        assert!(!re.is_match("prefix/payments/123"));
        assert!(!re.is_match("payments/123/suffix"));
    }
}
