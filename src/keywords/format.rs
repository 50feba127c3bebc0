//! Built-in `format` checks. Grounded in the teacher's `checks.rs`: same
//! regex patterns, same per-format functions, registered here behind a name
//! so `HandleOptions::with_format` can override or disable any one of them.
use lazy_static::lazy_static;
use regex::Regex;
use std::net::IpAddr;
use std::str::FromStr;

lazy_static! {
    static ref IRI_REFERENCE_RE: Regex =
        Regex::new(r"^(\w+:(/?/?))?[^#\\\s]*(#[^\\\s]*)?$").expect("valid regex");
    static ref JSON_POINTER_RE: Regex =
        Regex::new(r"^(/(([^/~])|(~[01]))*)*$").expect("valid regex");
    static ref RELATIVE_JSON_POINTER_RE: Regex =
        Regex::new(r"^(0|[1-9][0-9]*)(#|(/(([^/~])|(~[01]))*)*)$").expect("valid regex");
    static ref TIME_RE: Regex = Regex::new(
        r"^([01][0-9]|2[0-3]):([0-5][0-9]):([0-5][0-9]|60)(\.[0-9]+)?(z|Z|[+-]([01][0-9]|2[0-3]):[0-5][0-9])$"
    )
    .expect("valid regex");
    static ref URI_REFERENCE_RE: Regex =
        Regex::new(r"^(\w+:(/?/?))?[^#\\\s]*(#[^\\\s]*)?$").expect("valid regex");
    static ref URI_TEMPLATE_RE: Regex = Regex::new(
        r#"^(?:(?:[^\x00-\x20"'<>%\\^`{|}]|%[0-9a-f]{2})|\{[+#./;?&=,!@|]?(?:[a-z0-9_]|%[0-9a-f]{2})+(?::[1-9][0-9]{0,3}|\*)?(?:,(?:[a-z0-9_]|%[0-9a-f]{2})+(?::[1-9][0-9]{0,3}|\*)?)*\})*$"#
    )
    .expect("valid regex");
}

/// A `format` check: given the string instance, is it valid?
pub type FormatChecker = fn(&str) -> bool;

pub(crate) fn date(value: &str) -> bool {
    chrono::NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
}

pub(crate) fn datetime(value: &str) -> bool {
    chrono::DateTime::parse_from_rfc3339(value).is_ok()
}

pub(crate) fn email(value: &str) -> bool {
    is_valid_email(value)
}

pub(crate) fn is_valid_email(value: &str) -> bool {
    value.contains('@') && !value.starts_with('@') && !value.ends_with('@')
}

pub(crate) fn hostname(value: &str) -> bool {
    is_valid_hostname(value)
}

pub(crate) fn is_valid_hostname(value: &str) -> bool {
    if value.is_empty() || value.len() > 255 {
        return false;
    }
    let value = value.strip_suffix('.').unwrap_or(value);
    value.split('.').all(|label| {
        !label.is_empty()
            && label.len() <= 63
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    })
}

pub(crate) fn ipv4(value: &str) -> bool {
    matches!(IpAddr::from_str(value), Ok(IpAddr::V4(_)))
}

pub(crate) fn ipv6(value: &str) -> bool {
    matches!(IpAddr::from_str(value), Ok(IpAddr::V6(_)))
}

pub(crate) fn iri(value: &str) -> bool {
    url::Url::parse(value).is_ok()
}

pub(crate) fn iri_reference(value: &str) -> bool {
    IRI_REFERENCE_RE.is_match(value)
}

pub(crate) fn json_pointer(value: &str) -> bool {
    JSON_POINTER_RE.is_match(value)
}

pub(crate) fn regex_format(value: &str) -> bool {
    Regex::new(value).is_ok()
}

pub(crate) fn relative_json_pointer(value: &str) -> bool {
    RELATIVE_JSON_POINTER_RE.is_match(value)
}

pub(crate) fn time(value: &str) -> bool {
    TIME_RE.is_match(value)
}

pub(crate) fn uri(value: &str) -> bool {
    url::Url::parse(value).is_ok()
}

pub(crate) fn uri_reference(value: &str) -> bool {
    URI_REFERENCE_RE.is_match(value)
}

pub(crate) fn uri_template(value: &str) -> bool {
    URI_TEMPLATE_RE.is_match(value)
}

/// Looks up the built-in checker for a format name, if this engine ships one.
/// An unrecognized format name is not an error — per spec it is simply
/// ignored, same as the teacher's `format.rs::compile` behavior for unknown
/// format strings.
pub(crate) fn builtin(name: &str) -> Option<FormatChecker> {
    match name {
        "date" => Some(date),
        "date-time" => Some(datetime),
        "email" | "idn-email" => Some(email),
        "hostname" | "idn-hostname" => Some(hostname),
        "ipv4" => Some(ipv4),
        "ipv6" => Some(ipv6),
        "iri" => Some(iri),
        "iri-reference" => Some(iri_reference),
        "json-pointer" => Some(json_pointer),
        "regex" => Some(regex_format),
        "relative-json-pointer" => Some(relative_json_pointer),
        "time" => Some(time),
        "uri" => Some(uri),
        "uri-reference" => Some(uri_reference),
        "uri-template" => Some(uri_template),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("2020-01-01", true)]
    #[test_case("not-a-date", false)]
    fn test_date(value: &str, expected: bool) {
        assert_eq!(date(value), expected);
    }

    #[test_case("a@b.com", true)]
    #[test_case("not-an-email", false)]
    fn test_email(value: &str, expected: bool) {
        assert_eq!(email(value), expected);
    }

    #[test_case("example.com", true)]
    #[test_case("-bad.com", false)]
    fn test_hostname(value: &str, expected: bool) {
        assert_eq!(hostname(value), expected);
    }

    #[test_case("127.0.0.1", true)]
    #[test_case("::1", false)]
    fn test_ipv4(value: &str, expected: bool) {
        assert_eq!(ipv4(value), expected);
    }

    #[test]
    fn ignored_format_has_no_builtin() {
        assert!(builtin("no-such-format").is_none());
    }
}
