use super::*;

fn v(s: &str) -> Version {
    Version::parse(s).unwrap()
}

#[test]
fn test_parse_simple() {
    let version = v("1.2.3");
    assert_eq!(version.components().collect::<Vec<_>>(), vec!["1", "2", "3"]);
    assert_eq!(version.as_str(), "1.2.3");
}

#[test]
fn test_underscore_normalised_to_dot() {
    let version = v("1_10");
    assert_eq!(version.as_str(), "1.10");
    assert_eq!(version, v("1.10"));
}

#[test]
fn test_numeric_not_lexical_ordering() {
    assert!(v("1.10") > v("1.2"));
    assert!(v("2.0") > v("1.10"));
    assert!(v("10") > v("9"));
}

#[test]
fn test_trailing_zeros_not_significant() {
    assert_eq!(v("1.0"), v("1"));
    assert_eq!(v("1.0.0").cmp(&v("1")), Ordering::Equal);
    // Display keeps what was written
    assert_eq!(v("1.0").to_string(), "1.0");
}

#[test]
fn test_prefix_is_smaller() {
    assert!(v("1") < v("1.0.1"));
    assert!(v("1.1") < v("1.1.1"));
}

#[test]
fn test_leading_zeros_numeric() {
    assert_eq!(v("1.01"), v("1.1"));
    assert_eq!(v("1.01").as_str(), "1.01");
}

#[test]
fn test_max_picks_numeric_maximum() {
    let versions = vec![v("1.2"), v("1.10"), v("2.0")];
    assert_eq!(versions.into_iter().max().unwrap(), v("2"));
}

#[test]
fn test_reject_empty() {
    assert!(matches!(
        Version::parse(""),
        Err(CoreError::InvalidVersion { .. })
    ));
}

#[test]
fn test_reject_non_numeric() {
    let err = Version::parse("1.x").unwrap_err();
    assert!(err.to_string().contains("[E004]"));
    assert!(err.to_string().contains("1.x"));
    assert!(Version::parse("latest").is_err());
    assert!(Version::parse("1-2").is_err());
}

#[test]
fn test_reject_empty_component() {
    assert!(Version::parse("1..2").is_err());
    assert!(Version::parse(".1").is_err());
    assert!(Version::parse("1.").is_err());
}

#[test]
fn test_from_str() {
    let version: Version = "3.4".parse().unwrap();
    assert_eq!(version.components().collect::<Vec<_>>(), vec!["3", "4"]);
}

#[test]
fn test_hash_consistent_with_eq() {
    let mut set = std::collections::HashSet::new();
    set.insert(v("1.0"));
    assert!(set.contains(&v("1")));
}

#[test]
fn test_components_have_no_size_limit() {
    let big = v("202401011200003000000");
    assert_eq!(big.as_str(), "202401011200003000000");
    assert!(big > v("18446744073709551615"));
    assert!(big > v("99999999999999999999"));
    assert!(v("1.99999999999999999999999") > v("1.99999999999999999999998"));
    assert_eq!(v("0001.000200"), v("1.200"));
}

#[test]
fn test_zero_versions() {
    assert_eq!(v("0"), v("0.0.0"));
    assert!(v("0") < v("0.1"));
    assert_eq!(v("000").components().collect::<Vec<_>>(), vec!["0"]);
}
