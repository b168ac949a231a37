//! Unit tests for descriptor construction, constraints and rendering.

use std::time::Duration;

use rstest::rstest;
use serial_test::serial;
use url::Url;

use super::{Flag, FlagType};

#[test]
fn bool_flag_renders_bare_name() {
    let flag = Flag::<bool>::new("test-bool-flag", "Test bool flag");
    assert_eq!(flag.name(), "test-bool-flag");
    assert_eq!(flag.short_description(), "--test-bool-flag");
}

#[test]
fn value_flags_render_their_placeholders() {
    assert_eq!(
        Flag::<Duration>::new("test-duration-flag", "d").short_description(),
        "--test-duration-flag=DURATION"
    );
    assert_eq!(
        Flag::<i64>::new("test-int-flag", "i").short_description(),
        "--test-int-flag=INT"
    );
    assert_eq!(
        Flag::<f64>::new("test-float-flag", "f").short_description(),
        "--test-float-flag=FLOAT"
    );
    assert_eq!(
        Flag::<String>::new("test-string-flag", "s").short_description(),
        "--test-string-flag=STRING"
    );
    assert_eq!(
        Flag::<Url>::new("test-url-flag", "u").short_description(),
        "--test-url-flag=URL"
    );
}

#[test]
fn long_description_for_required_flag() {
    let flag = Flag::<String>::new("test-flag", "Test flag")
        .placeholder("<test_placeholder>")
        .env("TEST_FLAG")
        .required();
    assert_eq!(
        flag.long_description(),
        "  --test-flag=<test_placeholder>\tTest flag (required) [$TEST_FLAG]"
    );
}

#[test]
fn long_description_for_defaulted_flag() {
    let flag = Flag::<String>::new("test-flag", "Test flag")
        .placeholder("<test_placeholder>")
        .env("TEST_FLAG")
        .default_value("foo".to_owned());
    assert_eq!(
        flag.long_description(),
        "  --test-flag=<test_placeholder>\tTest flag (default: foo) [$TEST_FLAG]"
    );
}

#[test]
fn long_description_is_idempotent() {
    let flag = Flag::<i64>::new("test-flag", "Test flag").default_value(3);
    assert_eq!(flag.long_description(), flag.long_description());
    assert_eq!(flag.short_description(), flag.short_description());
}

#[test]
fn empty_env_name_disables_lookup() {
    let flag = Flag::<String>::new("test-flag", "Test flag").env("TEST_FLAG").env("");
    assert_eq!(flag.long_description(), "  --test-flag=STRING\tTest flag");
}

#[test]
#[should_panic(expected = "toggle flag has no value placeholder")]
fn placeholder_on_toggle_panics() {
    let _ = Flag::<bool>::new("test-flag", "Test flag").placeholder("foo");
}

#[test]
#[should_panic(expected = "toggle flag cannot take a default value")]
fn default_on_toggle_panics() {
    let _ = Flag::<bool>::new("test-flag", "Test flag").default_value(true);
}

#[test]
#[should_panic(expected = "required flag cannot take a default value")]
fn default_on_required_flag_panics() {
    let _ = Flag::<String>::new("test-flag", "Test flag")
        .required()
        .default_value("foo".to_owned());
}

#[test]
#[should_panic(expected = "toggle flag cannot be required")]
fn required_on_toggle_panics() {
    let _ = Flag::<bool>::new("test-flag", "Test flag").required();
}

#[test]
#[should_panic(expected = "flag with a default value cannot be required")]
fn required_on_defaulted_flag_panics() {
    let _ = Flag::<String>::new("test-flag", "Test flag")
        .default_value("foo".to_owned())
        .required();
}

#[test]
fn set_from_string_stores_parsed_value() {
    let flag = Flag::<i64>::new("test-flag", "Test flag");
    assert!(!flag.is_set());
    flag.set_from_string("10").expect("valid value");
    assert_eq!(flag.get(), Some(10));
    assert!(flag.is_set());
}

#[test]
fn set_from_string_rejects_bad_value_and_keeps_slot() {
    let flag = Flag::<i64>::new("test-flag", "Test flag");
    flag.set_from_string("10").expect("valid value");
    let err = flag.set_from_string("abc").expect_err("invalid value");
    assert_eq!(
        err.to_string(),
        "invalid value \"abc\" for flag --test-flag: invalid digit found in string"
    );
    assert_eq!(flag.get(), Some(10));
}

#[test]
fn later_source_overwrites_without_clearing_set() {
    let flag = Flag::<String>::new("test-flag", "Test flag").default_value("foo".to_owned());
    flag.set_from_default();
    assert!(flag.is_set());
    flag.set_from_string("bar").expect("valid value");
    assert!(flag.is_set());
    assert_eq!(flag.get().as_deref(), Some("bar"));
}

#[test]
#[serial]
fn set_from_env_reads_variable() {
    let _guard = test_helpers::env::set_var("FLENV_UNIT_TEST_FLAG", "10");
    let flag = Flag::<i64>::new("test-flag", "Test flag").env("FLENV_UNIT_TEST_FLAG");
    flag.set_from_env().expect("valid value");
    assert_eq!(flag.get(), Some(10));
}

#[test]
#[serial]
fn set_from_env_without_variable_is_a_no_op() {
    let _guard = test_helpers::env::remove_var("FLENV_UNIT_TEST_FLAG");
    let flag = Flag::<i64>::new("test-flag", "Test flag").env("FLENV_UNIT_TEST_FLAG");
    flag.set_from_env().expect("absent variable is not an error");
    assert!(!flag.is_set());
}

#[test]
fn set_from_default_bypasses_parsing() {
    let flag = Flag::<i64>::new("test-flag", "Test flag").default_value(10);
    flag.set_from_default();
    assert_eq!(flag.get(), Some(10));
    assert!(flag.is_set());
}

#[test]
fn set_from_default_without_default_leaves_flag_unset() {
    let flag = Flag::<i64>::new("test-flag", "Test flag");
    flag.set_from_default();
    assert!(!flag.is_set());
    assert_eq!(flag.get(), None);
}

#[rstest]
#[case("1", true)]
#[case("t", true)]
#[case("T", true)]
#[case("true", true)]
#[case("TRUE", true)]
#[case("True", true)]
#[case("0", false)]
#[case("f", false)]
#[case("F", false)]
#[case("false", false)]
#[case("FALSE", false)]
#[case("False", false)]
fn bool_parse_accepts_canonical_forms(#[case] raw: &str, #[case] expected: bool) {
    assert_eq!(bool::parse(raw), Ok(expected));
}

#[rstest]
#[case("yes")]
#[case("")]
#[case("2")]
fn bool_parse_rejects_other_forms(#[case] raw: &str) {
    assert!(bool::parse(raw).is_err());
}

#[test]
fn duration_parse_accepts_unit_grammar() {
    assert_eq!(Duration::parse("300ms"), Ok(Duration::from_millis(300)));
    assert_eq!(
        Duration::parse("2h45m"),
        Ok(Duration::from_secs(2 * 3600 + 45 * 60))
    );
    assert!(Duration::parse("300").is_err());
}

#[test]
fn url_parse_validates() {
    let parsed = <Url as FlagType>::parse("https://example.com/path").expect("valid URL");
    assert_eq!(parsed.host_str(), Some("example.com"));
    assert!(<Url as FlagType>::parse("not a url").is_err());
}

#[test]
fn formats_round_trip_through_parse() {
    let duration = Duration::from_secs(9_045);
    assert_eq!(Duration::parse(&duration.format()), Ok(duration));

    let int = 42_i64;
    assert_eq!(i64::parse(&int.format()), Ok(int));

    let float = 1.5_f64;
    assert_eq!(f64::parse(&float.format()), Ok(float));

    let flag = true;
    assert_eq!(bool::parse(&flag.format()), Ok(flag));

    let text = "some value".to_owned();
    assert_eq!(String::parse(&text.format()), Ok(text));

    let url = <Url as FlagType>::parse("https://example.com/a?b=c").expect("valid URL");
    assert_eq!(<Url as FlagType>::parse(&url.format()), Ok(url));
}
