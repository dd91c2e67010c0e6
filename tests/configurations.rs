//! Configuration qualifier integration tests.
//!
//! Parses qualifier strings as they appear in resource directory names and checks the
//! canonical printed form together with the relations used to choose between values.

use resforge::prelude::*;

fn parse(qualifiers: &str) -> ConfigDescription {
    ConfigDescription::parse_checked(qualifiers).unwrap()
}

#[test]
fn test_full_qualifier_string_round_trips() -> Result<()> {
    let config: ConfigDescription =
        "mcc310-pl-sw720dp-normal-long-port-night-xhdpi-keyssoft-qwerty-navexposed-nonav"
            .parse()?;
    assert_eq!(
        config.to_string(),
        "mcc310-pl-sw720dp-normal-long-port-night-xhdpi-keyssoft-qwerty-navexposed-nonav-v13"
    );

    let reparsed: ConfigDescription = config.to_string().parse()?;
    assert_eq!(reparsed, config);
    Ok(())
}

#[test]
fn test_default_config_is_empty() -> Result<()> {
    let config: ConfigDescription = "".parse()?;
    assert!(config.is_default());
    assert_eq!(config.to_string(), "");
    Ok(())
}

#[test]
fn test_out_of_order_qualifiers_rejected() {
    match "land-en".parse::<ConfigDescription>() {
        Err(Error::InvalidConfig { qualifier, token }) => {
            assert_eq!(qualifier, "land-en");
            assert_eq!(token, "en");
        }
        other => panic!("expected InvalidConfig, got {other:?}"),
    }
    assert!(ConfigDescription::parse("land-en").is_none());
}

#[test]
fn test_version_is_implied_by_qualifiers() {
    let cases = [
        ("night", "night-v8"),
        ("sw600dp", "sw600dp-v13"),
        ("xhdpi", "xhdpi-v4"),
        ("round", "round-v23"),
        ("land", "land"),
        ("sw600dp-v21", "sw600dp-v21"),
    ];
    for (input, expected) in cases {
        assert_eq!(parse(input).to_string(), expected, "{input}");
    }
}

#[test]
fn test_default_dominates_every_sample() {
    let default = ConfigDescription::default_config();
    for qualifiers in ["en", "land", "night", "sw600dp", "xhdpi", "v21", "mcc310"] {
        let config = parse(qualifiers);
        assert!(default.dominates(&config), "{qualifiers}");
        assert!(!config.dominates(&default), "{qualifiers}");
    }
}

#[test]
fn test_conflicting_configs_are_incompatible() {
    assert!(parse("land").conflicts_with(&parse("port")));
    assert!(!parse("land").is_compatible_with(&parse("port")));
    assert!(parse("land").is_compatible_with(&parse("night")));
}

#[test]
fn test_sorting_is_total() {
    let mut configs: Vec<_> = ["xhdpi", "", "en", "land", "v21", "mcc310"]
        .into_iter()
        .map(parse)
        .collect();
    configs.sort();
    assert_eq!(configs[0], ConfigDescription::default_config());

    let mut again = configs.clone();
    again.reverse();
    again.sort();
    assert_eq!(again, configs);
}
