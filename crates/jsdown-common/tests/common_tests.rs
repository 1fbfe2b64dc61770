use super::*;

#[test]
fn test_script_target_ordering() {
    assert!(ScriptTarget::ES5 < ScriptTarget::ES2015);
    assert!(ScriptTarget::ES2019 < ScriptTarget::ES2020);
    assert!(ScriptTarget::ESNext > ScriptTarget::ES2022);
    assert_eq!(ScriptTarget::default(), ScriptTarget::ES5);
}

#[test]
fn test_optional_chaining_support() {
    assert!(!ScriptTarget::ES5.supports(LanguageFeature::OptionalChaining));
    assert!(!ScriptTarget::ES2019.supports(LanguageFeature::OptionalChaining));
    assert!(ScriptTarget::ES2020.supports(LanguageFeature::OptionalChaining));
    assert!(ScriptTarget::ESNext.supports(LanguageFeature::OptionalChaining));
}

#[test]
fn test_let_declarations_support() {
    assert!(!ScriptTarget::ES3.supports(LanguageFeature::LetDeclarations));
    assert!(!ScriptTarget::ES5.supports(LanguageFeature::LetDeclarations));
    assert!(ScriptTarget::ES2015.supports(LanguageFeature::LetDeclarations));
}

#[test]
fn test_parse_script_target() {
    assert_eq!("es5".parse::<ScriptTarget>(), Ok(ScriptTarget::ES5));
    assert_eq!("ES2019".parse::<ScriptTarget>(), Ok(ScriptTarget::ES2019));
    assert_eq!("es6".parse::<ScriptTarget>(), Ok(ScriptTarget::ES2015));
    assert_eq!("ESNext".parse::<ScriptTarget>(), Ok(ScriptTarget::ESNext));
    assert_eq!(
        "es1999".parse::<ScriptTarget>(),
        Err(UnknownScriptTarget("es1999".to_string()))
    );
}

#[test]
fn test_script_target_serde() {
    let target: ScriptTarget = serde_json::from_str("\"ES2018\"").expect("valid target");
    assert_eq!(target, ScriptTarget::ES2018);
    assert_eq!(
        serde_json::to_string(&ScriptTarget::ES2020).expect("serializable"),
        "\"es2020\""
    );
    assert!(serde_json::from_str::<ScriptTarget>("\"es4\"").is_err());
}

#[test]
fn test_feature_set() {
    let features = FeatureSet::empty().with(LanguageFeature::LetDeclarations);
    assert!(features.has(LanguageFeature::LetDeclarations));
    assert!(!features.has(LanguageFeature::OptionalChaining));

    let features = features.with(LanguageFeature::OptionalChaining);
    assert_eq!(
        features.unsupported_by(ScriptTarget::ES2015),
        FeatureSet::OPTIONAL_CHAINING
    );
    assert_eq!(
        features.unsupported_by(ScriptTarget::ES5),
        FeatureSet::OPTIONAL_CHAINING | FeatureSet::LET_DECLARATIONS
    );
    assert!(features.unsupported_by(ScriptTarget::ES2020).is_empty());
}

#[test]
fn test_supported_features_grow_with_target() {
    assert!(ScriptTarget::ES5.supported_features().is_empty());
    assert!(
        ScriptTarget::ES2020
            .supported_features()
            .contains(ScriptTarget::ES2019.supported_features())
    );
}
