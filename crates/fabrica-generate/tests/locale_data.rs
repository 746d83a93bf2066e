use fabrica_core::{Dataset, Locale};
use fabrica_generate::errors::FieldError;
use fabrica_generate::providers::default_data_root;
use fabrica_generate::{FieldEngine, Seed};

#[test]
fn region_overlay_merges_over_the_primary_dataset() {
    let root = default_data_root();
    let person = Dataset::load(&root, Locale::PtBr, "person.json").unwrap();

    // Overridden by the pt-br overlay.
    let male = person.strings(&["names", "male"]).unwrap();
    assert!(male.contains(&"Thiago".to_string()));
    assert!(!male.contains(&"João".to_string()));

    // Untouched keys survive from the pt base, even inside a merged map.
    let female = person.strings(&["names", "female"]).unwrap();
    assert!(female.contains(&"Maria".to_string()));
    assert!(person.string(&["gender", "male"]).is_ok());

    // Lists are replaced wholesale, never concatenated.
    let domains = person.strings(&["email_domains"]).unwrap();
    assert_eq!(domains.len(), 3);
    assert!(domains.contains(&"example.com.br".to_string()));
}

#[test]
fn region_locale_without_overlay_falls_back_to_primary() {
    let root = default_data_root();
    let base = Dataset::load(&root, Locale::Pt, "text.json").unwrap();
    let region = Dataset::load(&root, Locale::PtBr, "text.json").unwrap();
    assert_eq!(
        base.strings(&["words"]).unwrap(),
        region.strings(&["words"]).unwrap(),
    );
}

#[test]
fn engine_serves_region_locale_fields() {
    let mut engine = FieldEngine::new(Locale::PtBr, Seed::Number(3)).unwrap();
    assert_eq!(engine.value("address.country").unwrap().render(), "Brasil");
    let postal = engine.value("address.postal_code").unwrap();
    let postal = postal.as_str().unwrap();
    assert_eq!(postal.len(), 9);
    assert_eq!(&postal[5..6], "-");
}

#[test]
fn locale_override_is_scoped_and_restored() {
    let mut engine = FieldEngine::new(Locale::En, Seed::Number(3)).unwrap();
    assert_eq!(
        engine.value("address.country").unwrap().render(),
        "United States"
    );

    let inner = engine
        .with_locale(Locale::De, |engine| engine.value("address.country"))
        .unwrap();
    assert_eq!(inner.render(), "Deutschland");

    assert_eq!(
        engine.value("address.country").unwrap().render(),
        "United States"
    );
}

#[test]
fn locale_override_restores_after_an_inner_error() {
    let mut engine = FieldEngine::new(Locale::En, Seed::Number(3)).unwrap();
    let err = engine
        .with_locale(Locale::Es, |engine| engine.value("no_such_field"))
        .unwrap_err();
    assert!(matches!(err, FieldError::UnknownField { .. }));
    assert_eq!(
        engine.value("address.country").unwrap().render(),
        "United States"
    );
}

#[test]
fn overrides_nest() {
    let mut engine = FieldEngine::new(Locale::En, Seed::Number(3)).unwrap();
    let countries = engine
        .with_locale(Locale::Pt, |engine| {
            let outer = engine.value("address.country")?.render();
            let inner = engine
                .with_locale(Locale::De, |engine| engine.value("address.country"))?
                .render();
            let after = engine.value("address.country")?.render();
            Ok((outer, inner, after))
        })
        .unwrap();
    assert_eq!(countries.0, "Portugal");
    assert_eq!(countries.1, "Deutschland");
    assert_eq!(countries.2, "Portugal");
}

#[test]
fn locale_independent_providers_stay_usable_under_override() {
    let mut engine = FieldEngine::new(Locale::En, Seed::Number(3)).unwrap();
    let values = engine
        .with_locale(Locale::De, |engine| {
            let n = engine.value("numeric.increment")?;
            let id = engine.value("cryptographic.uuid")?;
            Ok((n, id))
        })
        .unwrap();
    assert_eq!(values.0.as_i64(), Some(1));
    assert!(values.1.as_str().is_some());
}

#[test]
fn unsupported_locale_codes_are_rejected() {
    let err = Locale::parse("xx").unwrap_err();
    assert!(err.to_string().contains("xx"));
    assert_eq!(Locale::parse("pt-br").unwrap(), Locale::PtBr);
}
