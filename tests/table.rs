//! Resource table integration tests.
//!
//! Drives a table through the steps of a small build: values from several source files,
//! public declarations, file references interned into a pool, then optimization.

use resforge::prelude::*;

fn int(data: i32, path: &str, line: usize) -> Value {
    Value::new(ValueKind::Primitive(BinaryPrimitive::int(data)))
        .with_source(Source::with_line(path, line))
}

fn config(qualifiers: &str) -> ConfigDescription {
    ConfigDescription::parse_checked(qualifiers).unwrap()
}

#[test]
fn test_collisions_are_reported_with_both_sources() -> Result<()> {
    let mut table = ResourceTable::new();
    let diag = Diagnostics::new();
    let name: ResourceName = "com.example:integer/columns".parse()?;

    assert!(table.add_resource(&name, &config("land"), "", int(3, "values-land/a.xml", 4), &diag));
    assert!(!table.add_resource(&name, &config("land"), "", int(4, "values-land/b.xml", 9), &diag));

    assert_eq!(diag.error_count(), 2);
    let errors = diag.errors();
    assert_eq!(errors[0].category, DiagnosticCategory::Collision);
    assert_eq!(errors[0].source, Some(Source::with_line("values-land/b.xml", 9)));
    assert_eq!(errors[1].source, Some(Source::with_line("values-land/a.xml", 4)));

    let (_, _, entry) = table
        .find_resource(&name)
        .ok_or_else(|| Error::Error("entry missing".to_string()))?;
    assert_eq!(entry.values().len(), 1);
    Ok(())
}

#[test]
fn test_ids_and_visibility() -> Result<()> {
    let mut table = ResourceTable::new();
    let diag = Diagnostics::new();
    let name: ResourceName = "com.example:string/app_name".parse()?;
    let id = ResourceId::from_parts(0x7f, 0x03, 0x0001);

    let symbol = Symbol::new(Visibility::Public).with_source(Source::new("public.xml"));
    assert!(table.set_symbol_state(&name, Some(id), &symbol, &diag));

    let package = table
        .find_package_by_id(0x7f)
        .ok_or_else(|| Error::Error("package missing".to_string()))?;
    assert_eq!(package.name(), "com.example");

    let (_, ty, entry) = table
        .find_resource(&name)
        .ok_or_else(|| Error::Error("entry missing".to_string()))?;
    assert_eq!(ty.id, Some(0x03));
    assert_eq!(ty.visibility, Visibility::Public);
    assert_eq!(entry.id, Some(0x0001));
    assert_eq!(entry.symbol.state, Visibility::Public);

    let other: ResourceName = "com.example:string/other".parse()?;
    let clash = ResourceId::from_parts(0x7e, 0x03, 0x0002);
    assert!(!table.set_symbol_state(&other, Some(clash), &Symbol::default(), &diag));
    assert!(diag.has_errors());
    assert!(table.find_resource(&other).is_none());
    Ok(())
}

#[test]
fn test_build_then_optimize() -> Result<()> {
    let mut table = ResourceTable::new();
    let mut pool = StringPool::new();
    let diag = Diagnostics::new();

    let columns: ResourceName = "com.example:integer/columns".parse()?;
    table.add_resource(&columns, &config(""), "", int(2, "values/ints.xml", 2), &diag);
    table.add_resource(&columns, &config("land"), "", int(2, "values-land/ints.xml", 2), &diag);
    table.add_resource(&columns, &config("night"), "", int(2, "values-night/ints.xml", 2), &diag);
    table.add_resource(&columns, &config("sw600dp"), "", int(4, "values-sw600dp/ints.xml", 2), &diag);

    let icon: ResourceName = "com.example:drawable/icon".parse()?;
    for qualifiers in ["hdpi", "xhdpi"] {
        let config = config(qualifiers);
        let path = format!("res/drawable-{config}/icon.png");
        assert!(table.add_file_reference(
            &icon,
            &config,
            &Source::new(path.clone()),
            &path,
            &mut pool,
            &diag,
        ));
    }
    assert!(!diag.has_any());

    let optimize = OptimizeConfig::aggressive()
        .with_excluded(&["night"])?
        .with_verbose(true);
    let stats = Optimizer::new(optimize).run(&mut table, &diag);

    assert_eq!(stats.excluded, 1);
    assert!(!diag.has_errors());
    assert!(!diag.by_category(DiagnosticCategory::Optimize).is_empty());

    let (_, _, entry) = table
        .find_resource(&columns)
        .ok_or_else(|| Error::Error("entry missing".to_string()))?;
    assert!(entry.find_value(&config("night"), "").is_none());
    assert!(entry.find_value(&config("sw600dp"), "").is_some());

    let (_, _, entry) = table
        .find_resource(&icon)
        .ok_or_else(|| Error::Error("entry missing".to_string()))?;
    assert_eq!(entry.values().len(), 2);

    pool.sort_by_context();
    let bytes = StringPool::flatten(&pool, true)?;
    let view = StringPoolView::from(&bytes)?;
    assert_eq!(view.len(), 2);
    assert_eq!(view.get(0)?, "res/drawable-hdpi-v4/icon.png");
    Ok(())
}
