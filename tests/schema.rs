use anyhow::Result;
use edn_elements::datom::{Datom, T};
use edn_elements::error::Error;
use edn_elements::registry::Input;
use edn_elements::schema::{Attribute, Cardinality, Schema, Uniqueness, ID_ATTRIBUTE};
use edn_elements::types::ElementType;
use edn_elements::value::{Builder, CollectionBuilder, Element, Serializer};

#[test]
fn datom() -> Result<()> {
    let d = Datom::new(123, 345, "this is a test", T(567), true);
    assert_eq!(d.serialize()?, "#datom [123 345 \"this is a test\" 567 true]");
    assert_eq!(d.entity_id(), 123);
    assert_eq!(d.attribute_id(), 345);
    assert!(matches!(d.value(), Input::Str(s) if s.as_str() == "this is a test"));
    assert_eq!(d.transaction(), T(567));
    assert!(d.added());

    let built = d.build()?;
    assert_eq!(built.tag(), Some("datom"));
    assert_eq!(built.len(), 5);
    assert_eq!(built.get(4i64)?, &Element::boolean(true));
    Ok(())
}

#[test]
fn datom_values() -> Result<()> {
    let d = Datom::new(1, 2, ":db.cardinality/one", T(3), false);
    assert_eq!(d.serialize()?, "#datom [1 2 :db.cardinality/one 3 false]");
    let d = Datom::new(1, 2, Element::float(0.5), T(3), true);
    assert_eq!(d.serialize()?, "#datom [1 2 5E-01 3 true]");
    let d = Datom::new(1, 2, Input::Type(ElementType::Bytes), T(3), true);
    assert!(matches!(d.serialize(), Err(Error::Cumulative(_))));
    Ok(())
}

#[test]
fn empty_schema() -> Result<()> {
    let schema = Schema::new("my/foo")?;
    assert_eq!(schema.serialize()?, "(def my/foo [])");
    assert!(matches!(Schema::new("1bad"), Err(Error::InvalidSymbol)));
    Ok(())
}

#[test]
fn schema_with_one_attribute() -> Result<()> {
    let mut schema = Schema::new("my/foo")?;
    let attr = schema.add_attribute("test", ElementType::String, Cardinality::One, None)?;
    assert_eq!(attr.name().as_deref(), Some("test"));
    assert_eq!(attr.element_type(), Some(ElementType::String));
    assert_eq!(attr.cardinality(), Some(Cardinality::One));
    assert_eq!(attr.id(), None);
    assert_eq!(attr.document(), None);

    let edn = schema.serialize()?;
    assert!(edn.starts_with("(def my/foo ["));
    assert!(edn.ends_with("])"));
    assert!(edn.contains(":db.install/_attribute :db.part/db"));
    assert!(edn.contains(":db/id #db/id [:db.part/db]"));
    assert!(edn.contains(":db/ident :test"));
    assert!(edn.contains(":db/valueType :db.type/string"));
    assert!(edn.contains(":db/cardinality :db.cardinality/one"));
    assert!(!edn.contains(":db/doc"));
    assert_eq!(schema.attributes().len(), 1);
    Ok(())
}

#[test]
fn schema_with_documentation() -> Result<()> {
    let mut schema = Schema::new("my/foo")?;
    let attr = schema.add_attribute("test", ElementType::Integer, Cardinality::Many,
                                    Some("Some doc"))?;
    assert_eq!(attr.document(), Some("Some doc"));
    let edn = schema.serialize()?;
    assert!(edn.contains(":db/doc \"Some doc\""));
    assert!(edn.contains(":db/valueType :db.type/long"));
    assert!(edn.contains(":db/cardinality :db.cardinality/many"));
    Ok(())
}

#[test]
fn schema_build_is_repeatable() -> Result<()> {
    let mut schema = Schema::new("my/foo")?;
    schema.add_attribute("a", ElementType::Keyword, Cardinality::One, None)?;
    let first = schema.build_collection()?;
    assert_eq!(first, schema.build_collection()?);
    assert_eq!(first.get(2i64)?.len(), 1);
    // the install entry is added to the built map only
    assert!(!schema.attributes()[0].serialize()?.contains("db.install"));
    Ok(())
}

#[test]
fn attribute_with_id() -> Result<()> {
    let attr = Attribute::new("test", ElementType::String, Cardinality::One, None)?
        .with_id(123)?;
    assert_eq!(attr.id(), Some(123));
    let map = attr.build_collection()?;
    assert_eq!(map.get(ID_ATTRIBUTE)?.serialize()?, "#db/id 123");
    let edn = attr.serialize()?;
    assert!(edn.starts_with("{:db/id #db/id 123, :db/ident :test"));
    Ok(())
}

#[test]
fn bad_attribute_names() {
    assert!(matches!(Attribute::new("1x", ElementType::String, Cardinality::One, None),
                     Err(Error::InvalidKeyword)));
}

#[test]
fn uniqueness_names() {
    assert_eq!(Uniqueness::Value.name(), ":db.unique/value");
    assert_eq!(Uniqueness::Identity.name(), ":db.unique/identity");
    assert_eq!(Cardinality::Many.to_string(), ":db.cardinality/many");
}
