//! Properties of serialization over generated inputs. There is no
//! reader, so instead of round trips these check determinism and the
//! exact textual forms that are easy to predict.

use edn_elements::collection::{new_map, new_vector};
use edn_elements::pair::Pair;
use edn_elements::value::Element;
use proptest::prelude::*;

proptest! {
    #[test]
    fn prop_integer_is_decimal(n in any::<i64>()) {
        prop_assert_eq!(Element::integer(n).serialize().unwrap(), n.to_string());
    }

    #[test]
    fn prop_float_reads_back(x in any::<f64>().prop_filter("finite", |x| x.is_finite())) {
        let text = Element::float(x).serialize().unwrap();
        prop_assert!(text.contains('E'));
        prop_assert_eq!(text.parse::<f64>().unwrap(), x);
    }

    #[test]
    fn prop_string_is_quoted(s in any::<String>()) {
        let text = Element::string(&s).serialize().unwrap();
        prop_assert!(text.starts_with('"') && text.ends_with('"'));
        prop_assert!(!text.chars().any(|c| c.is_control()));
        prop_assert_eq!(&text, &Element::string(&s).serialize().unwrap());
    }

    #[test]
    fn prop_symbol_renders_itself(s in "[a-z][a-z0-9.*!?]{0,8}(/[a-z][a-z0-9_]{0,8})?") {
        prop_assert_eq!(Element::symbol(&[s.as_str()]).unwrap().serialize().unwrap(), s.clone());
        let keyword = format!(":{}", s);
        prop_assert_eq!(Element::keyword(&[keyword.as_str()]).unwrap().serialize().unwrap(), keyword);
    }

    #[test]
    fn prop_vector_is_idempotent(v in prop::collection::vec(any::<i64>(), 0..20)) {
        let e = new_vector(v.iter().map(|n| Element::integer(*n)).collect());
        let first = e.serialize().unwrap();
        prop_assert_eq!(&first, &e.clone().serialize().unwrap());
        let joined: Vec<String> = v.iter().map(|n| n.to_string()).collect();
        prop_assert_eq!(first, format!("[{}]", joined.join(" ")));
    }

    #[test]
    fn prop_map_keeps_insertion_order(keys in prop::collection::hash_set("[a-z]{1,6}", 0..10)) {
        let keys: Vec<String> = keys.into_iter().collect();
        let pairs = keys.iter().enumerate()
            .map(|(i, k)| Pair::new(Element::string(k), Element::integer(i as i64)))
            .collect();
        let text = new_map(pairs).unwrap().serialize().unwrap();
        let entries: Vec<String> = keys.iter().enumerate()
            .map(|(i, k)| format!("\"{}\" {}", k, i))
            .collect();
        prop_assert_eq!(text, format!("{{{}}}", entries.join(", ")));
    }
}
