use std::sync::Arc;

use codec::{
    has_changed, has_changed_or_default, parse_font_name, read_bounds, PreservedStore,
    RequestParams, Session,
};
use proptest::prelude::*;
use schema::{Color, ObjectId, Point, PropertyValue, Rectangle};

fn value_strategy() -> impl Strategy<Value = PropertyValue> {
    let leaf = prop_oneof![
        Just(PropertyValue::Null),
        any::<bool>().prop_map(PropertyValue::from),
        any::<i32>().prop_map(PropertyValue::from),
        "[a-z]{0,6}".prop_map(PropertyValue::from),
        any::<(u8, u8, u8)>().prop_map(|(r, g, b)| PropertyValue::from(Color::new(r, g, b))),
        any::<(i32, i32)>().prop_map(|(x, y)| PropertyValue::from(Point::new(x, y))),
        any::<(i32, i32, i32, i32)>().prop_map(|(x, y, w, h)| PropertyValue::from(Rectangle::new(x, y, w, h))),
    ];
    leaf.prop_recursive(2, 16, 4, |inner| {
        prop::collection::vec(inner, 0..4).prop_map(PropertyValue::Array)
    })
}

/// Builds a store whose object `w1` preserved `baseline` under `p`.
fn store_with_baseline(baseline: &PropertyValue, initialized: bool) -> (PreservedStore, ObjectId) {
    let id = ObjectId::new("w1");
    let mut session = Session::new();
    session.register("w1").unwrap();
    session.begin_cycle().unwrap();
    session
        .preserve(&id)
        .unwrap()
        .preserve_property("p", baseline.clone());
    if initialized {
        session.render(&id, |_| Ok(())).unwrap();
    }
    session.commit().unwrap();
    (session.store().clone(), id)
}

proptest! {
    #[test]
    fn unchanged_value_is_never_reported(value in value_strategy()) {
        let (store, id) = store_with_baseline(&value, true);
        prop_assert!(!has_changed(&store, &id, "p", &value).unwrap());
        prop_assert!(!has_changed_or_default(&store, &id, "p", &value, &PropertyValue::Null).unwrap());
    }

    #[test]
    fn change_is_symmetric(a in value_strategy(), b in value_strategy()) {
        let (store_a, id) = store_with_baseline(&a, true);
        let (store_b, _) = store_with_baseline(&b, true);
        let forward = has_changed(&store_a, &id, "p", &b).unwrap();
        let backward = has_changed(&store_b, &id, "p", &a).unwrap();
        prop_assert_eq!(forward, backward);
        prop_assert_eq!(forward, a != b);
    }

    #[test]
    fn first_cycle_compares_with_default(
        preserved in value_strategy(),
        new in value_strategy(),
        default in value_strategy(),
    ) {
        let (store, id) = store_with_baseline(&preserved, false);
        let changed = has_changed_or_default(&store, &id, "p", &new, &default).unwrap();
        prop_assert_eq!(changed, new != default);
    }

    #[test]
    fn initialized_compares_with_preserved(
        preserved in value_strategy(),
        new in value_strategy(),
        default in value_strategy(),
    ) {
        let (store, id) = store_with_baseline(&preserved, true);
        let changed = has_changed_or_default(&store, &id, "p", &new, &default).unwrap();
        prop_assert_eq!(changed, new != preserved);
    }

    #[test]
    fn font_memo_is_stable(names in prop::collection::vec("[A-Za-z ]{1,8}", 1..4)) {
        let raw = names.join(",");
        let first = parse_font_name(&raw);
        let second = parse_font_name(&raw);
        prop_assert!(Arc::ptr_eq(&first, &second));
        prop_assert_eq!(first.len(), names.len());
        for name in first.iter() {
            prop_assert!(!name.contains('"') && !name.contains('\\'));
            prop_assert_eq!(name.trim(), name.as_str());
        }
    }

    #[test]
    fn bounds_decoding_never_panics(
        x in "\\PC{0,12}",
        width in prop::option::of("-?[0-9]{1,12}"),
    ) {
        let mut params = RequestParams::new();
        params.insert("w1.bounds.x", x.clone());
        if let Some(width) = &width {
            params.insert("w1.bounds.width", width.clone());
        }
        let default = Rectangle::new(1, 2, 3, 4);
        if let Ok(bounds) = read_bounds(&params, &ObjectId::new("w1"), &default) {
            prop_assert_eq!(bounds.y, 2);
            prop_assert_eq!(bounds.height, 4);
        }
    }
}
