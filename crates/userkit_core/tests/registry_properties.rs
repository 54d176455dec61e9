use proptest::prelude::*;
use std::collections::HashMap;
use userkit_core::UserRegistry;

#[derive(Debug, Clone)]
enum Op {
    Add(u8, String),
    Remove(u8),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (any::<u8>(), "[a-z]{1,8}").prop_map(|(key, value)| Op::Add(key, value)),
        any::<u8>().prop_map(Op::Remove),
    ]
}

proptest! {
    #[test]
    fn add_to_absent_key_then_get_returns_value(key in "[a-z]{1,12}", value in "[a-z0-9@.]{1,24}") {
        let mut users: UserRegistry = UserRegistry::new();
        prop_assert!(users.add(key.clone(), value.clone()).is_ok());
        prop_assert_eq!(users.get(key.as_str()), Some(&value));
    }

    #[test]
    fn duplicate_add_never_overwrites(key in any::<i64>(), first in "[a-z]{1,8}", second in "[a-z]{1,8}") {
        let mut names: UserRegistry<i64> = UserRegistry::new();
        names.add(key, first.clone()).unwrap();

        let err = names.add(key, second).unwrap_err();
        prop_assert_eq!(err.key, key);
        prop_assert_eq!(names.get(&key), Some(&first));
    }

    #[test]
    fn remove_then_get_is_absent(present in any::<bool>(), key in any::<i64>()) {
        let mut names: UserRegistry<i64> = UserRegistry::new();
        if present {
            names.add(key, "someone".to_string()).unwrap();
        }

        names.remove(&key);
        prop_assert!(names.get(&key).is_none());
    }

    #[test]
    fn behaves_like_insert_if_absent_map(ops in prop::collection::vec(op_strategy(), 0..64)) {
        let mut registry: UserRegistry<u8> = UserRegistry::new();
        let mut model: HashMap<u8, String> = HashMap::new();

        for op in ops {
            match op {
                Op::Add(key, value) => {
                    let expected_ok = !model.contains_key(&key);
                    prop_assert_eq!(registry.add(key, value.clone()).is_ok(), expected_ok);
                    model.entry(key).or_insert(value);
                }
                Op::Remove(key) => {
                    prop_assert_eq!(registry.remove(&key), model.remove(&key));
                }
            }
        }

        prop_assert_eq!(registry.len(), model.len());
        for (key, value) in &model {
            prop_assert_eq!(registry.get(key), Some(value));
        }
    }
}
