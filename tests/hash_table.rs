use chained_hash_table::{HashTable, TableError, TableOptions};
use std::collections::BTreeMap;
use std::sync::Mutex;

#[test]
fn put_then_get_round_trips() {
    let mut t = HashTable::new();
    t.put("alpha".to_string(), 1);
    assert_eq!(t.get("alpha"), Some(&1));
    assert!(t.contains("alpha"));
    assert_eq!(t.len(), 1);
    assert!(!t.is_empty());
}

#[test]
fn update_keeps_size() {
    let mut t = HashTable::new();
    t.put("a".to_string(), 1);
    t.put("b".to_string(), 2);
    t.put("a".to_string(), 99);
    assert_eq!(t.size(), 2);
    assert_eq!(t.get("a"), Some(&99));
}

#[test]
fn ninth_key_doubles_ten_buckets() {
    let mut t: HashTable<String, usize> = HashTable::new();
    assert_eq!(t.capacity(), 10);
    for i in 0..8 {
        t.put(format!("sym{i}"), i);
    }
    assert_eq!(t.capacity(), 10);
    t.put("sym8".to_string(), 8);
    assert_eq!(t.capacity(), 20);
    for i in 0..9 {
        assert_eq!(t.get(format!("sym{i}").as_str()), Some(&i));
    }
}

#[test]
fn missing_keys_are_not_errors() {
    let mut t: HashTable<String, i32> = HashTable::new();
    assert_eq!(t.get("nope"), None);
    assert!(!t.contains("nope"));
    assert_eq!(t.delete("nope"), None);
    assert_eq!(t.try_get(Some("nope")), Ok(None));
    assert_eq!(t.try_delete(Some("nope")), Ok(None));
}

#[test]
fn absent_key_is_invalid_argument() {
    let mut t: HashTable<String, i32> = HashTable::with_capacity(4);
    t.put("kept".to_string(), 7);

    let err = t.try_put(None, 1).unwrap_err();
    assert!(matches!(err, TableError::InvalidArgument(_)));
    assert!(matches!(
        t.try_get(None::<&str>),
        Err(TableError::InvalidArgument(_))
    ));
    assert!(matches!(
        t.try_contains(None::<&str>),
        Err(TableError::InvalidArgument(_))
    ));
    assert!(matches!(
        t.try_delete(None::<&str>),
        Err(TableError::InvalidArgument(_))
    ));

    assert_eq!(t.len(), 1);
    assert_eq!(t.get("kept"), Some(&7));
}

#[test]
fn clear_resets_contents_not_capacity() {
    let mut t: HashTable<u32, u32> = HashTable::new();
    for i in 0..30 {
        t.put(i, i);
    }
    let cap = t.capacity();
    t.clear();
    assert_eq!(t.len(), 0);
    assert!(t.is_empty());
    assert_eq!(t.capacity(), cap);
    assert!((0..30).all(|i| t.get(&i).is_none()));
    assert_eq!(t.keys().next(), None);
}

#[test]
fn keys_then_get_lists_every_pair() {
    let mut t = HashTable::with_options(TableOptions::new().with_initial_capacity(3));
    let pairs = [("x", 1), ("y", 2), ("z", 3), ("w", 4), ("v", 5)];
    for (k, v) in pairs {
        t.put(k.to_string(), v);
    }
    let listed: BTreeMap<&str, i32> = t
        .keys()
        .map(|k| (k.as_str(), *t.get(k).unwrap()))
        .collect();
    assert_eq!(listed, pairs.into_iter().collect());

    // restartable: a second traversal sees the same keys
    assert_eq!(t.keys().count(), t.keys().count());
}

#[test]
fn zero_initial_capacity_still_works() {
    let mut t: HashTable<i32, i32> = HashTable::with_capacity(0);
    assert_eq!(t.capacity(), 1);
    for i in 0..10 {
        t.put(i, -i);
    }
    assert!((0..10).all(|i| t.get(&i) == Some(&-i)));
}

#[test]
fn shared_through_external_mutex() {
    let t: Mutex<HashTable<String, i32>> = Mutex::new(HashTable::new());
    std::thread::scope(|s| {
        for n in 0..4 {
            let t = &t;
            s.spawn(move || {
                for i in 0..25 {
                    t.lock().unwrap().put(format!("{n}-{i}"), i);
                }
            });
        }
    });
    assert_eq!(t.lock().unwrap().len(), 100);
}
