use multix::{
    Cursor, IndexKind, IndexSpec, KeySelector, Multix, MultixError, RecordId, Value, View,
};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;

#[derive(Debug, Clone, PartialEq)]
struct Item {
    name: String,
    rank: i64,
    tag: Option<u32>,
}

fn item(name: &str, rank: i64) -> Item {
    Item {
        name: name.to_string(),
        rank,
        tag: None,
    }
}

fn items() -> Multix<Item> {
    Multix::builder()
        .sequenced("seq")
        .ordered("rank", KeySelector::new(|i: &Item| i.rank))
        .hashed("name", KeySelector::new(|i: &Item| i.name.clone()))
        .build()
        .unwrap()
}

fn seq_names(m: &Multix<Item>) -> Vec<String> {
    m.sequenced("seq")
        .unwrap()
        .iter()
        .map(|i| i.name.clone())
        .collect()
}

fn ranks(m: &mut Multix<Item>) -> Vec<i64> {
    m.ordered("rank").unwrap().iter().map(|i| i.rank).collect()
}

#[test]
fn random_inserts_traverse_in_key_order() {
    let mut rng = Xoshiro256StarStar::seed_from_u64(42);
    let mut keys: Vec<i64> = (0..100).collect();
    keys.shuffle(&mut rng);

    let mut m = items();
    for k in keys {
        m.insert(item(&format!("n{k}"), k)).unwrap();
    }
    assert_eq!(ranks(&mut m), (0..100).collect::<Vec<_>>());
    assert_eq!(m.len(), 100);
    m.validate().unwrap();
}

#[test]
fn duplicate_hashed_key_is_rejected() {
    let mut m = Multix::builder()
        .hashed("name", KeySelector::new(|i: &Item| i.name.clone()))
        .build()
        .unwrap();
    let first = m.insert(item("bar", 1)).unwrap();
    let err = m.insert(item("bar", 2)).unwrap_err();
    assert_eq!(
        err,
        MultixError::DuplicateKey {
            index: "name".to_string(),
            key: Value::from("bar"),
        }
    );
    assert!(err.is_rejection());

    let view = m.hashed("name").unwrap();
    let found = view.get(&Value::from("bar")).unwrap();
    assert_eq!(found.id(), first);
    assert_eq!(found.rank, 1);
    assert_eq!(view.len(), 1);
}

#[test]
fn sequenced_removal_keeps_order() {
    let mut m = items();
    let ids: Vec<RecordId> = ["A", "B", "C", "D"]
        .iter()
        .enumerate()
        .map(|(n, name)| m.insert(item(name, n as i64)).unwrap())
        .collect();
    assert_eq!(m.remove(ids[1]).name, "B");
    assert_eq!(seq_names(&m), vec!["A", "C", "D"]);

    let seq = m.sequenced("seq").unwrap();
    assert_eq!(seq.first().unwrap().name, "A");
    assert_eq!(seq.last().unwrap().name, "D");
    let back: Vec<&str> = seq.iter().rev().map(|i| i.name.as_str()).collect();
    assert_eq!(back, vec!["D", "C", "A"]);
    assert_eq!(seq.iter().len(), 3);

    assert_eq!(m.successor(ids[0], "seq").unwrap(), Some(ids[2]));
    assert_eq!(m.predecessor(ids[2], "seq").unwrap(), Some(ids[0]));
    assert_eq!(m.successor(ids[3], "seq").unwrap(), None);
    assert_eq!(m.predecessor(ids[0], "seq").unwrap(), None);
    m.validate().unwrap();
}

#[test]
fn removing_the_maximum() {
    let mut m = items();
    let mut max = None;
    for k in 0..100 {
        max = Some(m.insert(item(&format!("n{k}"), k)).unwrap());
    }
    let max = max.unwrap();
    assert_eq!(m.remove(max).rank, 99);

    let mut view = m.ordered("rank").unwrap();
    assert!(view.lookup(&Value::from(99)).is_none());
    assert_eq!(view.len(), 99);
    assert_eq!(view.last().unwrap().rank, 98);
    assert_eq!(m.len(), 99);
    m.validate().unwrap();
}

#[test]
fn rejection_leaves_every_index_untouched() {
    let mut m = items();
    m.insert(item("a", 1)).unwrap();
    m.insert(item("b", 2)).unwrap();

    // The hashed index is registered last, so the sequenced and ordered
    // indexes have already admitted the record when it is rejected.
    let rejected = m.try_insert(item("a", 3)).unwrap_err();
    assert_eq!(rejected.record, item("a", 3));
    assert!(matches!(rejected.error, MultixError::DuplicateKey { .. }));
    assert_eq!(rejected.to_string(), "index \"name\" already holds key \"a\"");

    assert_eq!(m.len(), 2);
    assert_eq!(seq_names(&m), vec!["a", "b"]);
    assert_eq!(ranks(&mut m), vec![1, 2]);
    assert_eq!(m.hashed("name").unwrap().len(), 2);
    m.validate().unwrap();

    let back = rejected.into_record();
    assert_eq!(back.rank, 3);
}

#[test]
fn missing_key_is_rejected() {
    let mut m = Multix::builder()
        .sequenced("seq")
        .ordered("tag", KeySelector::optional(|i: &Item| i.tag.map(Value::from)))
        .build()
        .unwrap();
    m.insert(Item {
        tag: Some(7),
        ..item("tagged", 0)
    })
    .unwrap();

    let rejected = m.try_insert(item("untagged", 0)).unwrap_err();
    assert_eq!(
        rejected.error,
        MultixError::MissingKey {
            index: "tag".to_string()
        }
    );
    assert_eq!(rejected.record.name, "untagged");
    assert_eq!(m.len(), 1);
    assert_eq!(m.sequenced("seq").unwrap().len(), 1);
    m.validate().unwrap();
}

#[test]
fn lookup_errors() {
    let mut m = items();
    let id = m.insert(item("a", 1)).unwrap();

    assert_eq!(
        m.successor(id, "nope"),
        Err(MultixError::UnknownIndex("nope".to_string()))
    );
    assert_eq!(
        m.predecessor(id, "name"),
        Err(MultixError::NoNavigation("name".to_string()))
    );
    assert_eq!(
        m.successor(id, "name"),
        Err(MultixError::NoNavigation("name".to_string()))
    );
    assert!(matches!(
        m.view("missing"),
        Err(MultixError::UnknownIndex(_))
    ));
    assert_eq!(
        m.hashed("rank").err(),
        Some(MultixError::IndexKindMismatch {
            index: "rank".to_string(),
            expected: IndexKind::Hashed,
            found: IndexKind::Ordered,
        })
    );
    assert!(matches!(
        m.ordered("seq"),
        Err(MultixError::IndexKindMismatch {
            found: IndexKind::Sequenced,
            ..
        })
    ));
    assert!(m.sequenced("name").is_err());
}

#[test]
fn duplicate_index_names_fail_to_build() {
    let err = Multix::<Item>::builder()
        .sequenced("x")
        .hashed("x", KeySelector::new(|i: &Item| i.rank))
        .build()
        .unwrap_err();
    assert_eq!(err, MultixError::DuplicateIndex("x".to_string()));
}

#[test]
fn construct_from_specs() {
    let specs = vec![
        IndexSpec::sequenced("seq"),
        IndexSpec::hashed("name", KeySelector::new(|i: &Item| i.name.clone())),
        IndexSpec::ordered("rank", KeySelector::new(|i: &Item| i.rank)),
    ];
    assert_eq!(specs[1].name(), "name");
    assert_eq!(specs[2].kind(), IndexKind::Ordered);

    let m = Multix::new(specs).unwrap();
    assert_eq!(m.index_names().collect::<Vec<_>>(), vec!["seq", "name", "rank"]);
    assert_eq!(m.index_kind("rank"), Some(IndexKind::Ordered));
    assert_eq!(m.index_kind("other"), None);
    assert!(m.is_empty());
}

#[test]
fn cursors_follow_registration_order() {
    let mut m = items();
    let id = m.insert(item("a", 1)).unwrap();
    let cursors = m.get(id).unwrap().cursors();
    assert_eq!(cursors.len(), 3);
    assert!(matches!(cursors[0], Cursor::Sequenced(_)));
    assert!(matches!(cursors[1], Cursor::Ordered(_)));
    assert_eq!(cursors[2], Cursor::Hashed);
    assert!(cursors.iter().all(Cursor::is_attached));
}

#[test]
fn removed_ids_go_stale() {
    let mut m = items();
    let a = m.insert(item("a", 1)).unwrap();
    m.remove(a);
    assert!(!m.contains(a));
    assert!(m.get(a).is_none());

    // The slot is reused, the id is not.
    let b = m.insert(item("a", 1)).unwrap();
    assert_ne!(a, b);
    assert!(m.contains(b));
    assert!(m.get(a).is_none());
}

#[test]
#[should_panic(expected = "not in the container")]
fn removing_twice_panics() {
    let mut m = items();
    let a = m.insert(item("a", 1)).unwrap();
    m.remove(a);
    m.remove(a);
}

#[test]
#[should_panic(expected = "not in the container")]
fn navigating_from_a_removed_record_panics() {
    let mut m = items();
    let a = m.insert(item("a", 1)).unwrap();
    m.insert(item("b", 2)).unwrap();
    m.remove(a);
    let _ = m.successor(a, "seq");
}

#[test]
fn views_by_name() {
    let mut m = Multix::builder()
        .with_capacity(16)
        .sequenced("seq")
        .ordered("rank", KeySelector::new(|i: &Item| i.rank))
        .hashed("name", KeySelector::new(|i: &Item| i.name.clone()))
        .build()
        .unwrap();
    let c = m.insert(item("c", 3)).unwrap();
    let a = m.insert(item("a", 1)).unwrap();
    let b = m.insert(item("b", 2)).unwrap();

    let view = m.view("rank").unwrap();
    assert_eq!(view.kind(), IndexKind::Ordered);
    assert_eq!(view.len(), 3);
    assert_eq!(view.ids(), vec![a, b, c]);

    let view = m.view("seq").unwrap();
    assert_eq!(view.ids(), vec![c, a, b]);
    assert!(view.into_hashed().is_none());

    let view = m.view("name").unwrap();
    let mut ids = view.ids();
    ids.sort();
    let mut expected = vec![a, b, c];
    expected.sort();
    assert_eq!(ids, expected);

    match m.view("rank").unwrap() {
        View::Ordered(mut ordered) => {
            assert_eq!(ordered.lookup(&Value::from(2)).unwrap().id(), b);
            let entries: Vec<(Value, RecordId)> = ordered
                .entries()
                .map(|(k, r)| (k.clone(), r.id()))
                .collect();
            assert_eq!(
                entries,
                vec![(Value::from(1), a), (Value::from(2), b), (Value::from(3), c)]
            );
            assert!(ordered.dump().contains("(node"));
        }
        _ => panic!("rank is ordered"),
    }
}

#[test]
fn hashed_view_iteration() {
    let mut m = items();
    for (n, name) in ["x", "y", "z"].iter().enumerate() {
        m.insert(item(name, n as i64)).unwrap();
    }
    let view = m.hashed("name").unwrap();
    let mut pairs: Vec<(String, i64)> = view
        .iter()
        .map(|(k, r)| (k.as_str().unwrap().to_string(), r.rank))
        .collect();
    pairs.sort();
    assert_eq!(
        pairs,
        vec![
            ("x".to_string(), 0),
            ("y".to_string(), 1),
            ("z".to_string(), 2)
        ]
    );
    assert!(view.contains_key(&Value::from("y")));
    assert!(!view.contains_key(&Value::from("w")));
    assert!(!view.is_empty());
}

#[test]
fn records_navigate_across_indexes() {
    let mut m = items();
    let ids: Vec<RecordId> = [("d", 4), ("b", 2), ("a", 1), ("c", 3)]
        .iter()
        .map(|(name, rank)| m.insert(item(name, *rank)).unwrap())
        .collect();

    // Found through the hashed index, walked in the other two.
    let b = m.hashed("name").unwrap().get(&Value::from("b")).unwrap().id();
    assert_eq!(b, ids[1]);
    assert_eq!(m.successor(b, "rank").unwrap(), Some(ids[3]));
    assert_eq!(m.predecessor(b, "rank").unwrap(), Some(ids[2]));
    assert_eq!(m.successor(b, "seq").unwrap(), Some(ids[2]));
    assert_eq!(m.predecessor(b, "seq").unwrap(), Some(ids[0]));

    for &id in &ids {
        for index in ["seq", "rank"] {
            if let Some(next) = m.successor(id, index).unwrap() {
                assert_eq!(m.predecessor(next, index).unwrap(), Some(id));
            }
        }
    }
}

#[test]
fn remove_every_record_in_random_order() {
    let mut rng = Xoshiro256StarStar::seed_from_u64(3);
    let mut m = items();
    let mut ids: Vec<RecordId> = (0..200)
        .map(|k| m.insert(item(&format!("n{k}"), k % 17)).unwrap())
        .collect();
    ids.shuffle(&mut rng);
    for (removed, id) in ids.into_iter().enumerate() {
        m.remove(id);
        if removed % 20 == 0 {
            m.validate().unwrap();
        }
    }
    assert!(m.is_empty());
    assert!(m.sequenced("seq").unwrap().first().is_none());
    assert!(m.ordered("rank").unwrap().first().is_none());
    assert_eq!(m.ordered("rank").unwrap().dump(), "∅");
    m.validate().unwrap();
}

#[test]
fn entries_walk_their_neighbours() {
    let mut m = items();
    let ids: Vec<RecordId> = [("d", 4), ("b", 2), ("a", 1), ("c", 3)]
        .iter()
        .map(|(name, rank)| m.insert(item(name, *rank)).unwrap())
        .collect();

    let b = m.entry(ids[1]).unwrap();
    assert_eq!(b.id(), ids[1]);
    assert_eq!(b.name, "b");
    assert_eq!(b.record().rank, 2);

    let mut by_rank = Vec::new();
    let mut cursor = m.entry(ids[2]);
    while let Some(entry) = cursor {
        by_rank.push(entry.name.clone());
        cursor = entry.successor("rank").unwrap();
    }
    assert_eq!(by_rank, vec!["a", "b", "c", "d"]);

    let mut seq_back = Vec::new();
    let mut cursor = m.entry(ids[3]);
    while let Some(entry) = cursor {
        seq_back.push(entry.rank);
        cursor = entry.predecessor("seq").unwrap();
    }
    assert_eq!(seq_back, vec![3, 1, 2, 4]);

    assert_eq!(
        b.successor("name").err(),
        Some(MultixError::NoNavigation("name".to_string()))
    );
    assert_eq!(
        b.predecessor("other").err(),
        Some(MultixError::UnknownIndex("other".to_string()))
    );

    m.remove(ids[0]);
    assert!(m.entry(ids[0]).is_none());
    assert_eq!(m.entry(ids[1]).unwrap().predecessor("seq").unwrap().map(|e| e.id()), None);
}
