use multix::{AttributeError, Attributes, Multix, MultixError, Value};

#[derive(Debug, Clone)]
struct Presen {
    twitter_id: String,
    hatena_id: String,
    title: String,
}

impl Presen {
    fn new(twitter_id: &str, hatena_id: &str, title: &str) -> Self {
        Self {
            twitter_id: twitter_id.to_string(),
            hatena_id: hatena_id.to_string(),
            title: title.to_string(),
        }
    }
}

impl Attributes for Presen {
    fn attribute(&self, name: &str) -> Option<Value> {
        match name {
            "twitter_id" => Some(Value::from(&self.twitter_id)),
            "hatena_id" => Some(Value::from(&self.hatena_id)),
            "title" => Some(Value::from(&self.title)),
            _ => None,
        }
    }

    fn set_attribute(&mut self, name: &str, value: Value) -> Result<(), AttributeError> {
        let field = match name {
            "twitter_id" => &mut self.twitter_id,
            "hatena_id" => &mut self.hatena_id,
            "title" => &mut self.title,
            _ => return Err(AttributeError::Unknown(name.to_string())),
        };
        match value {
            Value::Str(s) => {
                *field = s;
                Ok(())
            }
            other => Err(AttributeError::TypeMismatch {
                name: name.to_string(),
                expected: "str",
                found: other.type_name(),
            }),
        }
    }
}

fn talks() -> Multix<Presen> {
    Multix::builder()
        .sequenced("seq")
        .ordered_by("twitter_id", "twitter_id")
        .hashed_by("hatena_id", "hatena_id")
        .build()
        .unwrap()
}

fn by_twitter(m: &mut Multix<Presen>, id: &str) -> Option<Presen> {
    m.ordered("twitter_id")
        .unwrap()
        .lookup(&Value::from(id))
        .map(|r| r.record().clone())
}

fn by_hatena(m: &Multix<Presen>, id: &str) -> Option<Presen> {
    m.hashed("hatena_id")
        .unwrap()
        .get(&Value::from(id))
        .map(|r| r.record().clone())
}

fn seq_titles(m: &Multix<Presen>) -> Vec<String> {
    m.sequenced("seq")
        .unwrap()
        .iter()
        .map(|r| r.title.clone())
        .collect()
}

#[test]
fn presentations_end_to_end() {
    let mut m = talks();
    m.insert(Presen::new("cpp_akira", "faith_and_brave", "Boost issyuu"))
        .unwrap();
    m.insert(Presen::new("kinaba", "cafelier", "Boost.MultiIntrusivedex"))
        .unwrap();
    let foo = m.insert(Presen::new("foo", "bar", "baz")).unwrap();
    m.insert(Presen::new("melponn", "melpon", "Boost.Coroutine"))
        .unwrap();

    assert_eq!(m.get(foo).unwrap().twitter_id, "foo");
    assert_eq!(
        by_twitter(&mut m, "cpp_akira").unwrap().hatena_id,
        "faith_and_brave"
    );
    assert_eq!(by_hatena(&m, "cafelier").unwrap().twitter_id, "kinaba");
    assert_eq!(by_twitter(&mut m, "foo").unwrap().title, "baz");
    assert_eq!(by_hatena(&m, "bar").unwrap().title, "baz");
    assert_eq!(seq_titles(&m)[2], "baz");

    let found = m
        .ordered("twitter_id")
        .unwrap()
        .lookup(&Value::from("foo"))
        .unwrap()
        .id();
    assert_eq!(found, foo);
    let succ = m.successor(foo, "seq").unwrap().unwrap();
    let removed = m.remove(foo);
    assert_eq!(removed.title, "baz");

    assert!(by_twitter(&mut m, "foo").is_none());
    assert!(by_hatena(&m, "bar").is_none());
    assert_eq!(seq_titles(&m)[2], "Boost.Coroutine");
    assert_eq!(m.get(succ).unwrap().twitter_id, "melponn");

    assert!(m.insert(Presen::new("foo", "bar", "baz")).is_ok());
    assert!(matches!(
        m.insert(Presen::new("foo", "bar", "baz")),
        Err(MultixError::DuplicateKey { .. })
    ));
    assert!(m.insert(Presen::new("foo2", "bar", "baz2")).is_err());
    assert!(m.insert(Presen::new("foo", "bar2", "baz2")).is_ok());

    let mut hashed: Vec<String> = m
        .hashed("hatena_id")
        .unwrap()
        .iter()
        .map(|(_, r)| r.twitter_id.clone())
        .collect();
    let ordered: Vec<String> = m
        .ordered("twitter_id")
        .unwrap()
        .iter()
        .map(|r| r.twitter_id.clone())
        .collect();
    assert_eq!(hashed.len(), ordered.len());
    hashed.sort();
    assert_eq!(hashed, ordered);
    assert_eq!(
        ordered,
        vec!["cpp_akira", "foo", "foo", "kinaba", "melponn"]
    );

    let kinaba = m
        .ordered("twitter_id")
        .unwrap()
        .lookup(&Value::from("kinaba"))
        .unwrap()
        .id();
    let melponn = m.successor(kinaba, "twitter_id").unwrap().unwrap();
    assert_eq!(m.get(melponn).unwrap().twitter_id, "melponn");

    m.validate().unwrap();
}

#[test]
fn indexed_record_forwards_attributes() {
    let mut m = talks();
    let id = m.insert(Presen::new("a", "b", "c")).unwrap();
    let record = m.get_mut(id).unwrap();
    assert_eq!(record.attribute("hatena_id"), Some(Value::from("b")));
    record.set_attribute("title", Value::from("retitled")).unwrap();
    assert_eq!(
        record.set_attribute("title", Value::from(3)),
        Err(AttributeError::TypeMismatch {
            name: "title".to_string(),
            expected: "str",
            found: "int",
        })
    );
    assert_eq!(
        record.set_attribute("venue", Value::from("x")),
        Err(AttributeError::Unknown("venue".to_string()))
    );
    assert_eq!(m.get(id).unwrap().title, "retitled");
    m.validate().unwrap();
}

#[test]
fn attributes_are_read_only_by_default() {
    struct Fixed;
    impl Attributes for Fixed {
        fn attribute(&self, _name: &str) -> Option<Value> {
            Some(Value::from(1))
        }
    }
    let mut fixed = Fixed;
    assert_eq!(
        fixed.set_attribute("any", Value::from(2)),
        Err(AttributeError::ReadOnly("any".to_string()))
    );
}
