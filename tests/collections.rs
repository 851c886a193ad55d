use dynvar::error::DynamicError;
use dynvar::var::{Kind, Var};

#[test]
fn vector_append_preserves_order_and_length() {
    let v = Var::vector();
    for n in 0..5 {
        v.append(n).expect("append ok");
    }
    assert_eq!(v.count().expect("count ok"), 5);
    for n in 0..5 {
        assert_eq!(*v.index(n).expect("index ok"), Var::from(n));
    }
}

#[test]
fn fluent_append_chains() {
    let v = Var::vector();
    v.append(1)
        .expect("append ok")
        .append("two")
        .expect("append ok")
        .append(3.0)
        .expect("append ok");
    assert_eq!(v.count().expect("count ok"), 3);
    assert_eq!(v.index(1).expect("index ok").kind(), Kind::String);
}

#[test]
fn append_rejected_on_scalars() {
    for v in [Var::NONE, Var::from(true), Var::from(1), Var::from(1.5)] {
        let err = v.append(1).unwrap_err();
        let msg = format!("{}", err);
        assert!(msg.contains("invalid append operation"), "unexpected msg: {msg}");
    }
    let err = Var::from("text").append(1).unwrap_err();
    assert!(format!("{}", err).contains("on string"));
}

#[test]
fn map_append_inserts_key_with_null_value() {
    let m = Var::map();
    m.append("key").expect("append ok");
    assert_eq!(m.count().expect("count ok"), 1);
    assert!(m.get("key").expect("get ok").is_none());
    // duplicate append leaves the existing entry unchanged
    m.insert("other", 7).expect("insert ok");
    m.append("other").expect("append ok");
    assert_eq!(*m.get("other").expect("get ok"), Var::from(7));
}

#[test]
fn map_insert_if_absent() {
    let m = Var::map();
    m.insert("a", 1).expect("insert ok");
    m.insert("a", 2).expect("insert ok");
    assert_eq!(m.count().expect("count ok"), 1);
    assert_eq!(*m.get("a").expect("get ok"), Var::from(1));
}

#[test]
fn insert_rejected_outside_maps() {
    let v = Var::vector();
    let err = v.insert("a", 1).unwrap_err();
    assert!(format!("{}", err).contains("invalid insert operation on vector"));
    let err = Var::NONE.insert("a", 1).unwrap_err();
    assert!(format!("{}", err).contains("on none"));
}

#[test]
fn count_on_strings_and_errors_on_scalars() {
    assert_eq!(Var::from("héllo").count().expect("count ok"), 5);
    assert_eq!(Var::wide("héllo").count().expect("count ok"), 5);
    for v in [Var::NONE, Var::from(false), Var::from(0), Var::from(0.0)] {
        let err = v.count().unwrap_err();
        assert!(format!("{}", err).contains("invalid count operation"));
    }
}

#[test]
fn vector_index_out_of_range() {
    for k in [0usize, 1, 5] {
        let v = Var::vector();
        for n in 0..k {
            v.append(n as i64).expect("append ok");
        }
        for bad in [-1i64, k as i64, k as i64 + 10] {
            let err = v.index(bad).unwrap_err();
            assert!(
                matches!(err, DynamicError::OutOfRange { .. }),
                "size {k}, index {bad}: {err}"
            );
            assert_eq!(v.count().expect("count ok"), k);
        }
    }
}

#[test]
fn map_integer_index_never_inserts() {
    let m = Var::map();
    m.insert(1, "one").expect("insert ok");
    assert_eq!(*m.index(1).expect("index ok"), Var::from("one"));
    let err = m.index(2).unwrap_err();
    assert!(matches!(err, DynamicError::NotFound { .. }), "got: {err}");
    assert_eq!(m.count().expect("count ok"), 1);
}

#[test]
fn map_auto_vivification() {
    let m = Var::map();
    m.insert("present", 1).expect("insert ok");
    assert!(m.index_key("absent").expect("index ok").is_none());
    assert_eq!(m.count().expect("count ok"), 2);
    // mutate through the guard, then observe the entry again
    *m.index_key("absent").expect("index ok") = Var::from(42);
    assert_eq!(*m.index_key("absent").expect("index ok"), Var::from(42));
    assert_eq!(m.count().expect("count ok"), 2);
}

#[test]
fn read_only_get_does_not_vivify() {
    let m = Var::map();
    m.insert("a", 1).expect("insert ok");
    let err = m.get("b").unwrap_err();
    assert!(format!("{}", err).contains("not found in map"));
    assert_eq!(m.count().expect("count ok"), 1);
}

#[test]
fn index_rejected_on_scalars_and_keys_on_vectors() {
    let err = Var::from(5).index(0).unwrap_err();
    assert!(format!("{}", err).contains("invalid index operation on int"));
    let v = Var::vector();
    v.append(1).expect("append ok");
    let err = v.index_key("a").unwrap_err();
    assert!(format!("{}", err).contains("invalid index-by-key operation on vector"));
    let err = Var::wide("w").get("a").unwrap_err();
    assert!(format!("{}", err).contains("invalid get operation on wstring"));
}

#[test]
fn clones_share_collections() {
    let a = Var::vector();
    a.append(1).expect("append ok");
    let b = a.clone();
    b.append(2).expect("append ok");
    assert_eq!(a.count().expect("count ok"), 2);
    assert_eq!(b.count().expect("count ok"), 2);

    let m = Var::map();
    let n = m.clone();
    n.insert("k", 9).expect("insert ok");
    assert_eq!(*m.get("k").expect("get ok"), Var::from(9));
}

#[test]
fn clones_copy_scalars() {
    let a = Var::from(1);
    let b = a.clone();
    assert_eq!(a, b);
    // replacing one leaves the other untouched
    let b = Var::from(2);
    assert_eq!(a, Var::from(1));
    assert_ne!(a, b);
}

#[test]
fn deep_copy_detaches_containers() {
    let inner = Var::vector();
    inner.append(1).expect("append ok");
    let outer = Var::vector();
    outer.append(inner.clone()).expect("append ok");

    let copy = outer.deep_copy();
    inner.append(2).expect("append ok");
    assert_eq!(outer.index(0).expect("index ok").count().expect("count ok"), 2);
    assert_eq!(copy.index(0).expect("index ok").count().expect("count ok"), 1);
}

#[test]
fn nested_indexing_through_guards() {
    let m = Var::map();
    m.insert("list", Var::vector()).expect("insert ok");
    m.get("list").expect("get ok").append("x").expect("append ok");
    m.index_key("list")
        .expect("index ok")
        .append("y")
        .expect("append ok");
    let rendered = m.to_string();
    assert_eq!(rendered, "{ 'list' : [ 'x', 'y' ] }");
}
