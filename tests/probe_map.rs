// ProbeMap integration suite.
//
// Each test documents what behavior is being verified and which
// invariants are assumed or asserted. The core invariants exercised:
// - Round-trip: after insert(k, v), get(k) observes v's payload, kind,
//   and count.
// - Uniqueness: at most one live entry per key; overwrites do not grow
//   the table's len.
// - Tombstones: deleted slots keep probe chains intact, are reused by
//   later inserts, and never show up in iteration or dumps.
// - Growth: crossing the 0.5 load-factor boundary preserves every live
//   entry and keeps capacity a power of two.
use probemap::{CreateError, InsertError, ProbeMap, Value, ValueKind};

// Test: insert/get round-trip with typed payloads.
// Assumes: Value carries kind and count alongside the payload.
// Verifies: payload, kind, and count all survive the trip.
#[test]
fn roundtrip_preserves_payload_kind_count() {
    let mut m: ProbeMap<Value> = ProbeMap::new();
    m.insert("name", Value::from("pluto")).unwrap();
    m.insert("samples", Value::from(vec![3i16, 1, 4])).unwrap();

    let v = m.get("name").expect("name present");
    assert_eq!(v, &Value::from("pluto"));
    assert_eq!(v.kind(), ValueKind::Str);
    assert_eq!(v.count(), 1);

    let v = m.get("samples").expect("samples present");
    assert_eq!(v.kind(), ValueKind::I16);
    assert_eq!(v.count(), 3);
    assert_eq!(v.to_string(), "3 1 4");
}

// Test: overwrite semantics.
// Assumes: insert on an existing live key updates the value in place.
// Verifies: exactly one live entry remains and len counted both inserts
// as one.
#[test]
fn overwrite_leaves_single_entry() {
    let mut m: ProbeMap<Value> = ProbeMap::new();
    let len_before = m.len();
    m.insert("k", Value::from("v1")).unwrap();
    m.insert("k", Value::from(7i32)).unwrap();
    assert_eq!(m.len(), len_before + 1);
    let v = m.get("k").expect("k present");
    assert_eq!(v, &Value::from(7i32));
    assert_eq!(v.kind(), ValueKind::I32);
    assert_eq!(m.iter().count(), 1);
}

// Test: tombstone reuse nets zero.
// Assumes: remove tombstones the slot; a later insert of the same key
// reuses it.
// Verifies: after add/remove/add the new value is observed and len ends
// where the sequence started.
#[test]
fn tombstone_reuse_net_zero_len() {
    let mut m: ProbeMap<Value> = ProbeMap::new();
    m.insert("keep", Value::from(1i64)).unwrap();
    let len_before = m.len();

    m.insert("k", Value::from("v1")).unwrap();
    assert_eq!(m.remove("k"), Some(Value::from("v1")));
    m.insert("k", Value::from("v2")).unwrap();
    assert_eq!(m.get("k"), Some(&Value::from("v2")));
    m.remove("k").unwrap();

    assert_eq!(m.len(), len_before);
    assert_eq!(m.get("keep"), Some(&Value::from(1i64)));
}

// Test: deletion idempotence.
// Assumes: absent keys are a normal None outcome, not an error.
// Verifies: removing an absent key returns None and leaves len alone.
#[test]
fn remove_absent_is_none_and_len_stable() {
    let mut m: ProbeMap<i32> = ProbeMap::new();
    m.insert("a", 1).unwrap();
    assert_eq!(m.remove("ghost"), None);
    assert_eq!(m.len(), 1);
    assert_eq!(m.remove("a"), Some(1));
    assert_eq!(m.remove("a"), None);
    assert_eq!(m.len(), 0);
}

// Test: growth across multiple load-factor boundaries.
// Assumes: growth triggers before insert once len exceeds capacity / 2.
// Verifies: all N keys survive, len == N, capacity stays a power of two.
#[test]
fn growth_preserves_all_live_entries() {
    let mut m: ProbeMap<usize> = ProbeMap::with_capacity(4).unwrap();
    let n = 1000;
    for i in 0..n {
        m.insert(&format!("key-{i:04}"), i).unwrap();
    }
    assert_eq!(m.len(), n);
    assert!(m.capacity().is_power_of_two());
    for i in 0..n {
        assert_eq!(m.get(&format!("key-{i:04}")), Some(&i), "key-{i:04} lost");
    }
}

// Test: interleaved churn.
// Assumes: tombstones accumulate and get recycled by inserts and rehashes.
// Verifies: a delete-heavy workload stays consistent with the surviving
// key set.
#[test]
fn churn_keeps_live_set_consistent() {
    let mut m: ProbeMap<usize> = ProbeMap::with_capacity(4).unwrap();
    for i in 0..200 {
        m.insert(&format!("k{i}"), i).unwrap();
        // Drop every other key immediately; its slot becomes a tombstone.
        if i % 2 == 0 {
            assert_eq!(m.remove(&format!("k{i}")), Some(i));
        }
    }
    assert_eq!(m.len(), 100);
    for i in 0..200 {
        let expect = (i % 2 == 1).then_some(i);
        assert_eq!(m.get(&format!("k{i}")).copied(), expect);
    }
}

// Test: the concrete capacity-2 scenario.
// Assumes: a table created at capacity 2 grows at least once over three
// string inserts.
// Verifies: get/remove outcomes and the final len of 3.
#[test]
fn concrete_capacity_two_scenario() {
    let mut m: ProbeMap<Value> = ProbeMap::with_capacity(2).unwrap();
    m.insert("a", Value::from("pluto")).unwrap();
    m.insert("b", Value::from("xyz")).unwrap();
    m.insert("c", Value::from("paperino")).unwrap();
    assert!(m.capacity() > 2, "three inserts must force growth");

    assert_eq!(m.remove("a"), Some(Value::from("pluto")));
    m.insert("d", Value::from(112i8)).unwrap();

    assert_eq!(m.get("a"), None);
    assert_eq!(m.get("b"), Some(&Value::from("xyz")));
    assert_eq!(m.get("c"), Some(&Value::from("paperino")));
    let d = m.get("d").expect("d present");
    assert_eq!(d, &Value::from(112i8));
    assert_eq!(d.kind(), ValueKind::I8);
    assert_eq!(d.count(), 1);
    assert_eq!(m.len(), 3);
}

// Test: construction-time validation.
// Assumes: capacity must be a non-zero power of two.
// Verifies: bad capacities are rejected; no table is created.
#[test]
fn invalid_capacity_rejected() {
    assert_eq!(
        ProbeMap::<i32>::with_capacity(0).err(),
        Some(CreateError::InvalidCapacity)
    );
    assert_eq!(
        ProbeMap::<i32>::with_capacity(24).err(),
        Some(CreateError::InvalidCapacity)
    );
    assert!(ProbeMap::<i32>::with_capacity(64).is_ok());
}

// Test: empty-key precondition.
// Assumes: keys are non-empty text.
// Verifies: inserting "" fails without touching the table.
#[test]
fn empty_key_insert_fails() {
    let mut m: ProbeMap<i32> = ProbeMap::new();
    assert_eq!(m.insert("", 1), Err(InsertError::EmptyKey));
    assert!(m.is_empty());
    assert_eq!(m.get(""), None);
}

// Test: error enums integrate with the std error machinery.
// Assumes: CreateError and InsertError implement Display and Error, so
// `?` converts them into Box<dyn Error> the way the quickstart does.
// Verifies: both conversions compile and run; messages are stable.
#[test]
fn errors_convert_to_boxed_dyn_error() {
    fn quickstart() -> Result<(), Box<dyn std::error::Error>> {
        let mut m: ProbeMap<Value> = ProbeMap::with_capacity(16)?;
        m.insert("name", Value::from("pluto"))?;
        m.remove("name");
        Ok(())
    }
    quickstart().unwrap();

    let create: Box<dyn std::error::Error> = Box::new(CreateError::InvalidCapacity);
    assert_eq!(
        create.to_string(),
        "capacity must be a non-zero power of two"
    );
    let insert: Box<dyn std::error::Error> = Box::new(InsertError::EmptyKey);
    assert_eq!(insert.to_string(), "key must be non-empty");
}

// Test: diagnostic dump of a digest-keyed table.
// Assumes: the duplicate-finder workload keys entries by fixed-length hex
// digests and values by occurrence counts.
// Verifies: dump_all emits one `{ key:<k>, value:<v> }` line per live
// entry and nothing for removed ones.
#[test]
fn dump_all_digest_keys() {
    let mut m: ProbeMap<Value> = ProbeMap::with_capacity(8).unwrap();
    m.insert("690c9cb47da9ec53f99414de", Value::from(112i8))
        .unwrap();
    m.insert("06df05371981a237d0ed11472fae7c94c9ac0eff", Value::from("report.pdf"))
        .unwrap();
    m.remove("690c9cb47da9ec53f99414de").unwrap();

    let mut out = Vec::new();
    m.dump_all(&mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert_eq!(
        text,
        "{ key:06df05371981a237d0ed11472fae7c94c9ac0eff, value:report.pdf }\n"
    );
}

// Test: duplicate detection, the consuming workload shape.
// Assumes: callers key the map by content digest and treat a hit as "seen
// before".
// Verifies: first sighting of each digest inserts; repeats are detected
// via get.
#[test]
fn digest_index_detects_repeats() {
    let files = [
        ("a.txt", "da39a3ee5e6b4b0d3255bfef95601890afd80709"),
        ("b.txt", "2fd4e1c67a2d28fced849ee1bb76e7391b93eb12"),
        ("copy-of-a.txt", "da39a3ee5e6b4b0d3255bfef95601890afd80709"),
    ];

    let mut index: ProbeMap<&str> = ProbeMap::new();
    let mut duplicates = Vec::new();
    for (name, digest) in files {
        match index.get(digest) {
            Some(original) => duplicates.push((name, *original)),
            None => index.insert(digest, name).unwrap(),
        }
    }
    assert_eq!(duplicates, [("copy-of-a.txt", "a.txt")]);
    assert_eq!(index.len(), 2);
}
