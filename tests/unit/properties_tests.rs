/*!
 * Tests for the property schema manager and string pool
 */

use std::sync::Arc;
use std::thread;

use tmxgrid::{PropertySchema, StringPool};

#[test]
fn test_propertySchema_indexOf_underConcurrency_shouldStayConsistent() {
    let schema = PropertySchema::new();
    let keys = ["creationdate", "creationid", "changedate", "changeid", "usagecount"];

    thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                for key in keys {
                    let _ = schema.index_of(key);
                }
            });
        }
    });

    // every key got exactly one index, and lookups are stable
    assert_eq!(schema.len(), keys.len());
    let snapshot = schema.keys();
    for (index, info) in snapshot.iter().enumerate() {
        assert_eq!(schema.index_of(&info.key), index);
    }
}

#[test]
fn test_propertySchema_put_shouldGrowSlotsAndShadow() {
    let schema = PropertySchema::new();
    let pool = StringPool::new();
    let mut slots = Vec::new();

    schema.put(&mut slots, "client", pool.intern("acme"));
    schema.put(&mut slots, "subject", pool.intern("letters"));
    assert_eq!(slots.len(), 2);

    // unit-level value shadowed by a later segment-level one
    schema.put(&mut slots, "client", pool.intern("globex"));
    assert_eq!(slots[schema.index_of("client")].as_deref(), Some("globex"));
    assert_eq!(slots[schema.index_of("subject")].as_deref(), Some("letters"));
}

#[test]
fn test_stringPool_intern_withRepeatedValues_shouldDedupe() {
    let pool = StringPool::new();

    let first = pool.intern("Alignment");
    for _ in 0..100 {
        let again = pool.intern("Alignment");
        assert!(Arc::ptr_eq(&first, &again));
    }
    assert_eq!(pool.len(), 1);

    let other = pool.intern("Interactive");
    assert!(!Arc::ptr_eq(&first, &other));
    assert_eq!(pool.len(), 2);
}
