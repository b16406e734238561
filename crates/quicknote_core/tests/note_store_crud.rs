use quicknote_core::{
    BackendKind, FlatNoteBackend, ManualClock, MemoryKeyValueStore, NoteStore, StoreConfig,
    StoreError,
};

/// Runs `check` against a fresh store on each backend.
fn for_each_backend(check: impl Fn(&mut NoteStore, &ManualClock)) {
    let clock = ManualClock::at_ms(1_700_000_000_000);
    let mut structured =
        NoteStore::initialize_with_clock(&StoreConfig::in_memory(), clock.clone()).unwrap();
    assert_eq!(structured.backend_kind(), BackendKind::Structured);
    check(&mut structured, &clock);

    let clock = ManualClock::at_ms(1_700_000_000_000);
    let mut flat = NoteStore::with_backend(
        FlatNoteBackend::new(MemoryKeyValueStore::new()),
        clock.clone(),
    );
    assert_eq!(flat.backend_kind(), BackendKind::Flat);
    check(&mut flat, &clock);
}

#[test]
fn add_creates_exactly_one_note_with_equal_timestamps() {
    for_each_backend(|store, _| {
        let before = store.list().unwrap();
        let created = store.add("Buy milk").unwrap().unwrap();

        let after = store.list().unwrap();
        assert_eq!(after.len(), before.len() + 1);
        assert_eq!(after[0], created);
        assert_eq!(created.text, "Buy milk");
        assert_eq!(created.created_at, created.updated_at);
    });
}

#[test]
fn blank_add_is_ignored() {
    for_each_backend(|store, _| {
        store.add("existing").unwrap();
        let before = store.list().unwrap();

        assert_eq!(store.add("").unwrap(), None);
        assert_eq!(store.add("   \n\t").unwrap(), None);
        assert_eq!(store.list().unwrap(), before);
    });
}

#[test]
fn update_preserves_identity_and_creation_time() {
    for_each_backend(|store, clock| {
        let created = store.add("draft").unwrap().unwrap();
        clock.advance_ms(5_000);

        let updated = store.update(created.id, "final").unwrap().unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(updated.text, "final");
        assert_eq!(updated.updated_at, created.updated_at + 5_000);
        assert_eq!(store.get(created.id).unwrap(), Some(updated));
    });
}

#[test]
fn update_never_moves_updated_at_backwards() {
    for_each_backend(|store, clock| {
        let created = store.add("draft").unwrap().unwrap();
        clock.set_ms(created.updated_at - 60_000);

        let updated = store.update(created.id, "final").unwrap().unwrap();
        assert!(updated.updated_at >= created.updated_at);
        assert!(updated.updated_at >= updated.created_at);
    });
}

#[test]
fn update_of_missing_note_is_not_found() {
    for_each_backend(|store, _| {
        let err = store.update(424_242, "text").unwrap_err();
        assert!(matches!(err, StoreError::NotFound(424_242)));
    });
}

#[test]
fn remove_is_idempotent() {
    for_each_backend(|store, _| {
        let keep = store.add("keep").unwrap().unwrap();
        let gone = store.add("gone").unwrap().unwrap();

        assert!(store.remove(gone.id).unwrap());
        assert_eq!(store.list().unwrap(), vec![keep.clone()]);

        assert!(!store.remove(gone.id).unwrap());
        assert_eq!(store.list().unwrap(), vec![keep]);
    });
}

#[test]
fn list_is_reverse_insertion_order_and_edits_do_not_reorder() {
    for_each_backend(|store, clock| {
        let a = store.add("A").unwrap().unwrap();
        clock.advance_ms(1);
        store.add("B").unwrap();
        clock.advance_ms(1);
        store.add("C").unwrap();

        let texts: Vec<String> = store.list().unwrap().into_iter().map(|n| n.text).collect();
        assert_eq!(texts, ["C", "B", "A"]);

        clock.advance_ms(10_000);
        store.update(a.id, "A edited").unwrap();
        let texts: Vec<String> = store.list().unwrap().into_iter().map(|n| n.text).collect();
        assert_eq!(texts, ["C", "B", "A edited"]);
    });
}

#[test]
fn ids_are_unique_when_notes_arrive_in_the_same_millisecond() {
    for_each_backend(|store, _| {
        let first = store.add("one").unwrap().unwrap();
        let second = store.add("two").unwrap().unwrap();
        assert_ne!(first.id, second.id);
    });
}

#[test]
fn buy_milk_scenario() {
    for_each_backend(|store, clock| {
        let created = store.add("Buy milk").unwrap().unwrap();
        let listed = store.list().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].text, "Buy milk");
        assert_eq!(listed[0].created_at, listed[0].updated_at);

        clock.advance_ms(30_000);
        store.update(created.id, "Buy oat milk").unwrap();
        let listed = store.list().unwrap();
        assert_eq!(listed[0].text, "Buy oat milk");
        assert_eq!(listed[0].created_at, created.created_at);

        store.remove(created.id).unwrap();
        assert!(store.list().unwrap().is_empty());
    });
}
