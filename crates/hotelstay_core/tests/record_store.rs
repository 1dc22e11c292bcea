use hotelstay_core::{
    Booking, BookingDraft, BookingStatus, Collection, FixedClock, KeyValueStore, MemoryStore,
    RecordStore, RepoError, Room, RoomStatus, Stats, StorageError, UpdateOutcome, BOOKINGS_KEY,
    GUESTS_KEY, ROOMS_KEY,
};
use serde_json::{json, Map};

fn seeded_store() -> RecordStore<MemoryStore> {
    let store = RecordStore::with_clock(MemoryStore::new(), FixedClock(1_700_000_000_000));
    store.initialize().unwrap();
    store
}

fn room_status(store: &RecordStore<MemoryStore>, room_id: i64) -> RoomStatus {
    store.find_room(room_id).unwrap().unwrap().status
}

#[test]
fn initialize_seeds_catalog_and_empty_bookings() {
    let store = RecordStore::new(MemoryStore::new());

    let report = store.initialize().unwrap();

    assert!(report.rooms_seeded);
    assert!(report.bookings_seeded);
    let rooms = store.list_rooms().unwrap();
    assert_eq!(rooms.len(), 6);
    assert_eq!(rooms[0].number, "101");
    assert_eq!(rooms[5].status, RoomStatus::Booked);
    assert_eq!(
        store.storage().get(BOOKINGS_KEY).unwrap().as_deref(),
        Some("[]")
    );
}

#[test]
fn initialize_twice_keeps_existing_content() {
    let store = seeded_store();
    store.set_room_status(1, RoomStatus::Booked).unwrap();
    store.add_booking(BookingDraft::new(2)).unwrap();
    let rooms_before = store.storage().get(ROOMS_KEY).unwrap();
    let bookings_before = store.storage().get(BOOKINGS_KEY).unwrap();

    let report = store.initialize().unwrap();

    assert!(!report.rooms_seeded);
    assert!(!report.bookings_seeded);
    assert_eq!(store.storage().get(ROOMS_KEY).unwrap(), rooms_before);
    assert_eq!(store.storage().get(BOOKINGS_KEY).unwrap(), bookings_before);
}

#[test]
fn initialize_only_fills_missing_keys() {
    let storage = MemoryStore::with_entries([(ROOMS_KEY, "[]")]);
    let store = RecordStore::new(storage);

    let report = store.initialize().unwrap();

    assert!(!report.rooms_seeded);
    assert!(report.bookings_seeded);
    assert!(store.list_rooms().unwrap().is_empty());
}

#[test]
fn initialize_reseeds_keys_holding_empty_strings() {
    let storage = MemoryStore::with_entries([(ROOMS_KEY, ""), (BOOKINGS_KEY, "")]);
    let store = RecordStore::new(storage);

    let report = store.initialize().unwrap();

    assert!(report.rooms_seeded);
    assert!(report.bookings_seeded);
    assert_eq!(store.list_rooms().unwrap().len(), 6);
    assert_eq!(
        store.storage().get(BOOKINGS_KEY).unwrap().as_deref(),
        Some("[]")
    );
}

#[test]
fn initialize_never_touches_guests_key() {
    let store = seeded_store();

    assert!(!store.storage().contains_key(GUESTS_KEY).unwrap());
}

#[test]
fn save_rooms_then_list_rooms_preserves_order() {
    let store = seeded_store();
    let mut rooms = store.list_rooms().unwrap();
    rooms.reverse();
    rooms[0].price = 420.5;

    store.save_rooms(&rooms).unwrap();

    assert_eq!(store.list_rooms().unwrap(), rooms);
}

#[test]
fn list_reads_absent_collections_as_empty() {
    let store = RecordStore::new(MemoryStore::new());

    assert!(store.list_rooms().unwrap().is_empty());
    assert!(store.list_bookings().unwrap().is_empty());
}

#[test]
fn list_reads_malformed_collections_as_empty() {
    let storage = MemoryStore::with_entries([
        (ROOMS_KEY, "{not json"),
        (BOOKINGS_KEY, r#"[{"id": 1, "roomId": 2, "status": "lost"}]"#),
    ]);
    let store = RecordStore::new(storage);

    assert!(store.list_rooms().unwrap().is_empty());
    assert!(store.list_bookings().unwrap().is_empty());
}

#[test]
fn strict_collection_load_reports_malformed_data() {
    let storage = MemoryStore::with_entries([(ROOMS_KEY, "{not json")]);
    let rooms: Collection<'_, MemoryStore, Room> = Collection::new(&storage, ROOMS_KEY);

    let err = rooms.load().unwrap_err();

    assert!(matches!(err, RepoError::InvalidData { key, .. } if key == ROOMS_KEY));
}

#[test]
fn stored_null_reads_as_empty() {
    let storage = MemoryStore::with_entries([(ROOMS_KEY, "null")]);
    let store = RecordStore::new(storage);

    assert!(store.list_rooms().unwrap().is_empty());
}

#[test]
fn set_room_status_updates_matching_room() {
    let store = seeded_store();

    let outcome = store.set_room_status(4, RoomStatus::Booked).unwrap();

    assert_eq!(outcome, UpdateOutcome::Updated);
    assert_eq!(room_status(&store, 4), RoomStatus::Booked);
    assert_eq!(room_status(&store, 3), RoomStatus::Available);
}

#[test]
fn set_room_status_with_unknown_id_is_a_no_op() {
    let store = seeded_store();
    let before = store.list_rooms().unwrap();

    let outcome = store.set_room_status(9999, RoomStatus::Booked).unwrap();

    assert_eq!(outcome, UpdateOutcome::NotFound);
    assert_eq!(store.list_rooms().unwrap(), before);
}

#[test]
fn add_booking_forces_pending_and_books_room() {
    let store = seeded_store();
    assert_eq!(room_status(&store, 2), RoomStatus::Available);
    let draft = BookingDraft::from_json(json!({
        "roomId": 2,
        "status": "confirmed",
        "guestName": "Lina Haddad",
        "checkIn": "2026-11-02",
        "checkOut": "2026-11-05"
    }))
    .unwrap();

    let booking = store.add_booking(draft).unwrap();

    assert_eq!(booking.status, BookingStatus::Pending);
    assert_eq!(booking.room_id, 2);
    assert_eq!(booking.detail("guestName"), Some(&json!("Lina Haddad")));
    assert!(booking.detail("status").is_none());
    assert_eq!(room_status(&store, 2), RoomStatus::Booked);
    assert_eq!(store.list_bookings().unwrap(), vec![booking]);
}

#[test]
fn add_booking_assigns_increasing_ids_within_one_millisecond() {
    let store = seeded_store();

    let first = store.add_booking(BookingDraft::new(1)).unwrap();
    let second = store.add_booking(BookingDraft::new(2)).unwrap();

    assert_eq!(first.id, 1_700_000_000_000);
    assert_eq!(second.id, first.id + 1);
}

#[test]
fn add_booking_does_not_validate_room_reference() {
    let store = seeded_store();
    let rooms_before = store.list_rooms().unwrap();

    let booking = store.add_booking(BookingDraft::new(77)).unwrap();

    assert_eq!(booking.room_id, 77);
    assert_eq!(store.list_bookings().unwrap().len(), 1);
    assert_eq!(store.list_rooms().unwrap(), rooms_before);
}

#[test]
fn add_booking_accepts_string_room_id_from_form_payload() {
    let store = seeded_store();
    let draft = BookingDraft::from_json(json!({ "roomId": "3", "phone": "+971 50 000 0000" }))
        .unwrap();

    let booking = store.add_booking(draft).unwrap();

    assert_eq!(booking.room_id, 3);
    assert_eq!(room_status(&store, 3), RoomStatus::Booked);
}

#[test]
fn add_booking_drops_reserved_keys_from_hand_built_draft() {
    let store = seeded_store();
    let mut details = Map::new();
    details.insert("status".to_string(), json!("confirmed"));
    details.insert("id".to_string(), json!(7));
    details.insert("roomId".to_string(), json!(9));
    details.insert("guestName".to_string(), json!("Ana"));
    let draft = BookingDraft {
        room_id: 2,
        details,
    };

    let booking = store.add_booking(draft).unwrap();

    assert_eq!(booking.status, BookingStatus::Pending);
    assert_eq!(booking.room_id, 2);
    assert_eq!(booking.details.len(), 1);
    assert_eq!(booking.detail("guestName"), Some(&json!("Ana")));
    assert_eq!(store.list_bookings().unwrap(), vec![booking]);
    let stats = store.compute_stats().unwrap();
    assert_eq!(stats.total_bookings, 1);
    assert_eq!(stats.active_bookings, 1);
}

#[test]
fn legacy_string_room_ids_keep_booking_history() {
    let storage = MemoryStore::with_entries([(
        BOOKINGS_KEY,
        r#"[{"id": 5, "roomId": "3", "status": "confirmed", "guestName": "Omar"}]"#,
    )]);
    let store = RecordStore::with_clock(storage, FixedClock(1_000));
    store.initialize().unwrap();

    let added = store.add_booking(BookingDraft::new(1)).unwrap();
    store
        .set_booking_status(5, BookingStatus::Cancelled)
        .unwrap();

    let bookings = store.list_bookings().unwrap();
    assert_eq!(bookings.len(), 2);
    assert_eq!(bookings[0].id, 5);
    assert_eq!(bookings[0].room_id, 3);
    assert_eq!(bookings[0].status, BookingStatus::Cancelled);
    assert_eq!(bookings[0].detail("guestName"), Some(&json!("Omar")));
    assert_eq!(bookings[1], added);
    assert_eq!(room_status(&store, 3), RoomStatus::Available);
}

#[test]
fn completing_booking_releases_room() {
    let storage = MemoryStore::with_entries([(
        BOOKINGS_KEY,
        r#"[{"id": 5, "roomId": 3, "status": "confirmed", "guestName": "Omar"}]"#,
    )]);
    let store = RecordStore::new(storage);
    store.initialize().unwrap();
    store.set_room_status(3, RoomStatus::Booked).unwrap();

    let outcome = store.set_booking_status(5, BookingStatus::Completed).unwrap();

    assert_eq!(outcome, UpdateOutcome::Updated);
    assert_eq!(room_status(&store, 3), RoomStatus::Available);
    let booking = store.find_booking(5).unwrap().unwrap();
    assert_eq!(booking.status, BookingStatus::Completed);
    assert_eq!(booking.detail("guestName"), Some(&json!("Omar")));
}

#[test]
fn cancelling_releases_room_even_with_other_active_bookings() {
    let store = seeded_store();
    let first = store.add_booking(BookingDraft::new(4)).unwrap();
    store.add_booking(BookingDraft::new(4)).unwrap();

    store
        .set_booking_status(first.id, BookingStatus::Cancelled)
        .unwrap();

    assert_eq!(room_status(&store, 4), RoomStatus::Available);
}

#[test]
fn confirming_booking_keeps_room_booked() {
    let store = seeded_store();
    let booking = store.add_booking(BookingDraft::new(1)).unwrap();

    store
        .set_booking_status(booking.id, BookingStatus::Confirmed)
        .unwrap();

    assert_eq!(room_status(&store, 1), RoomStatus::Booked);
}

#[test]
fn status_transitions_are_not_validated() {
    let store = seeded_store();
    let booking = store.add_booking(BookingDraft::new(1)).unwrap();
    store
        .set_booking_status(booking.id, BookingStatus::Completed)
        .unwrap();

    let outcome = store
        .set_booking_status(booking.id, BookingStatus::Pending)
        .unwrap();

    assert!(outcome.is_updated());
    let reloaded = store.find_booking(booking.id).unwrap().unwrap();
    assert_eq!(reloaded.status, BookingStatus::Pending);
    // Reopening does not re-book the room.
    assert_eq!(room_status(&store, 1), RoomStatus::Available);
}

#[test]
fn set_booking_status_with_unknown_id_is_a_no_op() {
    let store = seeded_store();
    store.add_booking(BookingDraft::new(1)).unwrap();
    let bookings_before = store.storage().get(BOOKINGS_KEY).unwrap();
    let rooms_before = store.list_rooms().unwrap();

    let outcome = store
        .set_booking_status(42, BookingStatus::Cancelled)
        .unwrap();

    assert_eq!(outcome, UpdateOutcome::NotFound);
    assert_eq!(store.storage().get(BOOKINGS_KEY).unwrap(), bookings_before);
    assert_eq!(store.list_rooms().unwrap(), rooms_before);
}

#[test]
fn compute_stats_counts_rooms_and_active_bookings() {
    let storage = MemoryStore::with_entries([(
        BOOKINGS_KEY,
        r#"[
            {"id": 1, "roomId": 1, "status": "pending"},
            {"id": 2, "roomId": 2, "status": "confirmed"},
            {"id": 3, "roomId": 3, "status": "cancelled"}
        ]"#,
    )]);
    let store = RecordStore::new(storage);
    store.initialize().unwrap();

    let stats = store.compute_stats().unwrap();

    assert_eq!(
        stats,
        Stats {
            total_rooms: 6,
            available_rooms: 5,
            total_bookings: 3,
            active_bookings: 2,
        }
    );
}

#[test]
fn compute_stats_on_empty_store_is_zero() {
    let store = RecordStore::new(MemoryStore::new());

    assert_eq!(store.compute_stats().unwrap(), Stats::default());
}

#[test]
fn room_write_failure_after_booking_write_is_not_rolled_back() {
    let store = seeded_store();
    store.storage().reject_writes_to(ROOMS_KEY).unwrap();

    let err = store.add_booking(BookingDraft::new(2)).unwrap_err();

    assert!(matches!(
        err,
        RepoError::Storage(StorageError::WriteRejected { ref key, .. }) if key == ROOMS_KEY
    ));
    let bookings: Vec<Booking> = store.list_bookings().unwrap();
    assert_eq!(bookings.len(), 1);
    assert_eq!(room_status(&store, 2), RoomStatus::Available);
}

#[test]
fn save_rooms_propagates_storage_failure() {
    let store = seeded_store();
    store.storage().reject_writes_to(ROOMS_KEY).unwrap();

    let err = store.save_rooms(&[]).unwrap_err();

    assert!(matches!(err, RepoError::Storage(_)));
    assert_eq!(store.list_rooms().unwrap().len(), 6);
}

#[test]
fn store_is_shareable_across_threads() {
    let store = std::sync::Arc::new(seeded_store());

    let handles: Vec<_> = (1..=4)
        .map(|room_id| {
            let store = std::sync::Arc::clone(&store);
            std::thread::spawn(move || store.add_booking(BookingDraft::new(room_id)).unwrap())
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let bookings = store.list_bookings().unwrap();
    assert_eq!(bookings.len(), 4);
    let stats = store.compute_stats().unwrap();
    assert_eq!(stats.available_rooms, 1);
    assert_eq!(stats.active_bookings, 4);
}
