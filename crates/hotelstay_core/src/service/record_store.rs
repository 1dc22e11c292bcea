//! Record store use-case service.
//!
//! # Responsibility
//! - Provide the CRUD entry points UI code calls for rooms and bookings.
//! - Apply the booking-to-room status coupling rules.
//!
//! # Invariants
//! - No records are cached; every call re-reads the collections it touches.
//! - Creating a booking marks its room `booked`.
//! - Cancelling or completing a booking marks its room `available`, even when
//!   other active bookings still reference that room.
//! - The booking write and the follow-up room write are separate; a failure
//!   between them is not rolled back.
//! - Unknown ids on updates are reported as `UpdateOutcome::NotFound`, never
//!   as errors, and never trigger a write.

use crate::id::{next_booking_id, Clock, SystemClock};
use crate::model::booking::{Booking, BookingDraft, BookingId, BookingStatus};
use crate::model::room::{Room, RoomId, RoomStatus};
use crate::model::stats::Stats;
use crate::repo::collection::{Collection, RepoError, RepoResult};
use crate::service::seed::seed_rooms;
use crate::storage::{KeyValueStore, StorageError, BOOKINGS_KEY, ROOMS_KEY};
use log::{debug, info};
use std::sync::{Mutex, MutexGuard};

/// Result of an update addressed by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    Updated,
    NotFound,
}

impl UpdateOutcome {
    pub fn is_updated(self) -> bool {
        self == Self::Updated
    }
}

/// What `RecordStore::initialize` wrote.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub rooms_seeded: bool,
    pub bookings_seeded: bool,
}

/// Data-access object over the rooms and bookings collections.
///
/// Read-modify-write cycles issued through one `RecordStore` are serialized.
/// Other writers sharing the same medium are not coordinated with; the last
/// write wins.
pub struct RecordStore<S: KeyValueStore> {
    storage: S,
    clock: Box<dyn Clock>,
    write_lock: Mutex<()>,
}

impl<S: KeyValueStore> RecordStore<S> {
    /// Creates a store over `storage` using the wall clock for booking ids.
    pub fn new(storage: S) -> Self {
        Self::with_clock(storage, SystemClock)
    }

    /// Creates a store with an explicit time source for booking ids.
    pub fn with_clock(storage: S, clock: impl Clock + 'static) -> Self {
        Self {
            storage,
            clock: Box::new(clock),
            write_lock: Mutex::new(()),
        }
    }

    /// Returns the underlying storage medium.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Seeds default data for keys that are absent.
    ///
    /// Idempotent: existing collections, including `[]` or malformed ones,
    /// are left untouched. A key holding an empty string counts as absent.
    pub fn initialize(&self) -> RepoResult<SeedReport> {
        let _guard = self.exclusive()?;
        let mut report = SeedReport::default();

        let rooms = self.rooms();
        if !rooms.exists()? {
            rooms.save(&seed_rooms())?;
            report.rooms_seeded = true;
        }

        let bookings = self.bookings();
        if !bookings.exists()? {
            bookings.save(&[])?;
            report.bookings_seeded = true;
        }

        info!(
            "event=store_init module=service status=ok rooms_seeded={} bookings_seeded={}",
            report.rooms_seeded, report.bookings_seeded
        );
        Ok(report)
    }

    /// Lists all rooms in stored order. Absent or malformed data reads as empty.
    pub fn list_rooms(&self) -> RepoResult<Vec<Room>> {
        self.rooms().load_or_empty()
    }

    /// Overwrites the whole rooms collection.
    pub fn save_rooms(&self, rooms: &[Room]) -> RepoResult<()> {
        let _guard = self.exclusive()?;
        self.rooms().save(rooms)
    }

    /// Returns one room by id.
    pub fn find_room(&self, room_id: RoomId) -> RepoResult<Option<Room>> {
        Ok(self
            .list_rooms()?
            .into_iter()
            .find(|room| room.id == room_id))
    }

    /// Sets the status of the first room whose id matches.
    pub fn set_room_status(&self, room_id: RoomId, status: RoomStatus) -> RepoResult<UpdateOutcome> {
        let _guard = self.exclusive()?;
        self.write_room_status(room_id, status)
    }

    /// Lists all bookings in creation order. Absent or malformed data reads as
    /// empty.
    pub fn list_bookings(&self) -> RepoResult<Vec<Booking>> {
        self.bookings().load_or_empty()
    }

    /// Returns one booking by id.
    pub fn find_booking(&self, booking_id: BookingId) -> RepoResult<Option<Booking>> {
        Ok(self
            .list_bookings()?
            .into_iter()
            .find(|booking| booking.id == booking_id))
    }

    /// Creates a `pending` booking and marks its room `booked`.
    ///
    /// # Contract
    /// - Assigns a fresh id greater than every stored booking id.
    /// - Caller fields are kept verbatim; `room_id` is not validated.
    /// - Returns the stored record.
    pub fn add_booking(&self, draft: BookingDraft) -> RepoResult<Booking> {
        let _guard = self.exclusive()?;

        let collection = self.bookings();
        let mut bookings = collection.load_or_empty()?;
        let id = next_booking_id(
            self.clock.now_millis(),
            bookings.iter().map(|booking| booking.id),
        );
        let booking = Booking::from_draft(id, draft);
        bookings.push(booking.clone());
        collection.save(&bookings)?;

        info!(
            "event=booking_create module=service status=ok booking_id={} room_id={}",
            booking.id, booking.room_id
        );

        self.write_room_status(booking.room_id, RoomStatus::Booked)?;
        Ok(booking)
    }

    /// Sets the status of the first booking whose id matches.
    ///
    /// Moving to `cancelled` or `completed` also marks the booking's room
    /// `available`.
    pub fn set_booking_status(
        &self,
        booking_id: BookingId,
        status: BookingStatus,
    ) -> RepoResult<UpdateOutcome> {
        let _guard = self.exclusive()?;

        let collection = self.bookings();
        let mut bookings = collection.load_or_empty()?;
        let Some(booking) = bookings.iter_mut().find(|booking| booking.id == booking_id) else {
            debug!(
                "event=booking_status module=service status=skip booking_id={} reason=not_found",
                booking_id
            );
            return Ok(UpdateOutcome::NotFound);
        };

        let previous = booking.status;
        booking.status = status;
        let room_id = booking.room_id;
        collection.save(&bookings)?;

        info!(
            "event=booking_status module=service status=ok booking_id={} from={} to={}",
            booking_id,
            previous.as_str(),
            status.as_str()
        );

        if status.releases_room() {
            self.write_room_status(room_id, RoomStatus::Available)?;
        }
        Ok(UpdateOutcome::Updated)
    }

    /// Counts rooms and bookings from fresh reads.
    pub fn compute_stats(&self) -> RepoResult<Stats> {
        let rooms = self.list_rooms()?;
        let bookings = self.list_bookings()?;
        Ok(Stats::from_records(&rooms, &bookings))
    }

    fn write_room_status(&self, room_id: RoomId, status: RoomStatus) -> RepoResult<UpdateOutcome> {
        let collection = self.rooms();
        let mut rooms = collection.load_or_empty()?;
        let Some(room) = rooms.iter_mut().find(|room| room.id == room_id) else {
            debug!(
                "event=room_status module=service status=skip room_id={} reason=not_found",
                room_id
            );
            return Ok(UpdateOutcome::NotFound);
        };

        room.status = status;
        collection.save(&rooms)?;
        debug!(
            "event=room_status module=service status=ok room_id={} to={}",
            room_id,
            status.as_str()
        );
        Ok(UpdateOutcome::Updated)
    }

    fn rooms(&self) -> Collection<'_, S, Room> {
        Collection::new(&self.storage, ROOMS_KEY)
    }

    fn bookings(&self) -> Collection<'_, S, Booking> {
        Collection::new(&self.storage, BOOKINGS_KEY)
    }

    fn exclusive(&self) -> RepoResult<MutexGuard<'_, ()>> {
        self.write_lock
            .lock()
            .map_err(|_| RepoError::Storage(StorageError::Poisoned))
    }
}
