//! Default room catalog written on first run.

use crate::model::room::{Room, RoomStatus};

struct SeedRoom {
    id: i64,
    number: &'static str,
    kind: &'static str,
    type_localized: &'static str,
    price: f64,
    capacity: u32,
    status: RoomStatus,
    image: &'static str,
}

const SEED_ROOMS: [SeedRoom; 6] = [
    SeedRoom {
        id: 1,
        number: "101",
        kind: "Single",
        type_localized: "غرفة منفردة",
        price: 100.0,
        capacity: 1,
        status: RoomStatus::Available,
        image: "https://images.unsplash.com/photo-1631049307264-da0ec9d70304?auto=format&fit=crop&w=800&q=80",
    },
    SeedRoom {
        id: 2,
        number: "102",
        kind: "Double",
        type_localized: "غرفة مزدوجة",
        price: 180.0,
        capacity: 2,
        status: RoomStatus::Available,
        image: "https://images.unsplash.com/photo-1590490360182-c33d57733427?auto=format&fit=crop&w=800&q=80",
    },
    SeedRoom {
        id: 3,
        number: "201",
        kind: "Suite",
        type_localized: "جناح ملكي",
        price: 350.0,
        capacity: 4,
        status: RoomStatus::Available,
        image: "https://images.unsplash.com/photo-1582719478250-c89cae4dc85b?auto=format&fit=crop&w=800&q=80",
    },
    SeedRoom {
        id: 4,
        number: "202",
        kind: "Deluxe",
        type_localized: "غرفة ديلوكس",
        price: 250.0,
        capacity: 2,
        status: RoomStatus::Available,
        image: "https://images.unsplash.com/photo-1566665797739-1674de7a421a?auto=format&fit=crop&w=800&q=80",
    },
    SeedRoom {
        id: 5,
        number: "301",
        kind: "Family",
        type_localized: "غرفة عائلية",
        price: 300.0,
        capacity: 5,
        status: RoomStatus::Available,
        image: "https://images.unsplash.com/photo-1598928506311-c55ded91a20c?auto=format&fit=crop&w=800&q=80",
    },
    SeedRoom {
        id: 6,
        number: "302",
        kind: "Single",
        type_localized: "غرفة منفردة",
        price: 100.0,
        capacity: 1,
        status: RoomStatus::Booked,
        image: "https://images.unsplash.com/photo-1505691938895-1758d7eaa511?auto=format&fit=crop&w=800&q=80",
    },
];

/// Returns the fixed six-room catalog.
pub fn seed_rooms() -> Vec<Room> {
    SEED_ROOMS
        .iter()
        .map(|seed| Room {
            id: seed.id,
            number: seed.number.to_string(),
            kind: seed.kind.to_string(),
            type_localized: seed.type_localized.to_string(),
            price: seed.price,
            capacity: seed.capacity,
            status: seed.status,
            image: seed.image.to_string(),
        })
        .collect()
}
