use chrono::{NaiveDate, TimeZone, Utc};
use roombook::booking::BookingStore;
use roombook::db::Database;
use roombook::models::*;
use speculate2::speculate;

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 4, 1).unwrap()
}

fn new_booking(room_id: RoomId, date: NaiveDate, start_hour: u32, end_hour: u32) -> NewBooking {
    let at = |h| date.and_hms_opt(h, 0, 0).unwrap().and_utc();
    NewBooking {
        room_id,
        user_name: "Diego".to_string(),
        date,
        span: TimeSpan::new(at(start_hour), at(end_hour)).unwrap(),
    }
}

speculate! {
    before {
        let db = Database::open_memory().expect("Failed to create in-memory database");
        db.migrate().expect("Failed to run migrations");
    }

    describe "rooms" {
        describe "get_all_rooms" {
            it "returns the seeded rooms ordered by id" {
                let rooms = db.get_all_rooms().expect("Query failed");
                assert_eq!(rooms.len(), 3);
                assert_eq!(rooms[0].id, 1);
                assert_eq!(rooms[0].name, "Tokyo");
                assert_eq!(rooms[2].name, "Kyoto");
            }
        }

        describe "get_room" {
            it "returns None for non-existent room" {
                let result = db.get_room(99).expect("Query failed");
                assert!(result.is_none());
            }

            it "returns the room by id" {
                let room = db.get_room(2).expect("Query failed").expect("Room missing");
                assert_eq!(room.name, "Osaka");
            }
        }

        describe "create_room" {
            it "assigns the next id" {
                let room = db.create_room(CreateRoomInput {
                    name: "Nara".to_string(),
                }).expect("Failed to create room");

                assert_eq!(room.id, 4);
                assert_eq!(db.get_room(4).expect("Query failed"), Some(room));
            }
        }
    }

    describe "bookings" {
        describe "create_booking" {
            it "persists the booking with an assigned id" {
                let booking = db.create_booking(new_booking(1, day(), 12, 14))
                    .expect("Failed to create booking");

                assert!(booking.id > 0);
                assert_eq!(booking.start_time, Utc.with_ymd_and_hms(2025, 4, 1, 12, 0, 0).unwrap());

                let all = db.get_all_bookings().expect("Query failed");
                assert_eq!(all, vec![booking]);
            }

            it "returns the same created_at it stores" {
                let booking = db.create_booking(new_booking(1, day(), 12, 14))
                    .expect("Failed to create booking");
                let room = db.create_room(CreateRoomInput {
                    name: "Nara".to_string(),
                }).expect("Failed to create room");

                assert_eq!(booking.created_at.timestamp_subsec_nanos(), 0);
                let stored = db.get_all_bookings().expect("Query failed");
                assert_eq!(stored[0].created_at, booking.created_at);
                let stored_room = db.get_room(room.id).expect("Query failed").expect("Room missing");
                assert_eq!(stored_room.created_at, room.created_at);
            }

            it "rejects bookings for unknown rooms" {
                let result = db.create_booking(new_booking(99, day(), 12, 14));
                assert!(result.is_err());
            }
        }

        describe "get_all_bookings" {
            it "returns empty list when no bookings exist" {
                let bookings = db.get_all_bookings().expect("Query failed");
                assert!(bookings.is_empty());
            }

            it "returns bookings ordered by id" {
                let first = db.create_booking(new_booking(3, day(), 9, 10)).expect("Failed to create");
                let second = db.create_booking(new_booking(1, day(), 15, 16)).expect("Failed to create");

                let ids: Vec<_> = db.get_all_bookings().expect("Query failed").iter().map(|b| b.id).collect();
                assert_eq!(ids, vec![first.id, second.id]);
            }
        }

        describe "get_room_bookings_on" {
            it "filters by room and date" {
                db.create_booking(new_booking(1, day(), 12, 13)).expect("Failed to create");
                db.create_booking(new_booking(1, day(), 9, 10)).expect("Failed to create");
                db.create_booking(new_booking(2, day(), 12, 13)).expect("Failed to create");
                let next = day().succ_opt().unwrap();
                db.create_booking(new_booking(1, next, 12, 13)).expect("Failed to create");

                let bookings = db.get_room_bookings_on(1, day()).expect("Query failed");
                assert_eq!(bookings.len(), 2);
                assert!(bookings.iter().all(|b| b.room_id == 1 && b.date == day()));
                assert!(bookings[0].start_time < bookings[1].start_time);
            }
        }

        describe "get_bookings_on" {
            it "returns every room's bookings for the date" {
                db.create_booking(new_booking(1, day(), 12, 13)).expect("Failed to create");
                db.create_booking(new_booking(3, day(), 12, 13)).expect("Failed to create");
                db.create_booking(new_booking(2, day().succ_opt().unwrap(), 12, 13)).expect("Failed to create");

                let bookings = db.get_bookings_on(day()).expect("Query failed");
                assert_eq!(bookings.iter().map(|b| b.room_id).collect::<Vec<_>>(), vec![1, 3]);
            }
        }
    }

    describe "booking store" {
        it "exposes the database through the store trait" {
            let store: &dyn BookingStore = &db;
            let inserted = store.insert_booking(new_booking(2, day(), 10, 11)).expect("Insert failed");

            assert_eq!(store.bookings_for_room_on(2, day()).expect("Query failed"), vec![inserted.clone()]);
            assert_eq!(store.bookings_on(day()).expect("Query failed"), vec![inserted.clone()]);
            assert_eq!(store.list_bookings().expect("Query failed"), vec![inserted]);
            assert_eq!(store.list_rooms().expect("Query failed").len(), 3);
            assert!(store.find_room(3).expect("Query failed").is_some());
        }

        it "shares state between clones" {
            let other = db.clone();
            other.create_booking(new_booking(1, day(), 12, 13)).expect("Failed to create");
            assert_eq!(db.get_all_bookings().expect("Query failed").len(), 1);
        }
    }

    describe "file database" {
        it "persists bookings across reopen" {
            let dir = tempfile::tempdir().expect("Failed to create temp dir");
            let path = dir.path().join("nested").join("roombook.db");

            {
                let file_db = Database::open(path.clone()).expect("Failed to open");
                file_db.migrate().expect("Failed to migrate");
                file_db.create_booking(new_booking(1, day(), 12, 13)).expect("Failed to create");
            }

            let reopened = Database::open(path).expect("Failed to reopen");
            reopened.migrate().expect("Failed to migrate");
            let bookings = reopened.get_all_bookings().expect("Query failed");
            assert_eq!(bookings.len(), 1);
            assert_eq!(bookings[0].user_name, "Diego");
        }
    }
}
