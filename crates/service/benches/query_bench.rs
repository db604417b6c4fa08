use criterion::{criterion_group, criterion_main, Criterion};

use chrono::{Duration, TimeZone, Utc};
use configs::IdStrategy;
use models::{Category, Entity, Event, Ticket, User};
use service::{FileBookingStore, Pagination};

fn seeded_store() -> std::sync::Arc<FileBookingStore> {
    let base = Utc.with_ymd_and_hms(2024, 1, 1, 18, 0, 0).unwrap();
    let mut entities = Vec::new();
    for i in 1..=2_000i64 {
        entities.push(Entity::User(User::new(i, format!("User {}", i % 50), format!("user{i}@example.com"))));
    }
    for i in 0..200i64 {
        entities.push(Entity::Event(Event::new(10_000 + i, format!("Event {}", i % 20), base + Duration::hours(i * 6))));
    }
    for i in 0..5_000i64 {
        let event_id = 10_000 + i % 200;
        entities.push(Entity::Ticket(Ticket::new(20_000 + i, event_id, 1 + i % 2_000, Category::Standard, (i / 200) as i32)));
    }
    FileBookingStore::from_entities("target/bench-data/storage.json", entities, IdStrategy::Sequential)
}

fn bench_queries(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let store = seeded_store();
    let event = rt.block_on(store.get_event_by_id(10_007)).unwrap();
    let day = Utc.with_ymd_and_hms(2024, 1, 10, 0, 0, 0).unwrap();

    c.bench_function("tickets_for_event_by_email", |b| {
        b.iter(|| rt.block_on(store.get_booked_tickets_for_event(&event, Pagination::new(1, 20))));
    });
    c.bench_function("users_by_name_page_2", |b| {
        b.iter(|| rt.block_on(store.get_users_by_name("User 1", Pagination::new(2, 10))));
    });
    c.bench_function("events_for_day", |b| {
        b.iter(|| rt.block_on(store.get_events_for_day(day, Pagination::new(1, 10))));
    });
}

fn bench_booking(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let store = seeded_store();
    let mut place = 1_000;

    c.bench_function("book_then_cancel", |b| {
        b.iter(|| {
            place += 1;
            let ticket = rt.block_on(store.book_ticket(1, 10_000, place, Category::Bar)).unwrap();
            rt.block_on(store.cancel_ticket(ticket.id));
        });
    });
}

criterion_group!(benches, bench_queries, bench_booking);
criterion_main!(benches);
