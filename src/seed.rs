//! Fake purchase orders for local development.

use rand::seq::IndexedRandom;
use rand::Rng;

use crate::domain::errors::DomainError;
use crate::domain::order::{Order, Product};
use crate::domain::ports::OrdersDataService;
use crate::util::current_iso_time;

pub const SEED_RECORD_COUNT: usize = 500;

const NAMES: &[&str] = &[
    "Ada Lovelace",
    "Grace Hopper",
    "Alan Turing",
    "Edsger Dijkstra",
    "Barbara Liskov",
    "Donald Knuth",
    "Margaret Hamilton",
    "Ken Thompson",
];

const REMARKS: &[&str] = &[
    "Deliver to the side entrance.",
    "Gift wrap requested.",
    "Customer asked for an invoice copy.",
    "Fragile, handle with care.",
    "Leave with the front desk.",
    "Repeat order from last quarter.",
];

fn pick(words: &[&str], rng: &mut impl Rng) -> String {
    words.choose(rng).copied().unwrap_or_default().to_string()
}

/// An unsaved order with two randomly filled products.
pub fn fake_order() -> Order {
    let mut rng = rand::rng();
    let products = vec![
        Product {
            name: pick(NAMES, &mut rng),
            price: rng.random_range(10..100),
            status: String::new(),
            remarks: pick(REMARKS, &mut rng),
            updated_at: current_iso_time(),
        },
        Product {
            name: pick(NAMES, &mut rng),
            price: rng.random_range(10..1010),
            status: String::new(),
            remarks: pick(REMARKS, &mut rng),
            updated_at: current_iso_time(),
        },
    ];
    Order::new(products)
}

/// Creates `count` fake orders one after another.
///
/// Stops at the first failed write and returns that error; orders written
/// before it stay in place.
pub async fn seed_orders(
    orders: &dyn OrdersDataService,
    count: usize,
) -> Result<usize, DomainError> {
    for written in 0..count {
        if let Err(e) = orders.create(fake_order()).await {
            log::error!("Seeding stopped after {} orders: {}", written, e);
            return Err(e);
        }
    }
    log::info!("Seeded {} orders", count);
    Ok(count)
}
