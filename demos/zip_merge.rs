//! Pair two sources index by index with `zip`, and interleave two sources
//! into one with `merge`.
//!
//! Run with: `cargo run --example zip_merge`

use std::time::Duration;

use evstream::EventStream;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // zip: names pair up with scores in arrival order, the leading side is
    // buffered until the lagging side catches up.
    let names: EventStream<&'static str> = EventStream::new();
    let scores: EventStream<u32> = EventStream::new();

    names
        .zip(&scores)
        .on_value(|(name, score)| println!("[pair] {name} scored {score}"));

    names.push("ada");
    names.push("grace");
    scores.push(97);
    scores.push(88);

    // merge: one stream carrying whatever either source produces.
    let front_door: EventStream<u32> = EventStream::new();
    let back_door: EventStream<u32> = EventStream::new();

    front_door
        .merge(&back_door)
        .on_value(|badge| println!("[entry] badge {badge}"));

    front_door.push(1001);
    back_door.push(2002);

    tokio::time::sleep(Duration::from_millis(50)).await;
}
