//! Transform a stream of sensor readings through map → filter → fold.
//!
//! Run with: `cargo run --example pipeline`

use std::time::Duration;

use evstream::{EventStream, StreamError};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let celsius: EventStream<i64> = EventStream::new();

    celsius
        .map(|c| c * 9 / 5 + 32)
        .filter(|f| *f > 50)
        .fold(|acc, v| acc + v)
        .on_value_and_error(
            |sum| println!("[sum] running total of warm readings: {sum}"),
            |e: &StreamError| eprintln!("[error] {e}"),
        );

    for reading in [5, 10, 15, 20, 25] {
        celsius.push(reading);
    }
    celsius.throw_error(StreamError::message("sensor offline"));

    // Give the delivery workers a turn before exiting.
    tokio::time::sleep(Duration::from_millis(50)).await;
}
