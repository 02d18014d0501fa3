//! Walk a lazy sequence: infinite ranges, map/filter/take, memoized tails.
//!
//! Run with: `cargo run --example lazy_range`

use evstream::seq::Seq;

fn main() {
    // Bounded, inclusive range.
    let squares = Seq::range(1, 10).map(|v| v * v);
    println!("squares of 1..=10: {:?}", squares.to_vec());

    // Infinite range, consumed lazily.
    let evens = Seq::range_from(0).filter(|v| v % 2 == 0);
    println!("first 5 evens: {:?}", evens.take(5).to_vec());

    // Eager fold over a bounded prefix.
    let total = Seq::range_from(1).take(100).fold(0, |acc, v| acc + v);
    println!("sum of 1..=100: {total}");
}
