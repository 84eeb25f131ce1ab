//! Level-3 Book - Demo Entry Point
//!
//! Replays a short feed script through a book and prints the resulting
//! snapshot. Set `RUST_LOG=level3_book=trace` to see every mutation.

use level3_book::types::price::format_trimmed;
use level3_book::{BookConfig, BookEvent, OrderBook, Side};

/// One event per line, as a venue's full channel would deliver them
const FEED_SCRIPT: &str = r#"
{"type":"open","order_id":"A1","side":"ask","price":"10","size":"5","time":1}
{"type":"open","order_id":"A2","side":"ask","price":"10","size":"3","time":2}
{"type":"open","order_id":"B1","side":"bid","price":"10","size":"2","time":3}
{"type":"open","order_id":"B2","side":"bid","price":"12","size":"1.50","time":4}
{"type":"match","order_id":"A1","size":"5"}
{"type":"match","order_id":"A2","size":"10"}
{"type":"change","order_id":"B1","new_size":"0"}
{"type":"done","order_id":"A1"}
{"type":"open","order_id":"X1","side":"middle","price":"1","size":"1","time":5}
{"type":"match","order_id":"A2","size":"1.5x"}
{"type":"open","order_id":"N1","side":"bid","price":9.50,"size":"1","time":6}
"#;

fn main() {
    tracing_subscriber::fmt::init();

    println!("===========================================");
    println!("  Level-3 Book - Feed Replay");
    println!("===========================================");
    println!();

    let mut book = OrderBook::from_config(&BookConfig::default());

    for (sequence, line) in (1u64..).zip(FEED_SCRIPT.lines().filter(|l| !l.trim().is_empty())) {
        let event = match BookEvent::from_json(line) {
            Ok(event) => event,
            Err(e) => {
                println!("  [{:>2}] undecodable event: {}", sequence, e);
                continue;
            }
        };

        let kind = event.kind();
        let order_id = event.order_id().to_string();
        match book.apply_sequenced(sequence, event) {
            Ok(()) => println!("  [{:>2}] {:<6} {:<3} ok", sequence, kind, order_id),
            Err(e) => println!("  [{:>2}] {:<6} {:<3} rejected: {}", sequence, kind, order_id, e),
        }
    }

    println!();
    println!("Book after replay:");
    println!("  Orders:   {}", book.order_count());
    println!("  Asks:     {}", book.ask_count());
    println!("  Bids:     {}", book.bid_count());
    if let Some(best) = book.best_bid() {
        println!("  Best bid: {} @ {}", format_trimmed(&best.size), format_trimmed(&best.price));
    }
    println!("  Top ask:  {:?}", book.depth(Side::Ask, 1));
    println!();

    let snapshot = book.snapshot();
    match snapshot.to_json() {
        Ok(json) => println!("Snapshot: {}", json),
        Err(e) => println!("  ERROR: Failed to encode snapshot: {}", e),
    }
    println!("Checksum: {}", snapshot.checksum());
}
