//! Property tests for the level-3 book.
//!
//! Random open/done/match/change sequences are applied both to the book
//! and to a plain `HashMap` model. After every event:
//!
//! 1. The book's structural invariants hold (`is_consistent`)
//! 2. The live orders equal the model's
//! 3. Each side iterates in price-time order
//! 4. Rejected and unknown-id events leave the book unchanged

use std::collections::HashMap;

use level3_book::{BookError, BookEvent, Order, OrderBook, Side};
use proptest::prelude::*;
use rust_decimal::Decimal;

// ============================================================================
// Event generation
// ============================================================================

#[derive(Debug, Clone)]
enum Op {
    Open { id: u8, bid: bool, price: u32, size: u32 },
    Done { id: u8 },
    Match { id: u8, fill: u32 },
    Change { id: u8, size: u32 },
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0u8..24, any::<bool>(), 1u32..12, 1u32..40)
            .prop_map(|(id, bid, price, size)| Op::Open { id, bid, price, size }),
        1 => (0u8..24).prop_map(|id| Op::Done { id }),
        3 => (0u8..24, 0u32..50).prop_map(|(id, fill)| Op::Match { id, fill }),
        1 => (0u8..24, 0u32..40).prop_map(|(id, size)| Op::Change { id, size }),
    ]
}

fn to_event(op: &Op, time: u64) -> BookEvent {
    match *op {
        Op::Open { id, bid, price, size } => BookEvent::open(
            format!("O{}", id),
            if bid { "bid" } else { "ask" },
            Decimal::from(price),
            Decimal::from(size),
            time,
        ),
        Op::Done { id } => BookEvent::done(format!("O{}", id)),
        Op::Match { id, fill } => BookEvent::fill(format!("O{}", id), Decimal::from(fill)),
        Op::Change { id, size } => BookEvent::change(format!("O{}", id), Decimal::from(size)),
    }
}

// ============================================================================
// Reference model
// ============================================================================

/// Expected outcome of applying `event` to `model`
fn apply_model(model: &mut HashMap<String, Order>, event: &BookEvent) -> Result<(), ()> {
    match event {
        BookEvent::Open(open) => {
            let order = open.to_order().map_err(|_| ())?;
            model.insert(order.order_id.clone(), order);
        }
        BookEvent::Done(done) => {
            model.remove(&done.order_id);
        }
        BookEvent::Match(fill) => {
            if let Some(order) = model.get_mut(&fill.order_id) {
                if fill.size > order.size {
                    return Err(());
                }
                order.size -= fill.size;
                if order.size.is_zero() {
                    model.remove(&fill.order_id);
                }
            }
        }
        BookEvent::Change(change) => {
            if change.new_size.is_zero() {
                model.remove(&change.order_id);
            } else if let Some(order) = model.get_mut(&change.order_id) {
                order.size = change.new_size;
            }
        }
    }
    Ok(())
}

fn assert_side_order(book: &OrderBook) -> Result<(), TestCaseError> {
    let asks: Vec<&Order> = book.asks().collect();
    for pair in asks.windows(2) {
        prop_assert!(pair[0].price <= pair[1].price);
        if pair[0].price == pair[1].price {
            prop_assert!(pair[0].time <= pair[1].time);
        }
    }

    let bids: Vec<&Order> = book.bids().collect();
    for pair in bids.windows(2) {
        prop_assert!(pair[0].price >= pair[1].price);
        if pair[0].price == pair[1].price {
            prop_assert!(pair[0].time <= pair[1].time);
        }
    }
    Ok(())
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_book_matches_model(ops in prop::collection::vec(op_strategy(), 1..200)) {
        let mut book = OrderBook::new();
        let mut model: HashMap<String, Order> = HashMap::new();

        for (time, op) in ops.iter().enumerate() {
            let event = to_event(op, time as u64);
            let before = book.snapshot();

            let expected = apply_model(&mut model, &event);
            let actual = book.apply(event);

            prop_assert_eq!(expected.is_ok(), actual.is_ok());
            if actual.is_err() {
                prop_assert!(matches!(actual, Err(BookError::OverFill { .. })), "expected OverFill, got {:?}", actual);
                prop_assert_eq!(book.snapshot(), before);
            }

            prop_assert!(book.is_consistent());
            prop_assert_eq!(book.order_count(), book.ask_count() + book.bid_count());
            prop_assert_eq!(book.order_count(), model.len());
            for (order_id, order) in &model {
                prop_assert_eq!(book.get_order(order_id), Some(order));
            }
            assert_side_order(&book)?;
        }
    }

    #[test]
    fn prop_no_id_on_both_sides(ops in prop::collection::vec(op_strategy(), 1..150)) {
        let mut book = OrderBook::new();
        for (time, op) in ops.iter().enumerate() {
            let _ = book.apply(to_event(op, time as u64));
        }

        let asks: Vec<&str> = book.asks().map(|o| o.order_id.as_str()).collect();
        for bid in book.bids() {
            prop_assert!(!asks.contains(&bid.order_id.as_str()));
            prop_assert_eq!(bid.side, Side::Bid);
        }
        for ask in book.asks() {
            prop_assert_eq!(ask.side, Side::Ask);
            prop_assert!(ask.size > Decimal::ZERO);
        }
    }

    #[test]
    fn prop_over_fill_never_goes_negative(size in 1u32..100, fill in 0u32..200) {
        let mut book = OrderBook::new();
        book.add_order(Order::new("A1", Side::Ask, Decimal::from(10), Decimal::from(size), 1)).unwrap();

        let result = book.match_order("A1", Decimal::from(fill));

        if fill > size {
            let is_over_fill = matches!(result, Err(BookError::OverFill { .. }));
            prop_assert!(is_over_fill);
            prop_assert_eq!(book.get_order("A1").map(|o| o.size), Some(Decimal::from(size)));
        } else if fill == size {
            prop_assert!(result.is_ok());
            prop_assert!(book.get_order("A1").is_none());
        } else {
            prop_assert!(result.is_ok());
            prop_assert_eq!(book.get_order("A1").map(|o| o.size), Some(Decimal::from(size - fill)));
        }
        prop_assert!(book.is_consistent());
    }

    #[test]
    fn prop_unknown_ids_leave_book_unchanged(
        ops in prop::collection::vec(op_strategy(), 0..60),
        fill in 0u32..100,
    ) {
        let mut book = OrderBook::new();
        for (time, op) in ops.iter().enumerate() {
            let _ = book.apply(to_event(op, time as u64));
        }
        let before = book.snapshot();

        // Generated ids are O0..O23, so this id is never live
        prop_assert!(book.remove_by_order_id("ghost").is_none());
        prop_assert!(book.match_order("ghost", Decimal::from(fill)).is_ok());
        prop_assert!(book.change_order("ghost", Decimal::from(fill)).is_ok());
        prop_assert!(book.change_order("ghost", Decimal::ZERO).is_ok());

        prop_assert_eq!(book.snapshot(), before);
    }

    #[test]
    fn prop_depth_is_prefix_of_full_side(
        ops in prop::collection::vec(op_strategy(), 0..120),
        count in 1usize..10,
    ) {
        let mut book = OrderBook::new();
        for (time, op) in ops.iter().enumerate() {
            let _ = book.apply(to_event(op, time as u64));
        }

        for side in [Side::Ask, Side::Bid] {
            let full = book.depth(side, 0);
            let top = book.depth(side, count);
            prop_assert_eq!(top.len(), count.min(full.len()));
            prop_assert_eq!(&full[..top.len()], &top[..]);
        }
    }
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn scenario_feed_walkthrough() {
    let mut book = OrderBook::new();

    book.apply(BookEvent::open("A1", "ask", Decimal::from(10), Decimal::from(5), 1)).unwrap();
    book.apply(BookEvent::open("A2", "ask", Decimal::from(10), Decimal::from(3), 2)).unwrap();
    book.apply(BookEvent::open("B1", "bid", Decimal::from(10), Decimal::from(2), 3)).unwrap();
    book.apply(BookEvent::open("B2", "bid", Decimal::from(12), Decimal::from(1), 4)).unwrap();

    let asks = book.depth(Side::Ask, 0);
    assert_eq!(asks.len(), 2);
    assert_eq!((asks[0].order_id(), asks[0].price(), asks[0].size()), ("A1", "10", "5"));
    assert_eq!((asks[1].order_id(), asks[1].price(), asks[1].size()), ("A2", "10", "3"));

    let bids = book.depth(Side::Bid, 0);
    assert_eq!(bids[0].order_id(), "B2");
    assert_eq!(bids[1].order_id(), "B1");

    // Full match removes from both structures
    book.match_order("A1", Decimal::from(5)).unwrap();
    assert!(book.get_order("A1").is_none());
    assert_eq!(book.order_count(), 3);
    assert_eq!(book.ask_count(), 1);

    // Over-fill is rejected and the order keeps its size
    assert!(matches!(
        book.match_order("A2", Decimal::from(10)),
        Err(BookError::OverFill { .. })
    ));
    assert_eq!(book.get_order("A2").unwrap().size, Decimal::from(3));

    // Change to zero removes
    book.change_order("B1", Decimal::ZERO).unwrap();
    assert!(book.get_order("B1").is_none());
    assert_eq!(book.bid_count(), 1);

    // Top-1 view
    book.apply(BookEvent::open("A3", "ask", Decimal::from(11), Decimal::from(1), 5)).unwrap();
    let top = book.depth(Side::Ask, 1);
    assert_eq!(top.len(), 1);
    assert_eq!(top[0].order_id(), "A2");

    assert!(book.is_consistent());
}

#[test]
fn scenario_decode_and_apply_feed() {
    let feed = [
        r#"{"type":"open","order_id":"a","side":"sell","price":"100.25","size":"0.5","time":1}"#,
        r#"{"type":"open","order_id":"b","side":"buy","price":"99.75","size":"1.25","time":2}"#,
        r#"{"type":"match","order_id":"b","size":"0.25"}"#,
        r#"{"type":"done","order_id":"a"}"#,
    ];

    let mut book = OrderBook::new();
    for (seq, line) in feed.iter().enumerate() {
        let event = BookEvent::from_json(line).unwrap();
        book.apply_sequenced(seq as u64 + 1, event).unwrap();
    }

    assert_eq!(
        book.to_json().unwrap(),
        r#"{"sequence":4,"asks":[],"bids":[["b","99.75","1.00"]]}"#
    );
}

#[test]
fn scenario_undecodable_lines_leave_book_unchanged() {
    let mut book = OrderBook::new();
    book.apply(BookEvent::open("A1", "ask", Decimal::from(10), Decimal::from(5), 1)).unwrap();
    let before = book.snapshot();

    let bad_text = BookEvent::from_json(r#"{"type":"match","order_id":"A1","size":"abc"}"#);
    assert_eq!(bad_text, Err(BookError::InvalidDecimal("abc".to_string())));

    // A number would publish as "10.5", not the "10.50" the venue sent
    let numeric = BookEvent::from_json(
        r#"{"type":"open","order_id":"A2","side":"ask","price":10.50,"size":"1","time":2}"#,
    );
    assert!(matches!(numeric, Err(BookError::InvalidEvent(_))));

    assert_eq!(book.snapshot(), before);

    let text = BookEvent::from_json(
        r#"{"type":"open","order_id":"A2","side":"ask","price":"10.50","size":"1.0","time":2}"#,
    )
    .unwrap();
    book.apply(text).unwrap();
    let asks = book.depth(Side::Ask, 0);
    assert_eq!((asks[1].order_id(), asks[1].price(), asks[1].size()), ("A2", "10.50", "1.0"));
}
