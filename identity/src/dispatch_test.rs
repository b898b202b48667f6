use std::time::Duration;

use super::*;

#[tokio::test]
async fn pop_returns_items_in_push_order() {
    let queue = DispatchQueue::new(4);
    assert!(queue.push(1));
    assert!(queue.push(2));
    assert!(queue.push(3));

    assert_eq!(queue.pop().await, Some(1));
    assert_eq!(queue.pop().await, Some(2));
    assert_eq!(queue.pop().await, Some(3));
    assert!(queue.is_empty());
}

#[tokio::test]
async fn overflow_drops_oldest() {
    let queue = DispatchQueue::new(2);
    queue.push("a");
    queue.push("b");
    queue.push("c");

    assert_eq!(queue.len(), 2);
    assert_eq!(queue.dropped(), 1);
    assert_eq!(queue.pop().await, Some("b"));
    assert_eq!(queue.pop().await, Some("c"));
}

#[test]
fn zero_capacity_is_clamped_to_one() {
    let queue = DispatchQueue::new(0);
    queue.push(1);
    queue.push(2);
    assert_eq!(queue.len(), 1);
}

#[tokio::test]
async fn closed_queue_drains_then_ends() {
    let queue = DispatchQueue::new(4);
    queue.push(7);
    queue.close();

    assert!(!queue.push(8));
    assert!(queue.is_closed());
    assert_eq!(queue.pop().await, Some(7));
    assert_eq!(queue.pop().await, None);
}

#[tokio::test]
async fn pop_waits_for_a_later_push() {
    let queue = DispatchQueue::new(4);
    let producer = queue.clone();

    let local = tokio::task::LocalSet::new();
    local
        .run_until(async move {
            let consumer = tokio::task::spawn_local(async move { queue.pop().await });
            tokio::task::yield_now().await;
            producer.push(42);
            let got = tokio::time::timeout(Duration::from_secs(1), consumer)
                .await
                .expect("pop should wake")
                .unwrap();
            assert_eq!(got, Some(42));
        })
        .await;
}

#[tokio::test]
async fn close_wakes_a_waiting_consumer() {
    let queue: DispatchQueue<u8> = DispatchQueue::new(4);
    let closer = queue.clone();

    let local = tokio::task::LocalSet::new();
    local
        .run_until(async move {
            let consumer = tokio::task::spawn_local(async move { queue.pop().await });
            tokio::task::yield_now().await;
            closer.close();
            let got = tokio::time::timeout(Duration::from_secs(1), consumer)
                .await
                .expect("close should wake")
                .unwrap();
            assert_eq!(got, None);
        })
        .await;
}
