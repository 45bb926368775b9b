// Message coalescer tests - debounce timing on a paused clock
//
// Timelines are driven from a producer task so the assertions can measure
// when each batch is delivered.

use blockmind_core::coalescer::{IncomingMessage, MessageCoalescer};
use std::time::Duration;
use tokio::time::{Instant, sleep, sleep_until};

const WINDOW: Duration = Duration::from_millis(3000);

fn msg(text: &str) -> IncomingMessage {
    IncomingMessage::new("Alex", text)
}

#[tokio::test(start_paused = true)]
async fn burst_is_delivered_once_after_quiet_period() {
    let (coalescer, mut batches) = MessageCoalescer::spawn(WINDOW);
    let start = Instant::now();

    let producer = tokio::spawn(async move {
        for (at_ms, text) in [(0, "one"), (500, "two"), (2500, "three"), (6000, "four")] {
            sleep_until(start + Duration::from_millis(at_ms)).await;
            coalescer.push(msg(text)).await.expect("push");
        }
        coalescer
    });

    let first = batches.recv().await.expect("first batch");
    let first_at = start.elapsed();
    assert_eq!(
        first.iter().map(|m| m.text.as_str()).collect::<Vec<_>>(),
        ["one", "two", "three"]
    );
    assert!(first_at >= Duration::from_millis(5500), "{first_at:?}");
    assert!(first_at < Duration::from_millis(5600), "{first_at:?}");

    let second = batches.recv().await.expect("second batch");
    let second_at = start.elapsed();
    assert_eq!(second.len(), 1);
    assert_eq!(second[0].text, "four");
    assert!(second_at >= Duration::from_millis(9000), "{second_at:?}");

    let coalescer = producer.await.expect("producer");
    coalescer.close().await;
    assert!(batches.recv().await.is_none());
}

#[tokio::test(start_paused = true)]
async fn single_message_waits_full_window() {
    let (coalescer, mut batches) = MessageCoalescer::spawn(WINDOW);
    let start = Instant::now();
    coalescer.push(msg("hi")).await.expect("push");

    let batch = batches.recv().await.expect("batch");
    assert_eq!(batch, vec![msg("hi")]);
    assert!(start.elapsed() >= WINDOW);
}

#[tokio::test(start_paused = true)]
async fn nothing_is_sent_without_input() {
    let (_coalescer, mut batches) = MessageCoalescer::spawn(WINDOW);
    let waited = tokio::time::timeout(Duration::from_secs(60), batches.recv()).await;
    assert!(waited.is_err());
}

#[tokio::test(start_paused = true)]
async fn close_flushes_buffered_messages() {
    let (coalescer, mut batches) = MessageCoalescer::spawn(WINDOW);
    coalescer.push(msg("a")).await.expect("push");
    coalescer.push(msg("b")).await.expect("push");
    coalescer.close().await;

    assert_eq!(batches.recv().await.map(|b| b.len()), Some(2));
    assert!(batches.recv().await.is_none());
}

#[test]
fn chat_line_names_speaker() {
    let message = msg("where are you?").into_chat_message();
    assert_eq!(message.content, "User Alex said: where are you?");
    assert_eq!(message.name.as_deref(), Some("Alex"));
}
