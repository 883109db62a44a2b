//! Simulated token streaming.
//!
//! The producer is a `Stream` with one suspension point per token: sleep for
//! the configured delay, yield the token, repeat, then yield `Done`. Dropping
//! the stream (axum does so when the client disconnects) drops the pending
//! sleep, so nothing further is emitted and no timer outlives the request.

use std::time::Duration;

use axum::response::sse::{Event, KeepAlive, Sse};
use futures::stream::{self, Stream, StreamExt};
use serde::Serialize;

/// Literal payload of the terminal SSE frame.
pub const DONE_SENTINEL: &str = "[DONE]";

/// Split text after every whitespace character, keeping the whitespace.
///
/// `"Hello world"` becomes `["Hello ", "world"]`; concatenating the tokens
/// always restores the input.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split_inclusive(char::is_whitespace)
        .map(str::to_owned)
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamFrame {
    Chunk(String),
    Done,
}

/// Paced frames: each token after `delay`, then [`StreamFrame::Done`].
pub fn paced_frames(tokens: Vec<String>, delay: Duration) -> impl Stream<Item = StreamFrame> {
    stream::unfold(Some(tokens.into_iter()), move |state| async move {
        let mut tokens = state?;
        match tokens.next() {
            Some(token) => {
                tokio::time::sleep(delay).await;
                Some((StreamFrame::Chunk(token), Some(tokens)))
            }
            None => Some((StreamFrame::Done, None)),
        }
    })
}

// ---------------------------------------------------------------------------
// Wire shapes
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct ChatCompletionChunk<'a> {
    pub id: &'a str,
    pub object: &'static str,
    pub created: i64,
    pub model: &'a str,
    pub choices: [ChunkChoice<'a>; 1],
}

#[derive(Debug, Serialize)]
pub struct ChunkChoice<'a> {
    pub index: u32,
    pub delta: Delta<'a>,
    pub finish_reason: Option<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct Delta<'a> {
    pub content: &'a str,
}

/// Identity shared by every chunk of one streamed completion.
#[derive(Debug, Clone)]
pub struct StreamMeta {
    pub id: String,
    pub model: String,
    pub created: i64,
}

impl StreamMeta {
    fn chunk<'a>(&'a self, token: &'a str) -> ChatCompletionChunk<'a> {
        ChatCompletionChunk {
            id: &self.id,
            object: "chat.completion.chunk",
            created: self.created,
            model: &self.model,
            choices: [ChunkChoice {
                index: 0,
                delta: Delta { content: token },
                finish_reason: None,
            }],
        }
    }
}

/// Map frames onto SSE events; chunk payloads are JSON, the sentinel is literal.
pub fn sse_events(
    frames: impl Stream<Item = StreamFrame>,
    meta: StreamMeta,
) -> impl Stream<Item = Result<Event, axum::Error>> {
    frames.map(move |frame| match frame {
        StreamFrame::Chunk(token) => Event::default().json_data(meta.chunk(&token)),
        StreamFrame::Done => Ok(Event::default().data(DONE_SENTINEL)),
    })
}

/// Full SSE response for `text`.
pub fn stream_text(
    text: &str,
    delay: Duration,
    meta: StreamMeta,
) -> Sse<impl Stream<Item = Result<Event, axum::Error>> + use<>> {
    let frames = paced_frames(tokenize(text), delay);
    Sse::new(sse_events(frames, meta)).keep_alive(KeepAlive::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Instant;
    use tokio::sync::oneshot;

    #[test]
    fn tokenize_preserves_whitespace() {
        assert_eq!(tokenize("Hello world"), vec!["Hello ", "world"]);
        assert_eq!(tokenize("a  b\nc"), vec!["a ", " ", "b\n", "c"]);
        assert!(tokenize("").is_empty());
        let text = "- **CVE Patches**: Priority access\n\nWith Tanzu";
        assert_eq!(tokenize(text).concat(), text);
    }

    #[tokio::test]
    async fn frames_are_ordered_paced_and_terminated() {
        let start = Instant::now();
        let frames: Vec<_> = paced_frames(tokenize("Hello world"), Duration::from_millis(50))
            .collect()
            .await;
        assert!(start.elapsed() >= Duration::from_millis(100));
        assert_eq!(
            frames,
            vec![
                StreamFrame::Chunk("Hello ".into()),
                StreamFrame::Chunk("world".into()),
                StreamFrame::Done,
            ]
        );
    }

    #[tokio::test]
    async fn each_chunk_waits_for_the_delay() {
        let mut frames = Box::pin(paced_frames(tokenize("one two"), Duration::from_millis(50)));
        let mut last = Instant::now();
        while let Some(frame) = frames.next().await {
            if let StreamFrame::Chunk(_) = frame {
                assert!(last.elapsed() >= Duration::from_millis(50));
            }
            last = Instant::now();
        }
    }

    #[tokio::test]
    async fn empty_text_only_emits_done() {
        let frames: Vec<_> = paced_frames(Vec::new(), Duration::from_millis(50)).collect().await;
        assert_eq!(frames, vec![StreamFrame::Done]);
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_stream_emits_nothing_more() {
        let emitted = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&emitted);
        let frames = paced_frames(tokenize("a b c d e f g h"), Duration::from_millis(50))
            .inspect(move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
            });

        // Consumer task stands in for the SSE body; aborting it drops the stream.
        let (first_tx, first_rx) = oneshot::channel();
        let consumer = tokio::spawn(async move {
            let mut frames = Box::pin(frames);
            let _ = first_tx.send(frames.next().await);
            while frames.next().await.is_some() {}
        });

        assert_eq!(first_rx.await.unwrap(), Some(StreamFrame::Chunk("a ".into())));
        consumer.abort();
        assert!(consumer.await.unwrap_err().is_cancelled());

        tokio::time::advance(Duration::from_secs(5)).await;
        tokio::task::yield_now().await;
        assert_eq!(emitted.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn chunk_json_escapes_token_text() {
        let meta = StreamMeta {
            id: "chatcmpl-mock-x".into(),
            model: "mock-gpt-4".into(),
            created: 1,
        };
        let json = serde_json::to_value(meta.chunk("say \"hi\"\n\t\\")).unwrap();
        assert_eq!(json["object"], "chat.completion.chunk");
        assert_eq!(json["choices"][0]["delta"]["content"], "say \"hi\"\n\t\\");
        assert!(json["choices"][0]["finish_reason"].is_null());
        let raw = serde_json::to_string(&meta.chunk("a\"b\r")).unwrap();
        assert!(raw.contains(r#"a\"b\r"#));
    }
}
