use futures::stream::{self, AbortHandle, Abortable, Iter, Stream, StreamExt};
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::vec::IntoIter;

/// split text into pieces of `per_tick` visible characters. an escape
/// sequence always travels whole with the character after it, and a
/// \r\n pair is never split
pub fn chunks(text: &str, per_tick: usize) -> Vec<String> {
    let per_tick = per_tick.max(1);
    let chars: Vec<char> = text.chars().collect();
    let mut out = Vec::new();
    let mut current = String::new();
    let mut visible = 0;
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        if c == '\x1b' {
            current.push(c);
            i += 1;
            if i < chars.len() && chars[i] == '[' {
                current.push('[');
                i += 1;
                while i < chars.len() {
                    let p = chars[i];
                    current.push(p);
                    i += 1;
                    if ('@'..='~').contains(&p) {
                        break;
                    }
                }
            }
            continue;
        }
        current.push(c);
        i += 1;
        if c == '\r' && i < chars.len() && chars[i] == '\n' {
            current.push('\n');
            i += 1;
        }
        visible += 1;
        if visible == per_tick {
            out.push(std::mem::take(&mut current));
            visible = 0;
        }
    }
    if !current.is_empty() {
        out.push(current);
    }
    out
}

/// typed-out output as a stream of chunks. aborting it through the
/// handle ends the stream early, and `is_finished` stays false
pub struct Typewriter {
    inner: Abortable<Iter<IntoIter<String>>>,
    remaining: usize,
}

impl Typewriter {
    pub fn new(text: &str, per_tick: usize) -> (Self, AbortHandle) {
        let pieces = chunks(text, per_tick);
        let remaining = pieces.len();
        let (inner, handle) = stream::abortable(stream::iter(pieces));
        (Self { inner, remaining }, handle)
    }

    pub fn is_finished(&self) -> bool {
        self.remaining == 0
    }
}

impl Stream for Typewriter {
    type Item = String;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<String>> {
        let this = self.get_mut();
        let next = Pin::new(&mut this.inner).poll_next(cx);
        if let Poll::Ready(Some(_)) = &next {
            this.remaining -= 1;
        }
        next
    }
}

/// drive a typewriter: hand each chunk to `sink`, then wait for `tick`.
/// true when every chunk was written, false when it was aborted
pub async fn play<T, F>(mut typewriter: Typewriter, mut tick: T, mut sink: impl FnMut(&str)) -> bool
where
    T: FnMut() -> F,
    F: Future<Output = ()>,
{
    while let Some(chunk) = typewriter.next().await {
        sink(&chunk);
        tick().await;
    }
    typewriter.is_finished()
}

/// delay between chunks in the browser
#[cfg(target_arch = "wasm32")]
pub fn tick(delay_ms: u32) -> gloo_timers::future::TimeoutFuture {
    gloo_timers::future::TimeoutFuture::new(delay_ms)
}

/// no timers outside the browser, the text comes out at once
#[cfg(not(target_arch = "wasm32"))]
pub fn tick(_delay_ms: u32) -> futures::future::Ready<()> {
    futures::future::ready(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;

    #[test]
    fn test_chunks_keep_escapes_whole() {
        assert_eq!(chunks("ab", 1), vec!["a", "b"]);
        assert_eq!(chunks("\x1b[32mok\x1b[0m", 1), vec!["\x1b[32mo", "k", "\x1b[0m"]);
        assert_eq!(chunks("a\r\nb", 1), vec!["a", "\r\n", "b"]);
        assert_eq!(chunks("abcde", 2), vec!["ab", "cd", "e"]);
        assert!(chunks("", 3).is_empty());
    }

    #[test]
    fn test_play_writes_everything() {
        let (tw, _handle) = Typewriter::new("help\r\n", 1);
        let mut out = String::new();
        let done = block_on(play(tw, || tick(0), |c| out.push_str(c)));
        assert!(done);
        assert_eq!(out, "help\r\n");
    }

    #[test]
    fn test_abort_stops_early() {
        let (tw, handle) = Typewriter::new("abcdef", 1);
        let mut out = String::new();
        let mut ticks = 0;
        let done = block_on(play(
            tw,
            || {
                ticks += 1;
                if ticks == 2 {
                    handle.abort();
                }
                tick(0)
            },
            |c| out.push_str(c),
        ));
        assert!(!done);
        assert_eq!(out, "ab");
    }
}
