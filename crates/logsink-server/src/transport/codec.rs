//! Line framing for stream transports.
//!
//! - One message per `\n`-terminated line; a trailing `\r` is dropped too.
//! - A final unterminated line before EOF is still a message.
//! - Lines longer than the limit are a framing error (caller drops the stream).

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt};

use bytes::Bytes;

#[derive(Debug)]
pub enum Frame {
    Message(Bytes),
    TooLarge,
    Eof,
}

/// Read the next line frame from `reader`.
pub async fn read_frame<R>(reader: &mut R, max_message_bytes: usize) -> std::io::Result<Frame>
where
    R: AsyncBufRead + Unpin,
{
    let mut buf = Vec::new();
    // Room for the terminator on top of the payload limit.
    let limit = max_message_bytes as u64 + 2;
    let n = reader.take(limit).read_until(b'\n', &mut buf).await?;
    if n == 0 {
        return Ok(Frame::Eof);
    }

    if buf.last() == Some(&b'\n') {
        buf.pop();
        if buf.last() == Some(&b'\r') {
            buf.pop();
        }
    }

    if buf.len() > max_message_bytes {
        return Ok(Frame::TooLarge);
    }
    Ok(Frame::Message(Bytes::from(buf)))
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn frames(input: &[u8], max: usize) -> Vec<Frame> {
        let mut reader = input;
        let mut out = Vec::new();
        loop {
            let f = read_frame(&mut reader, max).await.unwrap();
            let stop = !matches!(f, Frame::Message(_));
            out.push(f);
            if stop {
                return out;
            }
        }
    }

    fn text(f: &Frame) -> &[u8] {
        match f {
            Frame::Message(b) => b,
            other => panic!("expected message, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn splits_lines_and_strips_crlf() {
        let got = frames(b"hello\r\nworld\n\nlast", 64).await;
        assert_eq!(got.len(), 5);
        assert_eq!(text(&got[0]), b"hello");
        assert_eq!(text(&got[1]), b"world");
        assert_eq!(text(&got[2]), b"");
        assert_eq!(text(&got[3]), b"last");
        assert!(matches!(got[4], Frame::Eof));
    }

    #[tokio::test]
    async fn line_at_limit_is_accepted() {
        let got = frames(b"abcd\r\n", 4).await;
        assert_eq!(text(&got[0]), b"abcd");
    }

    #[tokio::test]
    async fn oversized_line_is_rejected() {
        let got = frames(b"abcdef\n", 4).await;
        assert!(matches!(got[0], Frame::TooLarge));
    }
}
