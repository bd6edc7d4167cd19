//! # Protocol Encoder
//!
//! Writes the i3bar stream: a header object announcing the protocol version,
//! the opening `[` of an array that is never closed, and then one complete
//! array of blocks per line, each followed by `,`. Hosts tolerate the trailing
//! separator, so every write is appended without re-framing.
//!
//! ```text
//! {"version":1,"click_events":true}
//! [
//! [{"full_text":"a"},{"full_text":"b"}],
//! [{"full_text":"a"},{"full_text":"c"}],
//! ```

use serde::Serialize;
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::core::block::Block;
use crate::core::engine::BarError;

/// Protocol version announced in the header.
pub const PROTOCOL_VERSION: u32 = 1;

#[derive(Serialize)]
struct Header {
    version: u32,
    click_events: bool,
}

/// Renders the header line and the opening bracket of the infinite array.
pub fn encode_header(click_events: bool) -> Result<Vec<u8>, serde_json::Error> {
    let mut out = serde_json::to_vec(&Header {
        version: PROTOCOL_VERSION,
        click_events,
    })?;
    out.extend_from_slice(b"\n[\n");
    Ok(out)
}

/// Renders one status line: the full block array followed by `,\n`.
pub fn encode_blocks(blocks: &[Block]) -> Result<Vec<u8>, serde_json::Error> {
    let mut out = serde_json::to_vec(blocks)?;
    out.extend_from_slice(b",\n");
    Ok(out)
}

/// # Protocol Encoder
///
/// Streams status lines to an async sink, emitting the header lazily before the
/// first line. Any write or flush failure is returned as `BarError::Io`, which
/// the engine treats as fatal.
pub struct ProtocolEncoder<W> {
    writer: W,
    click_events: bool,
    initialized: bool,
}

impl<W> ProtocolEncoder<W>
where
    W: AsyncWrite + Unpin,
{
    /// Wraps a sink. `click_events` is announced in the header.
    pub fn new(writer: W, click_events: bool) -> Self {
        Self {
            writer,
            click_events,
            initialized: false,
        }
    }

    #[cfg(test)]
    fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Writes one complete array of blocks, preceded by the header on first use.
    pub async fn emit(&mut self, blocks: &[Block]) -> Result<(), BarError> {
        if !self.initialized {
            let header = encode_header(self.click_events)?;
            self.writer.write_all(&header).await?;
            self.initialized = true;
        }

        let line = encode_blocks(blocks)?;
        self.writer.write_all(&line).await?;
        self.writer.flush().await?;
        Ok(())
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.writer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::color::Color;

    #[test]
    fn header_announces_version_and_clicks() {
        let header = encode_header(true).unwrap();
        assert_eq!(header, b"{\"version\":1,\"click_events\":true}\n[\n");

        let header = encode_header(false).unwrap();
        assert_eq!(header, b"{\"version\":1,\"click_events\":false}\n[\n");
    }

    #[test]
    fn line_is_an_array_with_trailing_comma() {
        let blocks = [
            Block::new("cpu", "CPU: 3.0%"),
            Block::new("", "plain").with_text_color(Some(Color::new(0xff, 0, 0))),
        ];
        let line = String::from_utf8(encode_blocks(&blocks).unwrap()).unwrap();
        assert_eq!(
            line,
            "[{\"full_text\":\"CPU: 3.0%\",\"name\":\"cpu\"},{\"full_text\":\"plain\",\"color\":\"#ff0000\"}],\n"
        );
    }

    #[tokio::test]
    async fn header_is_written_once() {
        let mut encoder = ProtocolEncoder::new(Vec::new(), true);
        assert!(!encoder.is_initialized());

        encoder.emit(&[Block::new("a", "1")]).await.unwrap();
        encoder.emit(&[]).await.unwrap();
        assert!(encoder.is_initialized());

        let out = String::from_utf8(encoder.into_inner()).unwrap();
        assert_eq!(
            out,
            "{\"version\":1,\"click_events\":true}\n[\n[{\"full_text\":\"1\",\"name\":\"a\"}],\n[],\n"
        );
    }
}
