//! Canonical binary codec for [`StreamEvent`].
//!
//! The encoding is deterministic: fields are written in a fixed order, all
//! integers are little-endian fixed width, and all strings are
//! u32-length-prefixed. No unordered container is ever iterated — the
//! event's value list is already sorted by name when it reaches `encode`.
//!
//! `decode` is the exact inverse: `decode(encode(e)) == e` for every valid
//! event, and any truncated, oversized, or malformed input is an error.

use crate::error::CodecError;
use crate::event::StreamEvent;
use crate::value::{ParamData, ParamValue};
use bytes::{Buf, BufMut, Bytes, BytesMut};

/// Current wire format version, written as the first byte of every body.
pub const FORMAT_VERSION: u8 = 1;

const TAG_SCALAR: u8 = 0;
const TAG_ARRAY: u8 = 1;

/// Encode an event into its canonical byte sequence.
pub fn encode(event: &StreamEvent) -> Bytes {
    let mut buf = BytesMut::with_capacity(64 + event.msg_chain_id.len());
    buf.put_u8(FORMAT_VERSION);

    buf.put_u32_le(event.values.len() as u32);
    for value in &event.values {
        put_str(&mut buf, &value.name);
        match &value.data {
            ParamData::Scalar(s) => {
                buf.put_u8(TAG_SCALAR);
                put_str(&mut buf, s);
            }
            ParamData::Array(items) => {
                buf.put_u8(TAG_ARRAY);
                buf.put_u32_le(items.len() as u32);
                for item in items {
                    put_str(&mut buf, item);
                }
            }
        }
    }

    put_str(&mut buf, &event.dataset_id);
    put_str(&mut buf, &event.callable);
    buf.put_u64_le(event.timestamp);
    buf.put_u64_le(event.sequence_id);
    put_str(&mut buf, &event.msg_chain_id);

    buf.freeze()
}

/// Decode a canonical byte sequence back into an event.
pub fn decode(data: &[u8]) -> Result<StreamEvent, CodecError> {
    let mut buf = data;

    let version = get_u8(&mut buf)?;
    if version != FORMAT_VERSION {
        return Err(CodecError::UnsupportedVersion { version });
    }

    let count = get_u32(&mut buf)? as usize;
    let mut values = Vec::with_capacity(count.min(1024));
    for _ in 0..count {
        let name = get_str(&mut buf)?;
        let data = match get_u8(&mut buf)? {
            TAG_SCALAR => ParamData::Scalar(get_str(&mut buf)?),
            TAG_ARRAY => {
                let len = get_u32(&mut buf)? as usize;
                let mut items = Vec::with_capacity(len.min(1024));
                for _ in 0..len {
                    items.push(get_str(&mut buf)?);
                }
                ParamData::Array(items)
            }
            tag => return Err(CodecError::UnknownValueTag { tag }),
        };
        values.push(ParamValue { name, data });
    }

    let dataset_id = get_str(&mut buf)?;
    let callable = get_str(&mut buf)?;
    let timestamp = get_u64(&mut buf)?;
    let sequence_id = get_u64(&mut buf)?;
    let msg_chain_id = get_str(&mut buf)?;

    if buf.has_remaining() {
        return Err(CodecError::TrailingBytes {
            len: buf.remaining(),
        });
    }

    Ok(StreamEvent {
        values,
        dataset_id,
        callable,
        timestamp,
        sequence_id,
        msg_chain_id,
    })
}

// ─── Wire primitives ─────────────────────────────────────────────────────────

fn put_str(buf: &mut BytesMut, s: &str) {
    buf.put_u32_le(s.len() as u32);
    buf.put_slice(s.as_bytes());
}

fn get_u8(buf: &mut &[u8]) -> Result<u8, CodecError> {
    if buf.remaining() < 1 {
        return Err(CodecError::UnexpectedEof { needed: 1 });
    }
    Ok(buf.get_u8())
}

fn get_u32(buf: &mut &[u8]) -> Result<u32, CodecError> {
    if buf.remaining() < 4 {
        return Err(CodecError::UnexpectedEof {
            needed: 4 - buf.remaining(),
        });
    }
    Ok(buf.get_u32_le())
}

fn get_u64(buf: &mut &[u8]) -> Result<u64, CodecError> {
    if buf.remaining() < 8 {
        return Err(CodecError::UnexpectedEof {
            needed: 8 - buf.remaining(),
        });
    }
    Ok(buf.get_u64_le())
}

fn get_str(buf: &mut &[u8]) -> Result<String, CodecError> {
    let len = get_u32(buf)? as usize;
    if buf.remaining() < len {
        return Err(CodecError::UnexpectedEof {
            needed: len - buf.remaining(),
        });
    }
    let bytes = buf[..len].to_vec();
    buf.advance(len);
    Ok(String::from_utf8(bytes)?)
}
