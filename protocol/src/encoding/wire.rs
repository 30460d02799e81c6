//! MessagePack primitives.
//!
//! Writers always pick the shortest form for a value, which is what makes
//! the output canonical at the primitive level. The parser accepts every
//! form the canonical writer can produce plus the wider encodings another
//! writer might use (signed integers, oversized length prefixes, nil), and
//! rejects floats and extension types outright.

use crate::config::MAX_DECODE_DEPTH;
use crate::error::{Result, TxError};

// ---------------------------------------------------------------------------
// Markers
// ---------------------------------------------------------------------------

const NIL: u8 = 0xc0;
const FALSE: u8 = 0xc2;
const TRUE: u8 = 0xc3;
const BIN8: u8 = 0xc4;
const BIN16: u8 = 0xc5;
const BIN32: u8 = 0xc6;
const UINT8: u8 = 0xcc;
const UINT16: u8 = 0xcd;
const UINT32: u8 = 0xce;
const UINT64: u8 = 0xcf;
const INT8: u8 = 0xd0;
const INT16: u8 = 0xd1;
const INT32: u8 = 0xd2;
const INT64: u8 = 0xd3;
const STR8: u8 = 0xd9;
const STR16: u8 = 0xda;
const STR32: u8 = 0xdb;
const ARRAY16: u8 = 0xdc;
const ARRAY32: u8 = 0xdd;
const MAP16: u8 = 0xde;
const MAP32: u8 = 0xdf;

const FIXMAP: u8 = 0x80;
const FIXARRAY: u8 = 0x90;
const FIXSTR: u8 = 0xa0;

// ---------------------------------------------------------------------------
// Writers
// ---------------------------------------------------------------------------

/// Writes an unsigned integer in its shortest form.
pub fn write_uint(buf: &mut Vec<u8>, value: u64) {
    if value < 0x80 {
        buf.push(value as u8);
    } else if value <= u8::MAX as u64 {
        buf.push(UINT8);
        buf.push(value as u8);
    } else if value <= u16::MAX as u64 {
        buf.push(UINT16);
        buf.extend_from_slice(&(value as u16).to_be_bytes());
    } else if value <= u32::MAX as u64 {
        buf.push(UINT32);
        buf.extend_from_slice(&(value as u32).to_be_bytes());
    } else {
        buf.push(UINT64);
        buf.extend_from_slice(&value.to_be_bytes());
    }
}

/// Writes a boolean.
pub fn write_bool(buf: &mut Vec<u8>, value: bool) {
    buf.push(if value { TRUE } else { FALSE });
}

/// Writes a UTF-8 string.
pub fn write_str(buf: &mut Vec<u8>, value: &str) {
    let len = value.len();
    if len < 32 {
        buf.push(FIXSTR | len as u8);
    } else if len <= u8::MAX as usize {
        buf.push(STR8);
        buf.push(len as u8);
    } else if len <= u16::MAX as usize {
        buf.push(STR16);
        buf.extend_from_slice(&(len as u16).to_be_bytes());
    } else {
        buf.push(STR32);
        buf.extend_from_slice(&(len as u32).to_be_bytes());
    }
    buf.extend_from_slice(value.as_bytes());
}

/// Writes a binary blob.
pub fn write_bin(buf: &mut Vec<u8>, value: &[u8]) {
    let len = value.len();
    if len <= u8::MAX as usize {
        buf.push(BIN8);
        buf.push(len as u8);
    } else if len <= u16::MAX as usize {
        buf.push(BIN16);
        buf.extend_from_slice(&(len as u16).to_be_bytes());
    } else {
        buf.push(BIN32);
        buf.extend_from_slice(&(len as u32).to_be_bytes());
    }
    buf.extend_from_slice(value);
}

/// Writes an array header for `len` elements.
pub fn write_array_len(buf: &mut Vec<u8>, len: usize) {
    write_container_len(buf, len, FIXARRAY, ARRAY16, ARRAY32);
}

/// Writes a map header for `len` key/value pairs.
pub fn write_map_len(buf: &mut Vec<u8>, len: usize) {
    write_container_len(buf, len, FIXMAP, MAP16, MAP32);
}

fn write_container_len(buf: &mut Vec<u8>, len: usize, fix: u8, m16: u8, m32: u8) {
    if len < 16 {
        buf.push(fix | len as u8);
    } else if len <= u16::MAX as usize {
        buf.push(m16);
        buf.extend_from_slice(&(len as u16).to_be_bytes());
    } else {
        buf.push(m32);
        buf.extend_from_slice(&(len as u32).to_be_bytes());
    }
}

// ---------------------------------------------------------------------------
// Parsed values
// ---------------------------------------------------------------------------

/// A decoded MessagePack value.
///
/// Maps keep their wire order; key uniqueness and field lookup are handled
/// by [`super::decode::FieldReader`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Nil,
    Bool(bool),
    Uint(u64),
    /// A negative integer, or a positive one sent with a signed marker.
    Int(i64),
    Str(String),
    Bin(Vec<u8>),
    Array(Vec<Value>),
    Map(Vec<(String, Value)>),
}

impl Value {
    /// Returns `true` when the value is what the canonical encoder would
    /// have omitted: nil, `false`, zero, an empty or all-zero blob, an empty
    /// string or array, or a map whose values are all zero.
    pub fn is_zero(&self) -> bool {
        match self {
            Value::Nil => true,
            Value::Bool(b) => !b,
            Value::Uint(n) => *n == 0,
            Value::Int(n) => *n == 0,
            Value::Str(s) => s.is_empty(),
            Value::Bin(b) => b.iter().all(|&x| x == 0),
            Value::Array(items) => items.is_empty(),
            Value::Map(entries) => entries.iter().all(|(_, v)| v.is_zero()),
        }
    }

    /// Short wire-type name, for error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Bool(_) => "bool",
            Value::Uint(_) | Value::Int(_) => "integer",
            Value::Str(_) => "string",
            Value::Bin(_) => "binary",
            Value::Array(_) => "array",
            Value::Map(_) => "map",
        }
    }
}

// ---------------------------------------------------------------------------
// Parser
// ---------------------------------------------------------------------------

/// Parses exactly one value from `bytes`. Leftover bytes are an error.
pub fn parse(bytes: &[u8]) -> Result<Value> {
    let mut reader = Reader { buf: bytes, pos: 0 };
    let value = reader.value(0)?;
    let rest = bytes.len() - reader.pos;
    if rest != 0 {
        return Err(TxError::TrailingBytes(rest));
    }
    Ok(value)
}

struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8]> {
        if self.remaining() < n {
            return Err(TxError::UnexpectedEof);
        }
        let slice = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    fn byte(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    fn be<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    fn len8(&mut self) -> Result<usize> {
        Ok(self.byte()? as usize)
    }

    fn len16(&mut self) -> Result<usize> {
        Ok(u16::from_be_bytes(self.be()?) as usize)
    }

    fn len32(&mut self) -> Result<usize> {
        Ok(u32::from_be_bytes(self.be()?) as usize)
    }

    fn value(&mut self, depth: usize) -> Result<Value> {
        let marker = self.byte()?;
        match marker {
            0x00..=0x7f => Ok(Value::Uint(marker as u64)),
            0x80..=0x8f => self.map((marker & 0x0f) as usize, depth),
            0x90..=0x9f => self.array((marker & 0x0f) as usize, depth),
            0xa0..=0xbf => self.string((marker & 0x1f) as usize),
            0xe0..=0xff => Ok(Value::Int(marker as i8 as i64)),
            NIL => Ok(Value::Nil),
            FALSE => Ok(Value::Bool(false)),
            TRUE => Ok(Value::Bool(true)),
            BIN8 => {
                let len = self.len8()?;
                self.binary(len)
            }
            BIN16 => {
                let len = self.len16()?;
                self.binary(len)
            }
            BIN32 => {
                let len = self.len32()?;
                self.binary(len)
            }
            UINT8 => Ok(Value::Uint(self.byte()? as u64)),
            UINT16 => Ok(Value::Uint(u16::from_be_bytes(self.be()?) as u64)),
            UINT32 => Ok(Value::Uint(u32::from_be_bytes(self.be()?) as u64)),
            UINT64 => Ok(Value::Uint(u64::from_be_bytes(self.be()?))),
            INT8 => Ok(signed(self.byte()? as i8 as i64)),
            INT16 => Ok(signed(i16::from_be_bytes(self.be()?) as i64)),
            INT32 => Ok(signed(i32::from_be_bytes(self.be()?) as i64)),
            INT64 => Ok(signed(i64::from_be_bytes(self.be()?))),
            STR8 => {
                let len = self.len8()?;
                self.string(len)
            }
            STR16 => {
                let len = self.len16()?;
                self.string(len)
            }
            STR32 => {
                let len = self.len32()?;
                self.string(len)
            }
            ARRAY16 => {
                let len = self.len16()?;
                self.array(len, depth)
            }
            ARRAY32 => {
                let len = self.len32()?;
                self.array(len, depth)
            }
            MAP16 => {
                let len = self.len16()?;
                self.map(len, depth)
            }
            MAP32 => {
                let len = self.len32()?;
                self.map(len, depth)
            }
            other => Err(TxError::InvalidMarker(other)),
        }
    }

    fn binary(&mut self, len: usize) -> Result<Value> {
        Ok(Value::Bin(self.take(len)?.to_vec()))
    }

    fn string(&mut self, len: usize) -> Result<Value> {
        let raw = self.take(len)?;
        let s = std::str::from_utf8(raw).map_err(|_| TxError::InvalidUtf8)?;
        Ok(Value::Str(s.to_owned()))
    }

    fn array(&mut self, len: usize, depth: usize) -> Result<Value> {
        self.enter(depth)?;
        // Every element takes at least one byte, so a length prefix larger
        // than the rest of the input is a lie. Check before allocating.
        if len > self.remaining() {
            return Err(TxError::UnexpectedEof);
        }
        let mut items = Vec::with_capacity(len);
        for _ in 0..len {
            items.push(self.value(depth + 1)?);
        }
        Ok(Value::Array(items))
    }

    fn map(&mut self, len: usize, depth: usize) -> Result<Value> {
        self.enter(depth)?;
        if len.saturating_mul(2) > self.remaining() {
            return Err(TxError::UnexpectedEof);
        }
        let mut entries = Vec::with_capacity(len);
        for _ in 0..len {
            let key = match self.value(depth + 1)? {
                Value::Str(s) => s,
                _ => return Err(TxError::NonStringKey),
            };
            let value = self.value(depth + 1)?;
            entries.push((key, value));
        }
        Ok(Value::Map(entries))
    }

    fn enter(&self, depth: usize) -> Result<()> {
        if depth >= MAX_DECODE_DEPTH {
            return Err(TxError::NestingTooDeep {
                max: MAX_DECODE_DEPTH,
            });
        }
        Ok(())
    }
}

fn signed(n: i64) -> Value {
    if n >= 0 {
        Value::Uint(n as u64)
    } else {
        Value::Int(n)
    }
}
