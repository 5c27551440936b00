//! Tombstone payload encoding.
//!
//! ## Format
//!
//! ```text
//! u8        format version (1)
//! repeated {
//!   uvarint   series reference
//!   varint    mint   (zig-zag)
//!   varint    maxt   (zig-zag)
//! }
//! ```
//!
//! Varints are little-endian base-128 groups, at most 10 bytes for a
//! 64-bit value. The payload carries no magic number or checksum; those
//! are added by the file layer.

use crate::error::{TombstoneError, TombstoneResult};
use crate::interval::Interval;
use crate::memory::MemTombstones;
use crate::reader::TombstoneReader;
use crate::types::SeriesRef;

/// Current payload format version.
pub const FORMAT_V1: u8 = 1;

/// Size of the format version field.
pub const FORMAT_VERSION_SIZE: usize = 1;

/// Maximum encoded length of a 64-bit varint.
pub const MAX_VARINT_LEN: usize = 10;

/// Encodes every interval of `reader` into a versioned payload.
///
/// Triples are written in the reader's iteration order.
///
/// # Errors
///
/// Returns an error only if the reader's iteration fails.
pub fn encode(reader: &dyn TombstoneReader) -> TombstoneResult<Vec<u8>> {
    let mut buf = Vec::with_capacity(FORMAT_VERSION_SIZE + reader.total() as usize * 6);
    buf.push(FORMAT_V1);

    reader.iter(&mut |series, intervals| {
        for iv in intervals {
            put_uvarint(&mut buf, series.as_u64());
            put_varint(&mut buf, iv.mint);
            put_varint(&mut buf, iv.maxt);
        }
        Ok(())
    })?;

    Ok(buf)
}

/// Decodes a payload produced by [`encode`] into a fresh store.
///
/// Every triple goes through the interval merge, so the result satisfies
/// the same invariants as a store built incrementally.
///
/// # Errors
///
/// Returns [`TombstoneError::InvalidFormat`] if the version is unknown,
/// a varint is truncated or overlong, or an interval is inverted.
pub fn decode(data: &[u8]) -> TombstoneResult<MemTombstones> {
    let mut decoder = Decoder::new(data);

    let version = decoder
        .read_byte()
        .map_err(|_| TombstoneError::invalid_format("missing tombstone format version"))?;
    if version != FORMAT_V1 {
        return Err(TombstoneError::invalid_format(format!(
            "unsupported tombstone format: {version:#x}"
        )));
    }

    let stones = MemTombstones::new();
    while !decoder.is_empty() {
        let series = SeriesRef::new(decoder.read_uvarint()?);
        let mint = decoder.read_varint()?;
        let maxt = decoder.read_varint()?;

        let iv = Interval::new(mint, maxt);
        if !iv.is_valid() {
            return Err(TombstoneError::invalid_format(format!(
                "inverted interval {iv} for {series}"
            )));
        }
        stones.add_interval(series, [iv]);
    }

    Ok(stones)
}

fn put_uvarint(buf: &mut Vec<u8>, mut value: u64) {
    while value >= 0x80 {
        buf.push((value as u8) | 0x80);
        value >>= 7;
    }
    buf.push(value as u8);
}

fn put_varint(buf: &mut Vec<u8>, value: i64) {
    // Zig-zag: small magnitudes of either sign stay short.
    let zigzag = ((value << 1) ^ (value >> 63)) as u64;
    put_uvarint(buf, zigzag);
}

/// A cursor over an encoded payload.
struct Decoder<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Decoder<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn is_empty(&self) -> bool {
        self.pos >= self.data.len()
    }

    fn read_byte(&mut self) -> TombstoneResult<u8> {
        let b = *self
            .data
            .get(self.pos)
            .ok_or_else(|| TombstoneError::invalid_format("unexpected end of payload"))?;
        self.pos += 1;
        Ok(b)
    }

    fn read_uvarint(&mut self) -> TombstoneResult<u64> {
        let start = self.pos;
        let mut value = 0u64;
        let mut shift = 0u32;

        for i in 0..MAX_VARINT_LEN {
            let b = self.read_byte().map_err(|_| {
                TombstoneError::invalid_format(format!("truncated varint at offset {start}"))
            })?;
            // The tenth byte may only contribute the top bit.
            if i == MAX_VARINT_LEN - 1 && b > 1 {
                break;
            }
            if b < 0x80 {
                return Ok(value | (u64::from(b) << shift));
            }
            value |= u64::from(b & 0x7f) << shift;
            shift += 7;
        }

        Err(TombstoneError::invalid_format(format!(
            "varint overflows 64 bits at offset {start}"
        )))
    }

    fn read_varint(&mut self) -> TombstoneResult<i64> {
        let zigzag = self.read_uvarint()?;
        Ok(((zigzag >> 1) as i64) ^ -((zigzag & 1) as i64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interval::Intervals;

    fn uvarint(value: u64) -> Vec<u8> {
        let mut buf = Vec::new();
        put_uvarint(&mut buf, value);
        buf
    }

    fn varint(value: i64) -> Vec<u8> {
        let mut buf = Vec::new();
        put_varint(&mut buf, value);
        buf
    }

    #[test]
    fn uvarint_layout() {
        assert_eq!(uvarint(0), vec![0x00]);
        assert_eq!(uvarint(1), vec![0x01]);
        assert_eq!(uvarint(127), vec![0x7f]);
        assert_eq!(uvarint(128), vec![0x80, 0x01]);
        assert_eq!(uvarint(300), vec![0xac, 0x02]);
        assert_eq!(uvarint(u64::MAX).len(), MAX_VARINT_LEN);
    }

    #[test]
    fn varint_zigzag_layout() {
        assert_eq!(varint(0), vec![0x00]);
        assert_eq!(varint(-1), vec![0x01]);
        assert_eq!(varint(1), vec![0x02]);
        assert_eq!(varint(-2), vec![0x03]);
        assert_eq!(varint(63), vec![0x7e]);
        assert_eq!(varint(-64), vec![0x7f]);
        assert_eq!(varint(64), vec![0x80, 0x01]);
    }

    #[test]
    fn varint_extremes() {
        for value in [i64::MIN, i64::MIN + 1, -1, 0, 1, i64::MAX - 1, i64::MAX] {
            let buf = varint(value);
            let mut decoder = Decoder::new(&buf);
            assert_eq!(decoder.read_varint().unwrap(), value);
            assert!(decoder.is_empty());
        }
        let buf = uvarint(u64::MAX);
        assert_eq!(Decoder::new(&buf).read_uvarint().unwrap(), u64::MAX);
    }

    #[test]
    fn overlong_varint_rejected() {
        let buf = [0xff; 11];
        let result = Decoder::new(&buf).read_uvarint();
        assert!(matches!(result, Err(TombstoneError::InvalidFormat { .. })));

        let mut buf = vec![0xff; 9];
        buf.push(0x02);
        let result = Decoder::new(&buf).read_uvarint();
        assert!(matches!(result, Err(TombstoneError::InvalidFormat { .. })));
    }

    #[test]
    fn encode_empty_store() {
        let stones = MemTombstones::new();
        assert_eq!(encode(&stones).unwrap(), vec![FORMAT_V1]);
    }

    #[test]
    fn encode_single_interval_layout() {
        let stones = MemTombstones::new();
        stones.add_interval(SeriesRef::new(1), [Interval::new(-1, 64)]);

        let bytes = encode(&stones).unwrap();
        assert_eq!(bytes, vec![FORMAT_V1, 0x01, 0x01, 0x80, 0x01]);
    }

    #[test]
    fn decode_merges_triples() {
        let mut bytes = vec![FORMAT_V1];
        for (series, mint, maxt) in [(3u64, 10i64, 20i64), (3, 21, 30), (4, 0, 0)] {
            put_uvarint(&mut bytes, series);
            put_varint(&mut bytes, mint);
            put_varint(&mut bytes, maxt);
        }

        let stones = decode(&bytes).unwrap();
        let ivs = stones.get(SeriesRef::new(3)).unwrap();
        assert_eq!(ivs.as_slice(), &[Interval::new(10, 30)]);
        assert_eq!(stones.total(), 2);
    }

    #[test]
    fn decode_version_only() {
        let stones = decode(&[FORMAT_V1]).unwrap();
        assert!(stones.is_empty());
    }

    #[test]
    fn decode_rejects_empty_input() {
        assert!(matches!(
            decode(&[]),
            Err(TombstoneError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn decode_rejects_unknown_version() {
        assert!(matches!(
            decode(&[2]),
            Err(TombstoneError::InvalidFormat { .. })
        ));
        assert!(matches!(
            decode(&[0, 1, 2, 4]),
            Err(TombstoneError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn decode_rejects_truncated_triple() {
        let stones = MemTombstones::new();
        stones.add_interval(SeriesRef::new(1000), [Interval::new(100, 200)]);
        let bytes = encode(&stones).unwrap();

        for cut in 2..bytes.len() {
            let result = decode(&bytes[..cut]);
            assert!(
                matches!(result, Err(TombstoneError::InvalidFormat { .. })),
                "cut at {cut} should fail"
            );
        }
    }

    #[test]
    fn decode_rejects_inverted_interval() {
        let mut bytes = vec![FORMAT_V1];
        put_uvarint(&mut bytes, 1);
        put_varint(&mut bytes, 10);
        put_varint(&mut bytes, 5);

        assert!(matches!(
            decode(&bytes),
            Err(TombstoneError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn encode_propagates_iteration_error() {
        struct Failing;

        impl TombstoneReader for Failing {
            fn get(&self, _: SeriesRef) -> TombstoneResult<Intervals> {
                Ok(Intervals::new())
            }

            fn iter(
                &self,
                _: &mut dyn FnMut(SeriesRef, &Intervals) -> TombstoneResult<()>,
            ) -> TombstoneResult<()> {
                Err(TombstoneError::iteration("backing store unavailable"))
            }

            fn total(&self) -> u64 {
                0
            }

            fn close(&self) -> TombstoneResult<()> {
                Ok(())
            }
        }

        assert!(matches!(
            encode(&Failing),
            Err(TombstoneError::Iteration { .. })
        ));
    }
}
