//! Primitive wire types of the Minecraft protocol.
//!
//! Writers append to an in-memory buffer and cannot fail on I/O; packets are
//! always assembled in memory before they touch the socket. Readers pull from
//! any [`AsyncRead`] and fail with the underlying I/O error when it does.

use tokio::io::{AsyncRead, AsyncReadExt};

use crate::Error;

/// A 32-bit VarInt never takes more than five bytes on the wire.
pub const VAR_INT_MAX_BYTES: usize = 5;

/// Longest string, in bytes, that [`read_string`] accepts.
pub const MAX_STRING_LENGTH: i32 = 32_767;

/// Appends `value` as a VarInt.
///
/// Negative values are shifted as their unsigned bit pattern, so they always
/// take the full five bytes.
#[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
pub fn write_varint(out: &mut Vec<u8>, value: i32) {
    let mut value = value as u32;
    loop {
        let mut byte = (value & 0x7F) as u8;
        value >>= 7;
        if value != 0 {
            byte |= 0x80;
        }
        out.push(byte);
        if value == 0 {
            return;
        }
    }
}

/// Reads one VarInt.
///
/// # Errors
/// [`Error::VarIntTooLarge`] if the continuation bit is still set on the
/// fifth byte, or the I/O error of the underlying reader.
#[allow(clippy::cast_possible_wrap)]
pub async fn read_varint<R: AsyncRead + Unpin>(reader: &mut R) -> Result<i32, Error> {
    let mut result: u32 = 0;
    for i in 0..VAR_INT_MAX_BYTES {
        let byte = reader.read_u8().await?;
        result |= u32::from(byte & 0x7F) << (7 * i);
        if byte & 0x80 == 0 {
            return Ok(result as i32);
        }
    }
    Err(Error::VarIntTooLarge)
}

/// Appends `value` as a VarInt byte length followed by its UTF-8 bytes.
///
/// # Errors
/// [`Error::InvalidVarInt`] if the byte length does not fit in an `i32`.
pub fn write_string(out: &mut Vec<u8>, value: &str) -> Result<(), Error> {
    write_varint(out, i32::try_from(value.len())?);
    out.extend_from_slice(value.as_bytes());
    Ok(())
}

/// Reads a VarInt-prefixed UTF-8 string.
///
/// # Errors
/// [`Error::StringLengthOutOfBounds`] if the prefix is negative or above
/// [`MAX_STRING_LENGTH`], [`Error::ShortRead`] if the stream ends before the
/// declared number of bytes arrived.
pub async fn read_string<R: AsyncRead + Unpin>(reader: &mut R) -> Result<String, Error> {
    let length = read_varint(reader).await?;
    if !(0..=MAX_STRING_LENGTH).contains(&length) {
        return Err(Error::StringLengthOutOfBounds(length));
    }
    let expected = usize::try_from(length)?;
    let mut buf = vec![0; expected];
    reader.read_exact(&mut buf).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::UnexpectedEof {
            Error::ShortRead { expected }
        } else {
            Error::IoError(e)
        }
    })?;
    Ok(String::from_utf8(buf)?)
}

/// Appends a big-endian `u16`.
pub fn write_unsigned_short(out: &mut Vec<u8>, value: u16) {
    out.extend_from_slice(&value.to_be_bytes());
}

/// Reads a big-endian `u16`.
///
/// # Errors
/// The I/O error of the underlying reader.
pub async fn read_unsigned_short<R: AsyncRead + Unpin>(reader: &mut R) -> Result<u16, Error> {
    Ok(reader.read_u16().await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    const VARINT_VECTORS: &[(i32, &[u8])] = &[
        (0, &[0x00]),
        (1, &[0x01]),
        (2, &[0x02]),
        (127, &[0x7f]),
        (128, &[0x80, 0x01]),
        (255, &[0xff, 0x01]),
        (25565, &[0xdd, 0xc7, 0x01]),
        (2_147_483_647, &[0xff, 0xff, 0xff, 0xff, 0x07]),
        (-1, &[0xff, 0xff, 0xff, 0xff, 0x0f]),
        (-2_147_483_648, &[0x80, 0x80, 0x80, 0x80, 0x08]),
    ];

    #[test]
    fn varint_matches_wire_vectors() {
        for &(value, expected) in VARINT_VECTORS {
            let mut buf = Vec::new();
            write_varint(&mut buf, value);
            assert_eq!(buf, expected, "encoding {value}");
        }
    }

    #[tokio::test]
    async fn varint_reads_wire_vectors() {
        for &(expected, bytes) in VARINT_VECTORS {
            let mut input = bytes;
            assert_eq!(read_varint(&mut input).await.unwrap(), expected);
            assert!(input.is_empty(), "{expected} left trailing bytes");
        }
    }

    #[tokio::test]
    async fn varint_with_six_continuation_bytes_is_rejected() {
        let mut input: &[u8] = &[0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x01];
        assert!(matches!(
            read_varint(&mut input).await,
            Err(Error::VarIntTooLarge)
        ));
    }

    #[tokio::test]
    async fn varint_cut_short_is_io_error() {
        let mut input: &[u8] = &[0x80];
        match read_varint(&mut input).await {
            Err(Error::IoError(e)) => assert_eq!(e.kind(), std::io::ErrorKind::UnexpectedEof),
            other => panic!("unexpected result {other:?}"),
        }
    }

    #[tokio::test]
    async fn string_prefix_counts_bytes_not_chars() {
        for value in ["", "localhost", "héllo wörld", "🎮 mc.example.net 🎮"] {
            let mut buf = Vec::new();
            write_string(&mut buf, value).unwrap();

            let mut prefix = Vec::new();
            write_varint(&mut prefix, i32::try_from(value.len()).unwrap());
            assert!(buf.starts_with(&prefix));
            assert_eq!(buf.len(), prefix.len() + value.len());

            let mut input = buf.as_slice();
            assert_eq!(read_string(&mut input).await.unwrap(), value);
            assert!(input.is_empty());
        }
    }

    #[tokio::test]
    async fn string_with_negative_length_is_rejected() {
        let mut buf = Vec::new();
        write_varint(&mut buf, -1);
        let mut input = buf.as_slice();
        assert!(matches!(
            read_string(&mut input).await,
            Err(Error::StringLengthOutOfBounds(-1))
        ));
    }

    #[tokio::test]
    async fn string_longer_than_limit_is_rejected() {
        let mut buf = Vec::new();
        write_varint(&mut buf, MAX_STRING_LENGTH + 1);
        buf.extend(std::iter::repeat_n(b'a', 64));
        let mut input = buf.as_slice();
        assert!(matches!(
            read_string(&mut input).await,
            Err(Error::StringLengthOutOfBounds(32768))
        ));
    }

    #[tokio::test]
    async fn string_cut_short_is_short_read() {
        let mut buf = Vec::new();
        write_varint(&mut buf, 10);
        buf.extend_from_slice(b"abc");
        let mut input = buf.as_slice();
        assert!(matches!(
            read_string(&mut input).await,
            Err(Error::ShortRead { expected: 10 })
        ));
    }

    #[tokio::test]
    async fn unsigned_short_is_big_endian() {
        for (value, expected) in [
            (0_u16, [0x00, 0x00]),
            (128, [0x00, 0x80]),
            (25565, [0x63, 0xdd]),
            (u16::MAX, [0xff, 0xff]),
        ] {
            let mut buf = Vec::new();
            write_unsigned_short(&mut buf, value);
            assert_eq!(buf, expected);

            let mut input = buf.as_slice();
            assert_eq!(read_unsigned_short(&mut input).await.unwrap(), value);
        }
    }
}
