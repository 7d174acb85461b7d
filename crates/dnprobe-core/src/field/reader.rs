use super::error::FieldError;
use super::{FieldSpec, Width};

/// Bounds-checked little-endian reads over an immutable byte buffer.
pub struct FieldReader<'a> {
    payload: &'a [u8],
}

impl<'a> FieldReader<'a> {
    pub fn new(payload: &'a [u8]) -> Self {
        Self { payload }
    }

    pub fn read_slice(&self, offset: usize, width: usize) -> Result<&'a [u8], FieldError> {
        let out_of_range = FieldError::OutOfRange {
            offset,
            width,
            len: self.payload.len(),
        };
        let end = offset.checked_add(width).ok_or(out_of_range.clone())?;
        self.payload.get(offset..end).ok_or(out_of_range)
    }

    pub fn read(&self, spec: FieldSpec) -> Result<i64, FieldError> {
        self.read_int(spec.offset, spec.width, spec.signed)
    }

    pub fn read_int(&self, offset: usize, width: Width, signed: bool) -> Result<i64, FieldError> {
        let bytes = self.read_slice(offset, width.len())?;
        let value = match (width, signed) {
            (Width::One, false) => i64::from(bytes[0]),
            (Width::One, true) => i64::from(bytes[0] as i8),
            (Width::Two, false) => i64::from(u16::from_le_bytes([bytes[0], bytes[1]])),
            (Width::Two, true) => i64::from(i16::from_le_bytes([bytes[0], bytes[1]])),
            (Width::Four, false) => i64::from(u32::from_le_bytes([
                bytes[0], bytes[1], bytes[2], bytes[3],
            ])),
            (Width::Four, true) => i64::from(i32::from_le_bytes([
                bytes[0], bytes[1], bytes[2], bytes[3],
            ])),
        };
        Ok(value)
    }
}

/// Read one little-endian integer from `buffer`.
///
/// # Examples
/// ```
/// use dnprobe_core::field::{Width, read_int};
///
/// let buffer = [0x00, 0x80, 0xff];
/// assert_eq!(read_int(&buffer, 0, Width::Two, false).unwrap(), 0x8000);
/// assert_eq!(read_int(&buffer, 0, Width::Two, true).unwrap(), -32768);
/// assert!(read_int(&buffer, 2, Width::Two, true).is_err());
/// ```
///
/// # Errors
/// Returns `FieldError::OutOfRange` when `offset + width` exceeds the buffer.
pub fn read_int(buffer: &[u8], offset: usize, width: Width, signed: bool) -> Result<i64, FieldError> {
    FieldReader::new(buffer).read_int(offset, width, signed)
}

#[cfg(test)]
mod tests {
    use super::{FieldReader, read_int};
    use crate::field::error::FieldError;
    use crate::field::{FieldSpec, Width};
    use proptest::prelude::*;

    #[test]
    fn reads_unsigned_widths() {
        let buffer = [0x2f, 0x46, 0x01, 0x00, 0xff];
        assert_eq!(read_int(&buffer, 0, Width::One, false).unwrap(), 0x2f);
        assert_eq!(read_int(&buffer, 0, Width::Two, false).unwrap(), 17967);
        assert_eq!(read_int(&buffer, 0, Width::Four, false).unwrap(), 0x0001_462f);
        assert_eq!(read_int(&buffer, 4, Width::One, false).unwrap(), 255);
    }

    #[test]
    fn reads_signed_twos_complement() {
        let buffer = [0xe4, 0x80, 0xf1, 0xff, 0xff, 0xff, 0xff];
        assert_eq!(read_int(&buffer, 0, Width::One, true).unwrap(), -28);
        assert_eq!(read_int(&buffer, 1, Width::Two, true).unwrap(), -3712);
        assert_eq!(read_int(&buffer, 3, Width::Four, true).unwrap(), -1);
    }

    #[test]
    fn reads_spec() {
        let buffer = [0x00, 0x00, 0x07];
        let reader = FieldReader::new(&buffer);
        assert_eq!(reader.read(FieldSpec::u8(2)).unwrap(), 7);
    }

    #[test]
    fn out_of_range_reports_position() {
        let buffer = [0u8; 3];
        let err = read_int(&buffer, 2, Width::Two, false).unwrap_err();
        assert_eq!(
            err,
            FieldError::OutOfRange {
                offset: 2,
                width: 2,
                len: 3
            }
        );
    }

    #[test]
    fn empty_buffer_rejects_every_read() {
        assert!(read_int(&[], 0, Width::One, false).is_err());
    }

    #[test]
    fn offset_overflow_is_out_of_range() {
        let buffer = [0u8; 4];
        let err = read_int(&buffer, usize::MAX, Width::Four, true).unwrap_err();
        assert!(matches!(err, FieldError::OutOfRange { .. }));
    }

    proptest! {
        #[test]
        fn signed_u16_round_trip(buffer in proptest::collection::vec(any::<u8>(), 2..64), pick in any::<usize>()) {
            let offset = pick % (buffer.len() - 1);
            let value = read_int(&buffer, offset, Width::Two, true).unwrap();
            let encoded = (value as i16).to_le_bytes();
            prop_assert_eq!(&buffer[offset..offset + 2], &encoded[..]);
        }

        #[test]
        fn reads_past_end_fail(buffer in proptest::collection::vec(any::<u8>(), 0..64), extra in 0usize..16) {
            for width in [Width::One, Width::Two, Width::Four] {
                let first_bad = (buffer.len() + 1).saturating_sub(width.len());
                let offset = first_bad + extra;
                let is_out_of_range = matches!(
                    read_int(&buffer, offset, width, true),
                    Err(FieldError::OutOfRange { .. })
                );
                prop_assert!(is_out_of_range);
            }
        }
    }
}
