//! Raw signal extraction from payload bytes.
//!
//! Bit numbering follows DBC conventions: for little-endian (Intel) signals
//! the start bit is the least significant bit, for big-endian (Motorola)
//! signals it is the most significant bit, counted within its byte from the
//! LSB.

/// Byte order of a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    /// Little-endian (Intel) byte order
    LittleEndian,
    /// Big-endian (Motorola) byte order
    BigEndian,
}

impl From<dbc_rs::ByteOrder> for ByteOrder {
    fn from(order: dbc_rs::ByteOrder) -> Self {
        match order {
            dbc_rs::ByteOrder::LittleEndian => ByteOrder::LittleEndian,
            dbc_rs::ByteOrder::BigEndian => ByteOrder::BigEndian,
        }
    }
}

/// Placement and scaling of one signal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignalLayout {
    /// Start bit as written in the DBC
    pub start_bit: u16,
    /// Width in bits (1-64)
    pub bit_length: u16,
    /// Byte order
    pub byte_order: ByteOrder,
    /// Whether the raw value is two's complement
    pub is_signed: bool,
    /// physical = raw * factor + offset
    pub factor: f64,
    /// physical = raw * factor + offset
    pub offset: f64,
}

impl SignalLayout {
    /// Take the layout of a dbc-rs signal.
    pub fn from_dbc_signal(signal: &dbc_rs::Signal) -> Self {
        Self {
            start_bit: signal.start_bit(),
            bit_length: signal.length(),
            byte_order: signal.byte_order().into(),
            is_signed: !signal.is_unsigned(),
            factor: signal.factor(),
            offset: signal.offset(),
        }
    }

    /// Raw (unscaled, unsigned) value of this signal in `data`.
    pub fn raw(&self, data: &[u8]) -> u64 {
        extract_raw(data, self.start_bit, self.bit_length, self.byte_order)
    }

    /// Physical value of this signal in `data`.
    pub fn physical(&self, data: &[u8]) -> f64 {
        let raw = self.raw(data);
        let value = if self.is_signed {
            sign_extend(raw, self.bit_length) as f64
        } else {
            raw as f64
        };
        value * self.factor + self.offset
    }
}

/// Extract a raw signal value from payload bytes.
///
/// Bits that fall outside `data` read as zero. Returns 0 for empty data or a
/// width outside 1-64.
#[inline]
pub fn extract_raw(data: &[u8], start_bit: u16, bit_length: u16, byte_order: ByteOrder) -> u64 {
    if data.is_empty() || bit_length == 0 || bit_length > 64 {
        return 0;
    }

    match byte_order {
        ByteOrder::LittleEndian => extract_le(data, start_bit, bit_length),
        ByteOrder::BigEndian => extract_be(data, start_bit, bit_length),
    }
}

#[inline]
fn low_mask(bit_length: u16) -> u64 {
    if bit_length >= 64 {
        u64::MAX
    } else {
        (1u64 << bit_length) - 1
    }
}

#[inline]
fn extract_le(data: &[u8], start_bit: u16, bit_length: u16) -> u64 {
    let start_byte = (start_bit / 8) as usize;
    let bit_offset = u32::from(start_bit % 8);

    // Up to 9 bytes can be touched by a 64-bit field that is not byte aligned.
    let mut value: u128 = 0;
    let bytes_needed = (bit_offset as usize + bit_length as usize).div_ceil(8);
    for i in 0..bytes_needed {
        if let Some(&byte) = data.get(start_byte + i) {
            value |= u128::from(byte) << (i * 8);
        }
    }

    ((value >> bit_offset) as u64) & low_mask(bit_length)
}

#[inline]
fn extract_be(data: &[u8], start_bit: u16, bit_length: u16) -> u64 {
    let mut value: u64 = 0;
    let mut bits_remaining = bit_length;
    let mut current_byte = (start_bit / 8) as usize;
    let mut current_bit = start_bit % 8;

    while bits_remaining > 0 {
        let bits_to_take = (current_bit + 1).min(bits_remaining);
        let shift = current_bit + 1 - bits_to_take;
        let mask = low_mask(bits_to_take) as u8;
        let byte_value = data.get(current_byte).map_or(0, |b| (b >> shift) & mask);

        value = (value << bits_to_take) | u64::from(byte_value);
        bits_remaining -= bits_to_take;
        current_byte += 1;
        current_bit = 7;
    }

    value
}

/// Interpret the low `bit_length` bits of `value` as two's complement.
#[inline]
pub fn sign_extend(value: u64, bit_length: u16) -> i64 {
    if bit_length == 0 || bit_length >= 64 {
        return value as i64;
    }
    let sign_bit = 1u64 << (bit_length - 1);
    if value & sign_bit != 0 {
        (value | !low_mask(bit_length)) as i64
    } else {
        value as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_big_endian_word() {
        let data = [0x12, 0x34, 0x56, 0x78];
        assert_eq!(extract_raw(&data, 7, 16, ByteOrder::BigEndian), 0x1234);
        assert_eq!(extract_raw(&data, 15, 16, ByteOrder::BigEndian), 0x3456);
    }

    #[test]
    fn test_big_endian_partial_byte() {
        let data = [0x00, 0x00, 0b0110_0101];
        assert_eq!(extract_raw(&data, 23, 2, ByteOrder::BigEndian), 0b01);
        assert_eq!(extract_raw(&data, 21, 6, ByteOrder::BigEndian), 0b10_0101);
    }

    #[test]
    fn test_little_endian() {
        let data = [0x34, 0x12, 0xFF];
        assert_eq!(extract_raw(&data, 0, 16, ByteOrder::LittleEndian), 0x1234);
        assert_eq!(extract_raw(&data, 2, 6, ByteOrder::LittleEndian), 0x0D);
        assert_eq!(extract_raw(&data, 16, 8, ByteOrder::LittleEndian), 0xFF);
    }

    #[test]
    fn test_little_endian_unaligned_64() {
        let data = [0xFF; 9];
        assert_eq!(extract_raw(&data, 4, 64, ByteOrder::LittleEndian), u64::MAX);
    }

    #[test]
    fn test_out_of_range_bits_read_zero() {
        let data = [0xAB];
        assert_eq!(extract_raw(&data, 8, 8, ByteOrder::LittleEndian), 0);
        assert_eq!(extract_raw(&[], 0, 8, ByteOrder::LittleEndian), 0);
    }

    #[test]
    fn test_sign_extend() {
        assert_eq!(sign_extend(0xFFFF, 16), -1);
        assert_eq!(sign_extend(0x7FFF, 16), 32767);
        assert_eq!(sign_extend(0b10, 2), -2);
        assert_eq!(sign_extend(5, 64), 5);
    }
}
