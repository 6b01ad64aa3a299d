//! # Instruction Encoding Constants and Helpers
//!
//! Centralized bit packing for the three UVM instruction layouts.
//!
//! ## Instruction Formats
//!
//! ```text
//! READ_MEM    (1 byte):  [opcode:3][00000]
//! WRITE_MEM,
//! BINARY_OP   (3 bytes): [opcode:3][a20..a16] [000][a15..a11] [000][a10..a6]
//! LOAD_CONST  (5 bytes): [opcode:3][v31..v27] [000][v26..v22] [000][v21..v17]
//!                        [000][v16..v12] [000][v11..v7]
//! ```
//!
//! Continuation bytes carry 5 payload bits each. The low 7 bits of a constant
//! and the low 6 bits of an address are never written, so they always decode
//! as zero. Existing binaries depend on this layout; do not widen it.

use crate::Opcode;

// ============================================================================
// Bit Position Constants
// ============================================================================

/// Opcode field: top 3 bits of the first byte
pub const OPCODE_SHIFT: u32 = 5;

/// Payload bits carried by every byte
pub const PAYLOAD_BITS: u32 = 5;

/// Shift of the first-byte payload for LOAD_CONST (value bits 31..27)
pub const VALUE_SHIFT: u32 = 27;

/// Shift of the first-byte payload for WRITE_MEM/BINARY_OP (address bits 20..16)
pub const ADDRESS_SHIFT: u32 = 16;

/// Low constant bits that never reach the encoding
pub const VALUE_DROPPED_BITS: u32 = 7;

/// Low address bits that never reach the encoding
pub const ADDRESS_DROPPED_BITS: u32 = 6;

// ============================================================================
// Field Masks
// ============================================================================

/// Payload mask (5 bits)
pub const PAYLOAD_MASK: u8 = 0x1F;

/// Constant operand mask (32 bits)
pub const VALUE_MASK: u64 = 0xFFFF_FFFF;

/// Address operand mask (21 bits)
pub const ADDRESS_MASK: u64 = 0x1F_FFFF;

// ============================================================================
// Encoded Lengths
// ============================================================================

/// READ_MEM length in bytes
pub const READ_MEM_LEN: usize = 1;

/// WRITE_MEM / BINARY_OP length in bytes
pub const ADDRESS_FORM_LEN: usize = 3;

/// LOAD_CONST length in bytes
pub const LOAD_CONST_LEN: usize = 5;

/// Longest encoded instruction
pub const MAX_INSTRUCTION_LEN: usize = LOAD_CONST_LEN;

// ============================================================================
// Operand Masking
// ============================================================================

/// Reduce a constant to the 32 bits the encoder packs.
///
/// Negative values wrap the same way `value & 0xFFFFFFFF` does on an
/// unbounded two's complement integer.
#[inline]
pub const fn mask_value(value: i64) -> u32 {
    ((value as u64) & VALUE_MASK) as u32
}

/// Reduce an address to the 21 bits the encoder packs
#[inline]
pub const fn mask_address(address: i64) -> u32 {
    ((address as u64) & ADDRESS_MASK) as u32
}

/// The constant an encode/decode round trip yields
#[inline]
pub const fn truncate_value(value: i64) -> u32 {
    mask_value(value) & !((1 << VALUE_DROPPED_BITS) - 1)
}

/// The address an encode/decode round trip yields
#[inline]
pub const fn truncate_address(address: i64) -> u32 {
    mask_address(address) & !((1 << ADDRESS_DROPPED_BITS) - 1)
}

// ============================================================================
// Field Extraction
// ============================================================================

/// Extract the 3-bit opcode field from a first byte
#[inline]
pub const fn extract_opcode_bits(byte: u8) -> u8 {
    (byte >> OPCODE_SHIFT) & Opcode::MASK
}

#[inline]
const fn first_byte(opcode: Opcode, payload: u32) -> u8 {
    (opcode.to_u8() << OPCODE_SHIFT) | (payload as u8 & PAYLOAD_MASK)
}

/// Shift of the `n`th payload field counted from the first byte
#[inline]
const fn field_shift(first: u32, n: u32) -> u32 {
    first - n * PAYLOAD_BITS
}

#[inline]
const fn continuation(payload: u32) -> u8 {
    payload as u8 & PAYLOAD_MASK
}

// ============================================================================
// READ_MEM
// ============================================================================

/// Encode READ_MEM. The low 5 bits are unused and zero.
#[inline]
pub const fn encode_read_mem() -> [u8; READ_MEM_LEN] {
    [Opcode::ReadMem.to_u8() << OPCODE_SHIFT]
}

// ============================================================================
// WRITE_MEM / BINARY_OP
// ============================================================================

/// Encode a 21-bit address instruction. Bits above 21 are discarded.
pub const fn encode_address(opcode: Opcode, address: i64) -> [u8; ADDRESS_FORM_LEN] {
    let b = mask_address(address);
    [
        first_byte(opcode, b >> ADDRESS_SHIFT),
        continuation(b >> field_shift(ADDRESS_SHIFT, 1)),
        continuation(b >> field_shift(ADDRESS_SHIFT, 2)),
    ]
}

/// Decode the operand of a WRITE_MEM/BINARY_OP encoding.
///
/// Continuation bytes are OR-ed in unmasked; encoder output never sets
/// their high bits.
pub const fn decode_address(bytes: &[u8; ADDRESS_FORM_LEN]) -> u32 {
    (((bytes[0] & PAYLOAD_MASK) as u32) << ADDRESS_SHIFT)
        | ((bytes[1] as u32) << field_shift(ADDRESS_SHIFT, 1))
        | ((bytes[2] as u32) << field_shift(ADDRESS_SHIFT, 2))
}

// ============================================================================
// LOAD_CONST
// ============================================================================

/// Encode LOAD_CONST. Bits above 32 are discarded.
pub const fn encode_load_const(value: i64) -> [u8; LOAD_CONST_LEN] {
    let b = mask_value(value);
    [
        first_byte(Opcode::LoadConst, b >> VALUE_SHIFT),
        continuation(b >> field_shift(VALUE_SHIFT, 1)),
        continuation(b >> field_shift(VALUE_SHIFT, 2)),
        continuation(b >> field_shift(VALUE_SHIFT, 3)),
        continuation(b >> field_shift(VALUE_SHIFT, 4)),
    ]
}

/// Decode the operand of a LOAD_CONST encoding
pub const fn decode_load_const(bytes: &[u8; LOAD_CONST_LEN]) -> u32 {
    (((bytes[0] & PAYLOAD_MASK) as u32) << VALUE_SHIFT)
        | ((bytes[1] as u32) << field_shift(VALUE_SHIFT, 1))
        | ((bytes[2] as u32) << field_shift(VALUE_SHIFT, 2))
        | ((bytes[3] as u32) << field_shift(VALUE_SHIFT, 3))
        | ((bytes[4] as u32) << field_shift(VALUE_SHIFT, 4))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_opcode_bits() {
        assert_eq!(extract_opcode_bits(0xF8), 7);
        assert_eq!(extract_opcode_bits(0xA0), 5);
        assert_eq!(extract_opcode_bits(0x60), 3);
        assert_eq!(extract_opcode_bits(0x1F), 0);
    }

    #[test]
    fn test_encode_read_mem() {
        assert_eq!(encode_read_mem(), [0x00]);
    }

    #[test]
    fn test_encode_load_const_128() {
        // 128 = bit 7, the lowest bit that survives
        assert_eq!(encode_load_const(128), [0xE0, 0x00, 0x00, 0x00, 0x01]);
        assert_eq!(decode_load_const(&encode_load_const(128)), 128);
    }

    #[test]
    fn test_encode_load_const_607() {
        // 607 = 0b100_1011111: only bits 7 and 9 survive
        let bytes = encode_load_const(607);
        assert_eq!(bytes, [0xE0, 0x00, 0x00, 0x00, 0x04]);
        assert_eq!(decode_load_const(&bytes), 512);
    }

    #[test]
    fn test_encode_load_const_small_value_vanishes() {
        assert_eq!(encode_load_const(100), [0xE0, 0, 0, 0, 0]);
        assert_eq!(decode_load_const(&encode_load_const(100)), 0);
    }

    #[test]
    fn test_encode_load_const_max() {
        let bytes = encode_load_const(0xFFFF_FFFF);
        assert_eq!(bytes, [0xFF, 0x1F, 0x1F, 0x1F, 0x1F]);
        assert_eq!(decode_load_const(&bytes), 0xFFFF_FF80);
    }

    #[test]
    fn test_encode_load_const_masks_high_bits() {
        assert_eq!(encode_load_const(0x1_0000_0080), encode_load_const(0x80));
        assert_eq!(encode_load_const(-1), encode_load_const(0xFFFF_FFFF));
    }

    #[test]
    fn test_encode_address_777() {
        // 777 = 0b11_0000_1001: bits 8 and 9 survive
        let bytes = encode_address(Opcode::WriteMem, 777);
        assert_eq!(bytes, [0xA0, 0x00, 0x0C]);
        assert_eq!(decode_address(&bytes), 768);
    }

    #[test]
    fn test_encode_address_64() {
        let bytes = encode_address(Opcode::WriteMem, 64);
        assert_eq!(bytes, [0xA0, 0x00, 0x01]);
        assert_eq!(decode_address(&bytes), 64);
    }

    #[test]
    fn test_encode_address_binary_op() {
        let bytes = encode_address(Opcode::BinaryOp, 0);
        assert_eq!(bytes, [0x60, 0x00, 0x00]);
    }

    #[test]
    fn test_encode_address_masks_to_21_bits() {
        assert_eq!(
            encode_address(Opcode::WriteMem, 0x20_0040),
            encode_address(Opcode::WriteMem, 0x40)
        );
        let bytes = encode_address(Opcode::WriteMem, 0x1F_FFFF);
        assert_eq!(bytes, [0xBF, 0x1F, 0x1F]);
        assert_eq!(decode_address(&bytes), 0x1F_FFC0);
    }

    #[test]
    fn test_continuation_high_bits_are_zero() {
        for byte in &encode_load_const(0xFFFF_FFFF)[1..] {
            assert_eq!(byte & !PAYLOAD_MASK, 0);
        }
        for byte in &encode_address(Opcode::WriteMem, 0x1F_FFFF)[1..] {
            assert_eq!(byte & !PAYLOAD_MASK, 0);
        }
    }

    #[test]
    fn test_last_field_sits_on_dropped_bits() {
        assert_eq!(field_shift(VALUE_SHIFT, 4), VALUE_DROPPED_BITS);
        assert_eq!(field_shift(ADDRESS_SHIFT, 2), ADDRESS_DROPPED_BITS);
    }

    #[test]
    fn test_truncate_helpers() {
        assert_eq!(truncate_value(128), 128);
        assert_eq!(truncate_value(100), 0);
        assert_eq!(truncate_value(42), 0);
        assert_eq!(truncate_address(64), 64);
        assert_eq!(truncate_address(777), 768);
    }
}
