// util.rs

pub type HostelId = String;

const FNV32_OFFSET_BASIS: u32 = 0x811c_9dc5;
const FNV32_PRIME: u32 = 0x0100_0193;

/// Prefix carried by every derived hostel id.
pub const HOSTEL_ID_PREFIX: char = 'I';

/// 32-bit FNV-1a over the given bytes.
pub fn fnv32a(bytes: &[u8]) -> u32 {
    bytes.iter().fold(FNV32_OFFSET_BASIS, |hash, byte| {
        (hash ^ u32::from(*byte)).wrapping_mul(FNV32_PRIME)
    })
}

/// Derives the store key for a hostel from its name.
pub fn hostel_id(name: &str) -> HostelId {
    format!("{}{}", HOSTEL_ID_PREFIX, fnv32a(name.as_bytes()))
}
