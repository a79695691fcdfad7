//! Boolean transfer functions for the basic gate kinds.
//!
//! Every function takes the packed input pins of a gate (bit 0 is the left pin, bit 1 the right pin)
//! and returns a word whose bit 0 is the gate output. Callers must mask with `& 1`; the upper bits
//! are not meaningful. NAND and NOR are the complements of AND and OR rather than independent
//! definitions.

/// Inverter. Only bit 0 of the input is significant.
#[must_use]
pub const fn not(input: u32) -> u32 {
    !input
}

/// Two-input AND over bits 0 and 1.
#[must_use]
pub const fn and(input: u32) -> u32 {
    (input >> 1) & input & 1
}

/// Two-input OR over bits 0 and 1.
#[must_use]
pub const fn or(input: u32) -> u32 {
    (input | (input >> 1)) & 1
}

/// Two-input XOR over bits 0 and 1.
#[must_use]
pub const fn xor(input: u32) -> u32 {
    (input ^ (input >> 1)) & 1
}

/// Complement of [`and`].
#[must_use]
pub const fn nand(input: u32) -> u32 {
    !and(input)
}

/// Complement of [`or`].
#[must_use]
pub const fn nor(input: u32) -> u32 {
    !or(input)
}

/// Packs pin values into the bitmask convention used by the transfer functions.
///
/// Pin `i` lands in bit `i`. Values past bit 31 are dropped.
#[must_use]
pub fn pack<I: IntoIterator<Item = bool>>(pins: I) -> u32 {
    pins.into_iter()
        .take(u32::BITS as usize)
        .enumerate()
        .fold(0, |acc, (i, pin)| acc | (u32::from(pin) << i))
}
