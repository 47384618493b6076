/// Running frame checksum.
///
/// The serial protocol calls this byte the CRC but it is a plain XOR of
/// every byte from the version field through the end of the body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Checksum(u8);

impl Checksum {
    pub const fn new() -> Self {
        Self(0)
    }

    /// Folds a single byte into the running value
    pub fn push(&mut self, byte: u8) {
        self.0 ^= byte;
    }

    /// Folds a slice into the running value (for streaming computation)
    pub fn update(&mut self, data: &[u8]) {
        for &byte in data {
            self.0 ^= byte;
        }
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    pub fn reset(&mut self) {
        self.0 = 0;
    }
}

/// Computes the checksum of `data` in one pass
pub fn checksum(data: &[u8]) -> u8 {
    data.iter().fold(0, |acc, byte| acc ^ byte)
}
