use crate::Memory;
use std::ops::RangeInclusive;

const SIZE: usize = 0x10000;

/// A flat 64 KiB address space.
///
/// Ranges can be write protected to model ROM: writes there are dropped, so a
/// read-back after the write sees the old contents.
pub struct Ram {
    mem: Vec<u8>,
    protected: Vec<RangeInclusive<u16>>,
}

impl Ram {
    /// Zero filled memory without protected ranges.
    pub fn new() -> Ram {
        Ram {
            mem: vec![0; SIZE],
            protected: Vec::new(),
        }
    }

    /// Drop all future writes that land in `range`.
    pub fn protect(&mut self, range: RangeInclusive<u16>) {
        self.protected.push(range);
    }

    /// Whether a write to `address` would be dropped.
    pub fn is_protected(&self, address: u16) -> bool {
        self.protected.iter().any(|range| range.contains(&address))
    }

    /// Copy `bytes` in starting at `address`, bypassing write protection.
    ///
    /// This is how ROM contents get there in the first place.
    pub fn load(&mut self, address: u16, bytes: &[u8]) {
        for (offset, byte) in bytes.iter().enumerate() {
            self.mem[(address as usize + offset) % SIZE] = *byte;
        }
    }

    /// `len` bytes starting at `address`, wrapping at the top of memory.
    pub fn peek(&self, address: u16, len: usize) -> Vec<u8> {
        (0..len)
            .map(|offset| self.mem[(address as usize + offset) % SIZE])
            .collect()
    }
}

impl Default for Ram {
    fn default() -> Ram {
        Ram::new()
    }
}

impl Memory for Ram {
    fn write(&mut self, address: u16, value: u8) {
        if !self.is_protected(address) {
            self.mem[address as usize] = value;
        }
    }

    fn read(&self, address: u16) -> u8 {
        self.mem[address as usize]
    }
}

/// Memory backed by a plain buffer mapped at `$0000`.
///
/// Addresses past the end read as `$FF` (an unmapped bus) and swallow writes.
impl Memory for [u8] {
    fn write(&mut self, address: u16, value: u8) {
        if let Some(slot) = self.get_mut(address as usize) {
            *slot = value;
        }
    }

    fn read(&self, address: u16) -> u8 {
        self.get(address as usize).copied().unwrap_or(0xFF)
    }
}
