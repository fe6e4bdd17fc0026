//! # Host Memory Access
//!
//! The host process owns every byte this crate looks at. [`RawMemory`] is the
//! capability it hands us: raw reads and writes at absolute addresses, plus
//! symbol resolution for the running build.
//!
//! ## Design Philosophy
//!
//! - Reads and writes take `&self`: the simulation mutates the same memory
//!   behind our back, so exclusive access would be a lie.
//! - Accessors are infallible, like a plain pointer dereference in the host.
//! - Typed accessors are provided methods on top of two byte primitives.

mod simulated;

pub use simulated::SimulatedMemory;

/// Read/write access to host memory.
pub trait RawMemory {
    /// Copies `buf.len()` bytes starting at `address` into `buf`.
    fn read_bytes(&self, address: usize, buf: &mut [u8]);

    /// Writes `bytes` starting at `address`.
    fn write_bytes(&self, address: usize, bytes: &[u8]);

    /// Resolves a symbolic name to an address in the running build.
    fn resolve_symbol(&self, name: &str) -> Option<usize>;

    /// Reads one byte.
    #[inline]
    fn read_u8(&self, address: usize) -> u8 {
        read_array::<1, Self>(self, address)[0]
    }

    /// Reads a `u16`.
    #[inline]
    fn read_u16(&self, address: usize, big_endian: bool) -> u16 {
        let raw = read_array::<2, Self>(self, address);
        if big_endian {
            u16::from_be_bytes(raw)
        } else {
            u16::from_le_bytes(raw)
        }
    }

    /// Reads a `u32`.
    #[inline]
    fn read_u32(&self, address: usize, big_endian: bool) -> u32 {
        let raw = read_array::<4, Self>(self, address);
        if big_endian {
            u32::from_be_bytes(raw)
        } else {
            u32::from_le_bytes(raw)
        }
    }

    /// Reads an `i32`.
    #[inline]
    fn read_i32(&self, address: usize, big_endian: bool) -> i32 {
        let raw = read_array::<4, Self>(self, address);
        if big_endian {
            i32::from_be_bytes(raw)
        } else {
            i32::from_le_bytes(raw)
        }
    }

    /// Reads an `f32`.
    #[inline]
    fn read_f32(&self, address: usize, big_endian: bool) -> f32 {
        f32::from_bits(self.read_u32(address, big_endian))
    }

    /// Writes one byte.
    #[inline]
    fn write_u8(&self, address: usize, value: u8) {
        self.write_bytes(address, &[value]);
    }

    /// Writes a `u16`.
    #[inline]
    fn write_u16(&self, address: usize, value: u16, big_endian: bool) {
        let raw = if big_endian {
            value.to_be_bytes()
        } else {
            value.to_le_bytes()
        };
        self.write_bytes(address, &raw);
    }

    /// Writes a `u32`.
    #[inline]
    fn write_u32(&self, address: usize, value: u32, big_endian: bool) {
        let raw = if big_endian {
            value.to_be_bytes()
        } else {
            value.to_le_bytes()
        };
        self.write_bytes(address, &raw);
    }

    /// Writes an `i32`.
    #[inline]
    fn write_i32(&self, address: usize, value: i32, big_endian: bool) {
        let raw = if big_endian {
            value.to_be_bytes()
        } else {
            value.to_le_bytes()
        };
        self.write_bytes(address, &raw);
    }

    /// Writes an `f32`.
    #[inline]
    fn write_f32(&self, address: usize, value: f32, big_endian: bool) {
        self.write_u32(address, value.to_bits(), big_endian);
    }

    /// Writes `text` as little-endian UTF-16 followed by a NUL code unit.
    fn write_utf16(&self, address: usize, text: &str) {
        let bytes: Vec<u8> = text
            .encode_utf16()
            .chain(std::iter::once(0))
            .flat_map(u16::to_le_bytes)
            .collect();
        self.write_bytes(address, &bytes);
    }
}

#[inline]
fn read_array<const N: usize, M: RawMemory + ?Sized>(memory: &M, address: usize) -> [u8; N] {
    let mut buf = [0u8; N];
    memory.read_bytes(address, &mut buf);
    buf
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory() -> SimulatedMemory {
        SimulatedMemory::with_region(0x1000, 0x100)
    }

    #[test]
    fn test_endianness_of_typed_accessors() {
        let mem = memory();
        mem.write_u32(0x1000, 0x0424_448B, false);
        let mut raw = [0u8; 4];
        mem.read_bytes(0x1000, &mut raw);
        assert_eq!(raw, [0x8B, 0x44, 0x24, 0x04]);

        mem.write_u16(0x1010, 0xBEEF, true);
        assert_eq!(mem.read_u8(0x1010), 0xBE);
        assert_eq!(mem.read_u16(0x1010, true), 0xBEEF);
        assert_eq!(mem.read_u16(0x1010, false), 0xEFBE);
    }

    #[test]
    fn test_signed_and_float_accessors() {
        let mem = memory();
        mem.write_i32(0x1020, -42, false);
        assert_eq!(mem.read_i32(0x1020, false), -42);

        mem.write_f32(0x1024, 1.5, true);
        assert!((mem.read_f32(0x1024, true) - 1.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_write_utf16_terminates() {
        let mem = memory();
        mem.write_u32(0x1040, u32::MAX, false);
        mem.write_u32(0x1044, u32::MAX, false);
        mem.write_utf16(0x1040, "Hi");
        assert_eq!(mem.read_u16(0x1040, false), u16::from(b'H'));
        assert_eq!(mem.read_u16(0x1042, false), u16::from(b'i'));
        assert_eq!(mem.read_u16(0x1044, false), 0);
    }
}
