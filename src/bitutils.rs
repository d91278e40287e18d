use std::fmt::{self, Write as _};
use std::io::{self, Write};

/// Extracts a fixed `number`-bit field starting at bit `offset`, with the layout
/// checked at compile time. No diagnostics are emitted.
macro_rules! bit_field {
    ($value:expr, $number:expr, $offset:expr) => {{
        const _: () = assert!($number > 0, "number must be greater than 0");
        const _: () = assert!($number + $offset <= 64, "field must fit in 64 bits");

        const MASK: u64 = (u64::MAX >> (64 - $number)) << $offset;

        ((($value) as u64) & MASK) >> $offset
    }};
}

pub(crate) use bit_field;

/// A value with the lowest `count` bits set, saturating at 64 bits.
pub(crate) fn low_ones(count: u64) -> u64 {
    u32::try_from(count)
        .ok()
        .and_then(|c| 1u64.checked_shl(c))
        .map_or(u64::MAX, |bit| bit - 1)
}

/// Hex rendering of `(1 << count) - 1` at unbounded width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct MaskHex(u64);

impl fmt::Display for MaskHex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 <= 64 {
            return write!(f, "{:x}", low_ones(self.0));
        }

        let lead = self.0 % 4;
        if lead > 0 {
            write!(f, "{:x}", (1u8 << lead) - 1)?;
        }
        for _ in 0..self.0 / 4 {
            f.write_char('f')?;
        }
        Ok(())
    }
}

fn masks(number: u32, offset: u32) -> (MaskHex, MaskHex) {
    let mask = MaskHex(u64::from(number) + u64::from(offset));
    let offmask = MaskHex(u64::from(offset));
    log::trace!("extracting {number} bits at offset {offset}: mask={mask} offmask={offmask}");
    (mask, offmask)
}

/// Bits `[offset, offset + number)` of `word`, right-aligned. Bits above 63 read
/// as zero, so an `offset` of 64 or more yields 0.
pub fn field(word: u64, number: u32, offset: u32) -> u64 {
    let mask = low_ones(u64::from(number) + u64::from(offset));
    let offmask = low_ones(u64::from(offset));
    (word & mask & !offmask).checked_shr(offset).unwrap_or(0)
}

/// Extracts `number` bits of `word` starting at bit `offset` and right-aligns them.
///
/// Prints `Mask: <hex>` and then `Offmask: <hex>` to standard output before
/// returning, where the masks are `(1 << (number + offset)) - 1` and
/// `(1 << offset) - 1` in lowercase hex without a prefix.
pub fn extract_bits(word: u64, number: u32, offset: u32) -> u64 {
    let (mask, offmask) = masks(number, offset);
    println!("Mask: {mask}");
    println!("Offmask: {offmask}");
    field(word, number, offset)
}

/// [`extract_bits`] writing its diagnostic lines to an arbitrary sink.
pub struct BitExtractor<W> {
    sink: W,
}

impl<W: Write> BitExtractor<W> {
    pub fn new(sink: W) -> Self {
        Self { sink }
    }

    pub fn extract(&mut self, word: u64, number: u32, offset: u32) -> io::Result<u64> {
        let (mask, offmask) = masks(number, offset);
        writeln!(self.sink, "Mask: {mask}")?;
        writeln!(self.sink, "Offmask: {offmask}")?;
        Ok(field(word, number, offset))
    }

    pub fn into_inner(self) -> W {
        self.sink
    }
}
