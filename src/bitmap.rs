use crate::error::{Error, Format, Result};
use core::fmt::{Debug, Display, Formatter};
use core::iter::{FusedIterator, StepBy};
use core::ops::{Bound, Range, RangeBounds};
use core::str::FromStr;
use std::borrow::Cow;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

/// Computes the number of bytes needed to store `bit_count` bits.
///
/// # Examples
/// ```
/// use byte_bitmap::byte_count;
///
/// assert_eq!(byte_count(0), 0);
/// assert_eq!(byte_count(9), 2);
/// assert_eq!(byte_count(16), 2);
/// assert_eq!(byte_count(17), 3);
/// ```
pub const fn byte_count(bit_count: usize) -> usize {
    bit_count.div_ceil(8)
}

/// Number of set bits for every possible byte value.
pub(crate) const BIT_CNT: [u8; 256] = {
    let mut table = [0u8; 256];
    let mut value = 0;
    while value < 256 {
        table[value] = (value as u8).count_ones() as u8;
        value += 1;
    }
    table
};

pub(crate) const fn ones_mask(start_bit: usize, width: usize) -> u8 {
    if width >= 8 {
        // shift would be undefined / panic on u8
        !0u8
    } else {
        // if `1u8 << shift_amount` == 0 wrap around
        (1u8 << width).wrapping_sub(1) << start_bit
    }
}

/// A fixed-capacity bitmap backed by a byte buffer.
///
/// Bit `p` lives in byte `p / 8` under the mask `1 << (p % 8)`, so the
/// buffer is the densest possible representation and doubles as the on-disk
/// format used by [`save_to_file`] and [`load_from_file`].
///
/// Two sizes are tracked:
///
/// - [`bit_capacity`] is the number of bits the bitmap was created for. Range
///   operations default to and are clamped by it.
/// - [`size`] is `byte_size() * 8`, which includes the padding bits of the
///   last byte. Single-bit access, counting, iteration and the string
///   encodings all cover the full `size()`.
///
/// [`save_to_file`]: BitMap::save_to_file
/// [`load_from_file`]: BitMap::load_from_file
/// [`bit_capacity`]: BitMap::bit_capacity
/// [`size`]: BitMap::size
#[derive(PartialEq, Eq, Hash, Clone, Default)]
pub struct BitMap {
    bits: usize,
    bytes: Vec<u8>,
}

impl BitMap {
    /// Creates a new bitmap able to hold `bit_count` bits, all unset.
    ///
    /// # Examples
    /// ```
    /// use byte_bitmap::BitMap;
    ///
    /// let bitmap = BitMap::new(10);
    /// assert_eq!(bitmap.bit_capacity(), 10);
    /// assert_eq!(bitmap.size(), 16);
    /// assert_eq!(bitmap.count(), 0);
    /// ```
    pub fn new(bit_count: usize) -> Self {
        Self::with_preset(bit_count, false)
    }

    /// Creates a new bitmap with every allocated bit set, padding included.
    ///
    /// # Examples
    /// ```
    /// use byte_bitmap::BitMap;
    ///
    /// let bitmap = BitMap::with_all_set(10);
    /// assert_eq!(bitmap.count(), 16);
    /// assert!(bitmap.all());
    /// ```
    #[inline]
    pub fn with_all_set(bit_count: usize) -> Self {
        Self::with_preset(bit_count, true)
    }

    /// Creates a new bitmap whose bytes are all `0xFF` when `preset` is
    /// `true` and all `0x00` otherwise.
    pub fn with_preset(bit_count: usize, preset: bool) -> Self {
        let fill = if preset { !0u8 } else { 0u8 };
        Self {
            bits: bit_count,
            bytes: vec![fill; byte_count(bit_count)],
        }
    }

    /// Wraps `buffer` as the bitmap storage without copying or padding.
    ///
    /// The bit capacity is `buffer.len() * 8`.
    ///
    /// # Examples
    /// ```
    /// use byte_bitmap::BitMap;
    ///
    /// let bitmap = BitMap::from_bytes(vec![0x01, 0x80]);
    /// assert_eq!(bitmap.bit_capacity(), 16);
    /// assert_eq!(bitmap.nonzero_positions().collect::<Vec<_>>(), [0, 15]);
    /// ```
    pub fn from_bytes(buffer: impl Into<Vec<u8>>) -> Self {
        let bytes = buffer.into();
        Self {
            bits: bytes.len() * 8,
            bytes,
        }
    }

    /// The number of bits requested at construction.
    #[inline]
    pub fn bit_capacity(&self) -> usize {
        self.bits
    }

    /// The number of addressable bits, `byte_size() * 8`.
    #[inline]
    pub fn size(&self) -> usize {
        self.bytes.len() * 8
    }

    /// The number of bytes in the backing buffer.
    #[inline]
    pub fn byte_size(&self) -> usize {
        self.bytes.len()
    }

    /// Sets the bit at the given index.
    ///
    /// # Errors
    /// Returns [`Error::OutOfRange`] if `idx >= self.size()`.
    ///
    /// # Examples
    /// ```
    /// use byte_bitmap::BitMap;
    ///
    /// let mut bm = BitMap::new(8);
    /// assert!(!bm.test(3)?);
    /// bm.set(3)?;
    /// assert!(bm.test(3)?);
    /// # Ok::<(), byte_bitmap::Error>(())
    /// ```
    #[inline]
    pub fn set(&mut self, idx: usize) -> Result<()> {
        let (byte_idx, bit_idx) = self.checked_idxs(idx)?;
        self.bytes[byte_idx] |= 1 << bit_idx;
        Ok(())
    }

    /// Unsets the bit at the given index.
    ///
    /// # Errors
    /// Returns [`Error::OutOfRange`] if `idx >= self.size()`.
    ///
    /// # Examples
    /// ```
    /// use byte_bitmap::BitMap;
    ///
    /// let mut bm = BitMap::with_all_set(8);
    /// bm.unset(3)?;
    /// assert!(!bm.test(3)?);
    /// # Ok::<(), byte_bitmap::Error>(())
    /// ```
    #[inline]
    pub fn unset(&mut self, idx: usize) -> Result<()> {
        let (byte_idx, bit_idx) = self.checked_idxs(idx)?;
        self.bytes[byte_idx] &= !(1 << bit_idx);
        Ok(())
    }

    /// Alias for [`unset`](BitMap::unset).
    #[inline]
    pub fn reset(&mut self, idx: usize) -> Result<()> {
        self.unset(idx)
    }

    /// Toggles the bit at the given index.
    ///
    /// Returns the previous value of the bit (before the toggle).
    ///
    /// # Errors
    /// Returns [`Error::OutOfRange`] if `idx >= self.size()`.
    ///
    /// # Examples
    /// ```
    /// use byte_bitmap::BitMap;
    ///
    /// let mut bm = BitMap::new(8);
    /// assert_eq!(bm.flip(4)?, false); // flipped from false to true
    /// assert_eq!(bm.flip(4)?, true);  // flipped from true to false
    /// # Ok::<(), byte_bitmap::Error>(())
    /// ```
    #[inline]
    pub fn flip(&mut self, idx: usize) -> Result<bool> {
        let (byte_idx, bit_idx) = self.checked_idxs(idx)?;
        let bit = self.bytes[byte_idx] & 1 << bit_idx != 0;
        self.bytes[byte_idx] ^= 1 << bit_idx;
        Ok(bit)
    }

    /// Returns `true` if the bit at the given index is set.
    ///
    /// # Errors
    /// Returns [`Error::OutOfRange`] if `idx >= self.size()`.
    #[inline]
    pub fn test(&self, idx: usize) -> Result<bool> {
        let (byte_idx, bit_idx) = self.checked_idxs(idx)?;
        Ok(self.bytes[byte_idx] & 1 << bit_idx != 0)
    }

    /// Sets the bit at the given index to `value`.
    ///
    /// # Errors
    /// Returns [`Error::OutOfRange`] if `idx >= self.size()`.
    pub fn assign(&mut self, idx: usize, value: bool) -> Result<()> {
        if value {
            self.set(idx)
        } else {
            self.unset(idx)
        }
    }

    /// Sets all bits in the given range.
    ///
    /// An unbounded end means [`bit_capacity`](BitMap::bit_capacity), and an
    /// end past it is clamped to it. Empty ranges are a no-op.
    ///
    /// # Examples
    /// ```
    /// use byte_bitmap::BitMap;
    ///
    /// let mut bm = BitMap::new(10);
    /// bm.set_range(2..5);
    /// assert_eq!(bm.nonzero_positions().collect::<Vec<_>>(), [2, 3, 4]);
    ///
    /// bm.set_range(8..);
    /// assert_eq!(bm.nonzero_positions().collect::<Vec<_>>(), [2, 3, 4, 8, 9]);
    /// ```
    pub fn set_range<R: RangeBounds<usize>>(&mut self, range: R) {
        let range = self.clamp_range(&range);
        if range.start >= range.end {
            return;
        }

        let (start_byte, start_bit) = Self::idxs(range.start);
        let (end_byte, end_bit) = Self::idxs(range.end - 1);

        // all within one byte
        if start_byte == end_byte {
            let width = end_bit - start_bit + 1;
            self.bytes[start_byte] |= ones_mask(start_bit, width);
            return;
        }

        self.bytes[start_byte] |= !0u8 << start_bit;
        self.bytes[start_byte + 1..end_byte].fill(!0);
        self.bytes[end_byte] |= ones_mask(0, end_bit + 1);
    }

    /// Unsets all bits in the given range.
    ///
    /// Range handling matches [`set_range`](BitMap::set_range).
    ///
    /// # Examples
    /// ```
    /// use byte_bitmap::BitMap;
    ///
    /// let mut bm = BitMap::with_all_set(8);
    /// bm.unset_range(2..6);
    /// assert!(!bm.test(2)?);
    /// assert!(!bm.test(5)?);
    /// assert!(bm.test(6)?);
    /// # Ok::<(), byte_bitmap::Error>(())
    /// ```
    pub fn unset_range<R: RangeBounds<usize>>(&mut self, range: R) {
        let range = self.clamp_range(&range);
        if range.start >= range.end {
            return;
        }

        let (start_byte, start_bit) = Self::idxs(range.start);
        let (end_byte, end_bit) = Self::idxs(range.end - 1);

        if start_byte == end_byte {
            let width = end_bit - start_bit + 1;
            self.bytes[start_byte] &= !ones_mask(start_bit, width);
            return;
        }

        self.bytes[start_byte] &= (1u8 << start_bit) - 1;
        self.bytes[start_byte + 1..end_byte].fill(0);
        self.bytes[end_byte] &= !ones_mask(0, end_bit + 1);
    }

    /// Sets every `step`-th bit of the given range, starting at its start.
    ///
    /// # Errors
    /// Returns [`Error::InvalidArgument`] if `step == 0`.
    ///
    /// # Examples
    /// ```
    /// use byte_bitmap::BitMap;
    ///
    /// let mut bm = BitMap::new(10);
    /// bm.set_range_step(1.., 3)?;
    /// assert_eq!(bm.nonzero_positions().collect::<Vec<_>>(), [1, 4, 7]);
    /// # Ok::<(), byte_bitmap::Error>(())
    /// ```
    pub fn set_range_step<R: RangeBounds<usize>>(&mut self, range: R, step: usize) -> Result<()> {
        for idx in self.positions(&range, step)? {
            self.set_unchecked(idx, true);
        }
        Ok(())
    }

    /// Unsets every `step`-th bit of the given range, starting at its start.
    ///
    /// # Errors
    /// Returns [`Error::InvalidArgument`] if `step == 0`.
    pub fn unset_range_step<R: RangeBounds<usize>>(
        &mut self,
        range: R,
        step: usize,
    ) -> Result<()> {
        for idx in self.positions(&range, step)? {
            self.set_unchecked(idx, false);
        }
        Ok(())
    }

    /// Reads every `step`-th bit of the given range, in ascending order.
    ///
    /// # Errors
    /// Returns [`Error::InvalidArgument`] if `step == 0`.
    ///
    /// # Examples
    /// ```
    /// use byte_bitmap::BitMap;
    ///
    /// let bm = BitMap::from_binary_string("1010")?;
    /// assert_eq!(bm.get_range(.., 1)?, [false, true, false, true]);
    /// assert_eq!(bm.get_range(1.., 2)?, [true, true]);
    /// # Ok::<(), byte_bitmap::Error>(())
    /// ```
    pub fn get_range<R: RangeBounds<usize>>(&self, range: R, step: usize) -> Result<Vec<bool>> {
        Ok(self
            .positions(&range, step)?
            .map(|idx| self.bit_unchecked(idx))
            .collect())
    }

    /// Writes `values` to every `step`-th bit of the given range, in order.
    ///
    /// # Errors
    /// Returns [`Error::InvalidArgument`] if `step == 0` or if `values` does
    /// not hold exactly one value per addressed bit. Nothing is written in
    /// either case.
    ///
    /// # Examples
    /// ```
    /// use byte_bitmap::BitMap;
    ///
    /// let mut bm = BitMap::new(8);
    /// bm.assign_range(0..4, 1, &[true, false, true, true])?;
    /// assert_eq!(bm.to_bytes(), [0b1101]);
    /// assert!(bm.assign_range(0..4, 1, &[true]).is_err());
    /// # Ok::<(), byte_bitmap::Error>(())
    /// ```
    pub fn assign_range<R: RangeBounds<usize>>(
        &mut self,
        range: R,
        step: usize,
        values: &[bool],
    ) -> Result<()> {
        let positions = self.positions(&range, step)?;
        if positions.len() != values.len() {
            return Err(Error::InvalidArgument(format!(
                "range addresses {} bits but {} values were given",
                positions.len(),
                values.len()
            )));
        }
        for (idx, &value) in positions.zip(values) {
            self.set_unchecked(idx, value);
        }
        Ok(())
    }

    /// Returns the number of set bits, padding included.
    ///
    /// # Examples
    /// ```
    /// use byte_bitmap::BitMap;
    ///
    /// let bm = BitMap::from_binary_string("1010")?;
    /// assert_eq!(bm.count(), 2);
    /// # Ok::<(), byte_bitmap::Error>(())
    /// ```
    pub fn count(&self) -> usize {
        self.bytes
            .iter()
            .map(|&byte| BIT_CNT[byte as usize] as usize)
            .sum()
    }

    /// Returns `true` if at least one bit is set.
    #[inline]
    pub fn any(&self) -> bool {
        self.bytes.iter().any(|&byte| byte != 0)
    }

    /// Returns `true` if no bit is set.
    #[inline]
    pub fn none(&self) -> bool {
        !self.any()
    }

    /// Returns `true` if every addressable bit is set. An empty bitmap
    /// trivially satisfies this.
    #[inline]
    pub fn all(&self) -> bool {
        self.count() == self.size()
    }

    /// Returns an iterator over all `size()` bits as `bool`, from least to
    /// most significant.
    #[inline]
    pub fn iter(&self) -> BitMapIter<'_> {
        BitMapIter {
            bytes: &self.bytes,
            idx: 0,
        }
    }

    /// Returns an iterator over the indices of all set bits, in ascending
    /// order.
    ///
    /// Iterating through the entire iterator runs in O(max(k, b)) where k is
    /// the number of set bits and b is the number of bytes.
    ///
    /// # Examples
    /// ```
    /// use byte_bitmap::BitMap;
    ///
    /// let bm = BitMap::from_binary_string("10101")?;
    /// assert_eq!(bm.nonzero_positions().collect::<Vec<_>>(), [0, 2, 4]);
    /// # Ok::<(), byte_bitmap::Error>(())
    /// ```
    #[inline]
    pub fn nonzero_positions(&self) -> IterOnes<'_> {
        IterOnes {
            bytes: &self.bytes,
            byte_idx: 0,
            current: self.bytes.first().copied().unwrap_or(0),
            base_bit_idx: 0,
        }
    }

    /// Returns an iterator over the indices of all unset bits, in ascending
    /// order. Padding bits are included.
    ///
    /// # Examples
    /// ```
    /// use byte_bitmap::BitMap;
    ///
    /// let bm = BitMap::from_binary_string("10101")?;
    /// assert_eq!(bm.zero_positions().collect::<Vec<_>>(), [1, 3, 5, 6, 7]);
    /// # Ok::<(), byte_bitmap::Error>(())
    /// ```
    #[inline]
    pub fn zero_positions(&self) -> IterZeros<'_> {
        IterZeros {
            bytes: &self.bytes,
            byte_idx: 0,
            current: !self.bytes.first().copied().unwrap_or(!0),
            base_bit_idx: 0,
        }
    }

    /// Returns a copy of the backing buffer.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.bytes.clone()
    }

    /// Borrows the backing buffer.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Renders the bitmap as `'0'`/`'1'` characters, highest bit first.
    ///
    /// The string is always `size()` characters long and is accepted by
    /// [`from_binary_string`](BitMap::from_binary_string).
    ///
    /// # Examples
    /// ```
    /// use byte_bitmap::BitMap;
    ///
    /// let mut bm = BitMap::new(16);
    /// bm.set(0)?;
    /// bm.set(9)?;
    /// assert_eq!(bm.to_binary_string(), "0000001000000001");
    /// # Ok::<(), byte_bitmap::Error>(())
    /// ```
    pub fn to_binary_string(&self) -> String {
        self.to_string()
    }

    /// Parses a string of `'0'`/`'1'` characters, highest bit first.
    ///
    /// The bit capacity is the length of the string; the rightmost character
    /// drives bit 0.
    ///
    /// # Errors
    /// Returns [`Error::InvalidFormat`] on any other character.
    ///
    /// # Examples
    /// ```
    /// use byte_bitmap::BitMap;
    ///
    /// let bm = BitMap::from_binary_string("1010")?;
    /// assert_eq!(bm.bit_capacity(), 4);
    /// assert_eq!(bm.to_bytes(), [0x0A]);
    /// assert!(BitMap::from_binary_string("102").is_err());
    /// # Ok::<(), byte_bitmap::Error>(())
    /// ```
    pub fn from_binary_string(s: &str) -> Result<Self> {
        tracing::trace!(len = s.len(), "decoding binary string");
        let mut bm = Self::new(s.len());
        for (idx, (position, ch)) in s.char_indices().rev().enumerate() {
            match ch {
                '1' => bm.set_unchecked(idx, true),
                '0' => {}
                found => {
                    return Err(Error::InvalidFormat {
                        format: Format::Binary,
                        position,
                        found,
                    });
                }
            }
        }
        Ok(bm)
    }

    /// Renders the binary string as lowercase hex, two digits per byte.
    ///
    /// # Examples
    /// ```
    /// use byte_bitmap::BitMap;
    ///
    /// let bm = BitMap::from_bytes(vec![0x01, 0x80]);
    /// assert_eq!(bm.to_hex_string(), "8001");
    /// ```
    pub fn to_hex_string(&self) -> String {
        hex::encode(self.bytes.iter().rev().copied().collect::<Vec<u8>>())
    }

    /// Parses a hex string, most significant digit first.
    ///
    /// The bit capacity is four bits per digit. Upper- and lowercase digits
    /// are accepted, prefixes such as `0x` are not. The empty string decodes
    /// to the empty bitmap.
    ///
    /// # Errors
    /// Returns [`Error::InvalidFormat`] on a non-hex character.
    ///
    /// # Examples
    /// ```
    /// use byte_bitmap::BitMap;
    ///
    /// let bm = BitMap::from_hex_string("ff")?;
    /// assert_eq!(bm.count(), 8);
    /// assert_eq!(bm.to_binary_string(), "11111111");
    ///
    /// let odd = BitMap::from_hex_string("abc")?;
    /// assert_eq!(odd.bit_capacity(), 12);
    /// assert_eq!(odd.to_bytes(), [0xbc, 0x0a]);
    /// # Ok::<(), byte_bitmap::Error>(())
    /// ```
    pub fn from_hex_string(s: &str) -> Result<Self> {
        tracing::trace!(len = s.len(), "decoding hex string");
        let padded: Cow<'_, str> = if s.len() % 2 == 1 {
            Cow::Owned(format!("0{s}"))
        } else {
            Cow::Borrowed(s)
        };
        let pad = padded.len() - s.len();

        let mut bytes = hex::decode(padded.as_bytes()).map_err(|err| match err {
            hex::FromHexError::InvalidHexCharacter { c, index } => {
                let position = index - pad;
                let found = s
                    .get(position..)
                    .and_then(|rest| rest.chars().next())
                    .unwrap_or(c);
                Error::InvalidFormat {
                    format: Format::Hex,
                    position,
                    found,
                }
            }
            other => Error::InvalidArgument(other.to_string()),
        })?;
        bytes.reverse();

        Ok(Self {
            bits: s.len() * 4,
            bytes,
        })
    }

    /// Writes the backing buffer to `path` verbatim, replacing any existing
    /// file. No header or length prefix is written.
    ///
    /// # Errors
    /// Returns [`Error::Io`] if the file cannot be created or written.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let mut file = File::create(path)?;
        file.write_all(&self.bytes)?;
        file.flush()?;
        tracing::debug!(path = %path.display(), bytes = self.bytes.len(), "saved bitmap");
        Ok(())
    }

    /// Reads a bitmap written by [`save_to_file`](BitMap::save_to_file).
    ///
    /// With `bit_capacity == None` the whole file becomes the buffer and the
    /// capacity is eight bits per byte. Otherwise exactly
    /// `byte_count(bit_capacity)` bytes are read and any trailing bytes are
    /// ignored.
    ///
    /// # Errors
    /// Returns [`Error::Io`] if the file cannot be read and
    /// [`Error::Truncated`] if it is shorter than the requested capacity.
    pub fn load_from_file<P: AsRef<Path>>(path: P, bit_capacity: Option<usize>) -> Result<Self> {
        let path = path.as_ref();
        let mut file = File::open(path)?;
        let bm = match bit_capacity {
            None => {
                let mut bytes = Vec::new();
                file.read_to_end(&mut bytes)?;
                Self::from_bytes(bytes)
            }
            Some(bits) => {
                let expected = byte_count(bits);
                let mut bytes = Vec::with_capacity(expected);
                file.take(expected as u64).read_to_end(&mut bytes)?;
                if bytes.len() < expected {
                    tracing::debug!(
                        path = %path.display(),
                        expected,
                        actual = bytes.len(),
                        "bitmap file too short"
                    );
                    return Err(Error::Truncated {
                        expected,
                        actual: bytes.len(),
                    });
                }
                Self { bits, bytes }
            }
        };
        tracing::debug!(path = %path.display(), bytes = bm.bytes.len(), "loaded bitmap");
        Ok(bm)
    }

    #[inline]
    fn idxs(idx: usize) -> (usize, usize) {
        (idx / 8, idx % 8)
    }

    #[inline]
    fn checked_idxs(&self, idx: usize) -> Result<(usize, usize)> {
        if idx >= self.size() {
            return Err(Error::OutOfRange {
                idx,
                size: self.size(),
            });
        }
        Ok(Self::idxs(idx))
    }

    // callers guarantee `idx < self.size()`
    #[inline]
    fn bit_unchecked(&self, idx: usize) -> bool {
        let (byte_idx, bit_idx) = Self::idxs(idx);
        self.bytes[byte_idx] & 1 << bit_idx != 0
    }

    #[inline]
    fn set_unchecked(&mut self, idx: usize, value: bool) {
        let (byte_idx, bit_idx) = Self::idxs(idx);
        if value {
            self.bytes[byte_idx] |= 1 << bit_idx;
        } else {
            self.bytes[byte_idx] &= !(1 << bit_idx);
        }
    }

    fn clamp_range<R: RangeBounds<usize>>(&self, range: &R) -> Range<usize> {
        let start = match range.start_bound() {
            Bound::Included(&start) => start,
            Bound::Excluded(&start) => start.saturating_add(1),
            Bound::Unbounded => 0,
        };
        let end = match range.end_bound() {
            Bound::Included(&end) => end.saturating_add(1),
            Bound::Excluded(&end) => end,
            Bound::Unbounded => self.bits,
        };
        start..end.min(self.bits)
    }

    fn positions<R: RangeBounds<usize>>(
        &self,
        range: &R,
        step: usize,
    ) -> Result<StepBy<Range<usize>>> {
        if step == 0 {
            return Err(Error::InvalidArgument("step must be non-zero".into()));
        }
        Ok(self.clamp_range(range).step_by(step))
    }
}

impl From<Vec<u8>> for BitMap {
    fn from(bytes: Vec<u8>) -> Self {
        Self::from_bytes(bytes)
    }
}

impl From<&[u8]> for BitMap {
    fn from(bytes: &[u8]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl From<BitMap> for Vec<u8> {
    fn from(bitmap: BitMap) -> Self {
        bitmap.bytes
    }
}

impl AsRef<[u8]> for BitMap {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl<'bitmap> IntoIterator for &'bitmap BitMap {
    type Item = bool;
    type IntoIter = BitMapIter<'bitmap>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Display for BitMap {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        for byte in self.bytes.iter().rev() {
            write!(f, "{byte:08b}")?;
        }
        Ok(())
    }
}

impl FromStr for BitMap {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_binary_string(s)
    }
}

impl Debug for BitMap {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "LSB -> ")?;
        for (i, bit) in self.iter().enumerate() {
            if i % 8 == 0 {
                write!(f, "{i}: ")?;
            }
            write!(f, "{}", if bit { '1' } else { '0' })?;
            if i % 8 == 7 && i < self.size() - 1 {
                write!(f, " ")?;
            }
        }
        write!(f, " <- MSB")?;
        Ok(())
    }
}

/// Iterator over all bits in the bitmap as `bool` values.
///
/// Yields `true` for set bits and `false` for unset bits, starting from index 0.
///
/// Returned by [`BitMap::iter()`].
#[derive(Clone, Copy)]
pub struct BitMapIter<'bitmap> {
    bytes: &'bitmap [u8],
    idx: usize,
}

impl Iterator for BitMapIter<'_> {
    type Item = bool;

    fn next(&mut self) -> Option<Self::Item> {
        let (byte_idx, bit_idx) = BitMap::idxs(self.idx);
        let byte = self.bytes.get(byte_idx)?;
        self.idx += 1;
        Some(byte & 1 << bit_idx != 0)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.bytes.len() * 8).saturating_sub(self.idx);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for BitMapIter<'_> {}

impl FusedIterator for BitMapIter<'_> {}

/// Iterator over the indices of set bits in the bitmap.
///
/// Returned by [`BitMap::nonzero_positions()`].
#[derive(Clone, Copy)]
pub struct IterOnes<'bitmap> {
    bytes: &'bitmap [u8],
    byte_idx: usize,
    current: u8,
    base_bit_idx: usize,
}

impl Iterator for IterOnes<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        while self.byte_idx < self.bytes.len() {
            if self.current != 0 {
                let tz = self.current.trailing_zeros() as usize;
                self.current &= self.current - 1; // unset LSB
                return Some(self.base_bit_idx + tz);
            }

            self.byte_idx += 1;
            self.base_bit_idx += 8;
            self.current = *self.bytes.get(self.byte_idx).unwrap_or(&0);
        }
        None
    }
}

impl FusedIterator for IterOnes<'_> {}

/// Iterator over the indices of unset bits in the bitmap.
///
/// Returned by [`BitMap::zero_positions()`].
#[derive(Clone, Copy)]
pub struct IterZeros<'bitmap> {
    bytes: &'bitmap [u8],
    byte_idx: usize,
    current: u8,
    base_bit_idx: usize,
}

impl Iterator for IterZeros<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        while self.byte_idx < self.bytes.len() {
            if self.current != 0 {
                let tz = self.current.trailing_zeros() as usize;
                self.current &= self.current - 1; // unset LSB
                return Some(self.base_bit_idx + tz);
            }

            self.byte_idx += 1;
            self.base_bit_idx += 8;
            self.current = !*self.bytes.get(self.byte_idx).unwrap_or(&!0);
        }
        None
    }
}

impl FusedIterator for IterZeros<'_> {}
