//! Sliding window (history ring buffer) for AVS-LZ.
//!
//! The window stores the most recently emitted bytes of a stream. The encoder
//! pushes every byte it consumes and the decoder pushes every byte it
//! produces, so both sides hold the same history at every token boundary and
//! a back-reference resolves to the same content on either side.
//!
//! Unlike a general-purpose ring buffer, the window does not track how many
//! bytes are valid. It starts zero-filled and slots that were never written
//! read back as zero on both sides of the stream.

/// A fixed-capacity circular byte buffer addressed by logical index.
///
/// A logical index is any integer; it maps onto the buffer modulo the
/// capacity using Euclidean remainder, so negative indices relative to
/// [`head`](Window::head) reach back into history.
#[derive(Debug, Clone)]
pub struct Window {
    /// The underlying buffer.
    buffer: Box<[u8]>,
    /// Next write position, always in `[0, capacity)`.
    head: usize,
    /// Mask for efficient modulo (capacity - 1).
    mask: usize,
}

impl Window {
    /// Create a new zero-filled window with the specified capacity.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is not a power of 2 or is zero.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "Capacity must be greater than 0");
        assert!(
            capacity.is_power_of_two(),
            "Capacity must be a power of 2, got {}",
            capacity
        );

        Self {
            buffer: vec![0; capacity].into_boxed_slice(),
            head: 0,
            mask: capacity - 1,
        }
    }

    /// Get the capacity of the window.
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    /// Get the current write position.
    pub fn head(&self) -> usize {
        self.head
    }

    /// Write a single byte at the head and advance it.
    pub fn put(&mut self, byte: u8) {
        self.buffer[self.head] = byte;
        self.head = (self.head + 1) & self.mask;
    }

    /// Read the byte at a logical index.
    pub fn at(&self, index: isize) -> u8 {
        // Capacity is a power of two no larger than isize::MAX, so the
        // Euclidean remainder is exact and non-negative.
        let slot = index.rem_euclid(self.buffer.len() as isize) as usize;
        self.buffer[slot]
    }

    /// Read the byte `distance` positions behind the head.
    ///
    /// Distance 1 is the most recently written byte. No bounds check is
    /// made against the amount of history actually written.
    pub fn back(&self, distance: usize) -> u8 {
        self.buffer[self.head.wrapping_sub(distance) & self.mask]
    }
}
