//! Binary buffers drawn from a provider's allocator.
//!
//! A [`ScopedBuffer`] hands its memory back to the allocator when it goes out of
//! scope, so every exit path of the block codec (success, provider failure, an
//! error discovered after acquisition, a panic during marshalling) releases it.

use crate::crypto::provider::BufferAllocator;
use crate::error::{CoreError, Result};
use std::fmt;
use std::ops::{Deref, DerefMut};

pub struct ScopedBuffer<'a> {
    bytes: Vec<u8>,
    allocator: &'a dyn BufferAllocator,
}

impl<'a> ScopedBuffer<'a> {
    /// Acquires `len` bytes from `allocator`.
    pub fn acquire(allocator: &'a dyn BufferAllocator, len: usize) -> Result<Self> {
        let bytes = allocator
            .allocate(len)
            .ok_or(CoreError::BufferAllocationFailed(len))?;

        if bytes.len() != len {
            allocator.release(bytes);
            return Err(CoreError::BufferAllocationFailed(len));
        }

        Ok(Self { bytes, allocator })
    }

    /// Acquires a buffer sized to `data` and copies `data` into it.
    pub fn acquire_with(allocator: &'a dyn BufferAllocator, data: &[u8]) -> Result<Self> {
        let mut buffer = Self::acquire(allocator, data.len())?;
        buffer.bytes.copy_from_slice(data);
        Ok(buffer)
    }
}

impl Deref for ScopedBuffer<'_> {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.bytes
    }
}

impl DerefMut for ScopedBuffer<'_> {
    fn deref_mut(&mut self) -> &mut [u8] {
        &mut self.bytes
    }
}

impl Drop for ScopedBuffer<'_> {
    fn drop(&mut self) {
        self.allocator.release(std::mem::take(&mut self.bytes));
    }
}

impl fmt::Debug for ScopedBuffer<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScopedBuffer")
            .field("len", &self.bytes.len())
            .finish()
    }
}
