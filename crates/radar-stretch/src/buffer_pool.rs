//! Thread-local destination buffers for reducing allocation overhead.
//!
//! Preview renders (stretch, then encode) need a scratch destination that is
//! thrown away once the PNG exists. Instead of allocating one per request the
//! buffer is cached per thread and reused.
//!
//! - **Thread-local storage**: each worker thread owns its buffer, so no locking.
//! - **Cleared on checkout**: the engine does not zero pixels it does not reach,
//!   so every checkout starts fully transparent.
//!
//! ```ignore
//! use radar_stretch::buffer_pool::with_dest_buffer;
//!
//! let png = with_dest_buffer(512, 512, |pixels| {
//!     // stretch into pixels...
//!     create_png_rgba(pixels, 512, 512)
//! })?;
//! ```

use std::cell::RefCell;

/// Standard tile size the pool starts out with.
const TILE_256: usize = 256 * 256;

/// Buffers larger than this are not kept after use.
const MAX_RETAINED: usize = 4096 * 4096;

thread_local! {
    static DEST_BUFFER: RefCell<Vec<u32>> = RefCell::new(Vec::with_capacity(TILE_256));
}

/// Run `f` with a zeroed `width * height` destination buffer from this thread's pool.
///
/// Re-entrant calls on the same thread get a fresh allocation instead of
/// the pooled buffer.
pub fn with_dest_buffer<F, R>(width: usize, height: usize, f: F) -> R
where
    F: FnOnce(&mut [u32]) -> R,
{
    let size = width * height;
    DEST_BUFFER.with(|cell| match cell.try_borrow_mut() {
        Ok(mut buf) => {
            if buf.len() < size {
                buf.resize(size, 0);
            }
            buf[..size].fill(0);
            let result = f(&mut buf[..size]);
            if buf.capacity() > MAX_RETAINED {
                *buf = Vec::with_capacity(TILE_256);
            }
            result
        }
        Err(_) => {
            let mut scratch = vec![0u32; size];
            f(&mut scratch)
        }
    })
}

/// Current capacity of this thread's pooled buffer, in pixels.
pub fn pooled_capacity() -> usize {
    DEST_BUFFER.with(|cell| cell.try_borrow().map(|buf| buf.capacity()).unwrap_or(0))
}
