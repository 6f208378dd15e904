//! Double-buffered, line-diffing terminal writer.
//!
//! Rows are the unit of update: a write replaces a whole row and `flush`
//! repaints only rows that differ from what is on screen. Writing into the
//! middle of an existing row is not supported, because column positions
//! inside strings carrying escape sequences are ambiguous.

use std::io::{self, Stdout, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    queue,
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};

/// Size used when the terminal cannot be queried.
pub const FALLBACK_SIZE: (u16, u16) = (80, 24);

/// Thread-safe resize notifier shared with a [`ScreenBuffer`].
///
/// Notifications are only applied at the next [`ScreenBuffer::clear`].
#[derive(Debug, Clone, Default)]
pub struct ResizeHandle {
    dirty: Arc<AtomicBool>,
    size: Arc<Mutex<Option<(u16, u16)>>>,
}

impl ResizeHandle {
    /// Record a new terminal size.
    pub fn notify(&self, width: u16, height: u16) {
        let mut size = self.size.lock().unwrap_or_else(|e| e.into_inner());
        *size = Some((width, height));
        self.dirty.store(true, Ordering::SeqCst);
    }

    /// Take the pending size, if any.
    fn take(&self) -> Option<(u16, u16)> {
        if !self.dirty.swap(false, Ordering::SeqCst) {
            return None;
        }
        self.size.lock().unwrap_or_else(|e| e.into_inner()).take()
    }
}

/// A terminal writer that diffs frames line by line.
pub struct ScreenBuffer<W: Write> {
    out: W,
    width: u16,
    height: u16,
    /// What is believed to be on screen. `None` forces a repaint.
    current: Vec<Option<String>>,
    /// The frame being built.
    next: Vec<String>,
    resize: ResizeHandle,
    hide_cursor: bool,
    in_alt_screen: bool,
}

impl ScreenBuffer<Stdout> {
    /// A buffer over stdout, sized from the terminal (80x24 if unavailable).
    pub fn stdout() -> Self {
        let (width, height) = terminal::size().unwrap_or(FALLBACK_SIZE);
        Self::new(io::stdout(), width, height)
    }
}

impl<W: Write> ScreenBuffer<W> {
    /// Create a buffer over any sink with an explicit size.
    pub fn new(out: W, width: u16, height: u16) -> Self {
        let mut buffer = Self {
            out,
            width,
            height,
            current: Vec::new(),
            next: Vec::new(),
            resize: ResizeHandle::default(),
            hide_cursor: true,
            in_alt_screen: false,
        };
        buffer.reset_buffers();
        buffer
    }

    /// Keep the cursor visible while in the alternate screen.
    pub fn with_visible_cursor(mut self) -> Self {
        self.hide_cursor = false;
        self
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// A handle other threads can use to report size changes.
    pub fn resize_handle(&self) -> ResizeHandle {
        self.resize.clone()
    }

    /// The sink this buffer writes to.
    pub fn get_ref(&self) -> &W {
        &self.out
    }

    /// Switch to the alternate screen and start from a blank frame.
    pub fn enter_alt_screen(&mut self) -> io::Result<()> {
        queue!(self.out, EnterAlternateScreen)?;
        if self.hide_cursor {
            queue!(self.out, Hide)?;
        }
        self.out.flush()?;
        self.in_alt_screen = true;
        self.clear();
        Ok(())
    }

    /// Return to the normal screen and show the cursor.
    pub fn exit_alt_screen(&mut self) -> io::Result<()> {
        queue!(self.out, LeaveAlternateScreen, Show)?;
        self.out.flush()?;
        self.in_alt_screen = false;
        Ok(())
    }

    /// Start a new frame of blank rows, applying any pending resize first.
    pub fn clear(&mut self) {
        if let Some((width, height)) = self.resize.take() {
            tracing::debug!(width, height, "applying terminal resize");
            self.width = width;
            self.height = height;
            self.reset_buffers();
            return;
        }

        let blank = self.blank_line();
        for line in &mut self.next {
            line.clone_from(&blank);
        }
    }

    /// Replace row `y` of the next frame. `x` is accepted for symmetry but the
    /// whole row is replaced. Out-of-range coordinates are ignored.
    pub fn write(&mut self, x: u16, y: u16, text: &str) {
        if x >= self.width {
            return;
        }
        self.write_line(y, text);
    }

    /// Replace row `y` of the next frame. Out-of-range rows are ignored.
    pub fn write_line(&mut self, y: u16, text: &str) {
        if let Some(line) = self.next.get_mut(usize::from(y)) {
            line.clear();
            line.push_str(text);
        }
    }

    /// Write a multi-line block starting at row `y`, one row per line.
    pub fn write_block(&mut self, y: u16, block: &str) {
        for (i, line) in block.split('\n').enumerate() {
            match u16::try_from(i).ok().and_then(|i| y.checked_add(i)) {
                Some(row) if row < self.height => self.write_line(row, line),
                _ => break,
            }
        }
    }

    /// Repaint rows that changed since the last flush, in a single write.
    ///
    /// Returns the number of rows repainted.
    pub fn flush(&mut self) -> io::Result<usize> {
        let mut frame: Vec<u8> = Vec::new();
        let mut changed = 0;

        for (row, (next, current)) in self.next.iter().zip(self.current.iter_mut()).enumerate() {
            if current.as_deref() == Some(next.as_str()) {
                continue;
            }
            // Row count is bounded by `height`, which is a u16.
            let row = row as u16;
            queue!(frame, MoveTo(0, row))?;
            frame.extend_from_slice(next.as_bytes());
            queue!(frame, Clear(ClearType::UntilNewLine))?;
            *current = Some(next.clone());
            changed += 1;
        }

        if !frame.is_empty() {
            self.out.write_all(&frame)?;
            self.out.flush()?;
        }
        Ok(changed)
    }

    fn blank_line(&self) -> String {
        " ".repeat(usize::from(self.width))
    }

    fn reset_buffers(&mut self) {
        let rows = usize::from(self.height);
        self.current = vec![None; rows];
        self.next = vec![self.blank_line(); rows];
    }
}

impl<W: Write> Drop for ScreenBuffer<W> {
    fn drop(&mut self) {
        if self.in_alt_screen {
            let _ = self.exit_alt_screen();
        }
    }
}
