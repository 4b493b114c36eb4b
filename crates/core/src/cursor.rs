//! Lazy row cursors.
//!
//! A cursor is a forward-only, single-pass sequence of rows bound to the
//! lifetime of the underlying statement. It is finite, never restartable,
//! and must be closed by the caller - the engine never closes a cursor it
//! hands out. Dropping a cursor without closing it is a session-
//! implementation concern.

use std::fmt;

use crate::error::{Error, Result};
use crate::value::Value;

/// A lazy, forward-only, single-pass sequence of result rows.
pub trait RowCursor: fmt::Debug + Send {
    /// Fetch the next row, or `None` once the sequence is exhausted.
    ///
    /// Reading a closed cursor fails with
    /// [`Error::CursorClosed`](crate::Error::CursorClosed).
    fn next_row(&mut self) -> Result<Option<Value>>;

    /// Release the underlying statement. Idempotent.
    fn close(&mut self) -> Result<()>;

    /// Whether the cursor still holds its statement.
    fn is_open(&self) -> bool;

    /// Whether every row has been fetched.
    fn is_consumed(&self) -> bool;
}

/// A cursor over rows that are already materialized.
///
/// Session implementations that buffer their results can hand these out;
/// the single-pass and close contracts still hold.
#[derive(Debug)]
pub struct VecCursor {
    rows: std::vec::IntoIter<Value>,
    open: bool,
    consumed: bool,
}

impl VecCursor {
    /// Wrap a row list in an open cursor.
    pub fn new(rows: Vec<Value>) -> Self {
        Self {
            rows: rows.into_iter(),
            open: true,
            consumed: false,
        }
    }
}

impl RowCursor for VecCursor {
    fn next_row(&mut self) -> Result<Option<Value>> {
        if !self.open {
            return Err(Error::CursorClosed);
        }
        let row = self.rows.next();
        if row.is_none() {
            self.consumed = true;
        }
        Ok(row)
    }

    fn close(&mut self) -> Result<()> {
        self.open = false;
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.open
    }

    fn is_consumed(&self) -> bool {
        self.consumed
    }
}
