//! "New since cursor" filtering.
//!
//! Input must be newest first. The result is the prefix that precedes the
//! first notice whose link equals the cursor. A missing cursor, or one that
//! is not inside the supplied window, yields the whole input.

use super::Notice;

pub fn delta<'a>(notices: &'a [Notice], cursor_link: Option<&str>) -> &'a [Notice] {
    let Some(cursor) = cursor_link else {
        return notices;
    };

    let end = notices
        .iter()
        .position(|n| n.link.as_deref() == Some(cursor))
        .unwrap_or(notices.len());

    &notices[..end]
}
