//! Fragment scanner.

use crate::chars::is_query_or_fragment;
use crate::cursor::Cursor;
use crate::error::UriErrorKind;

/// Scans the fragment after an already consumed `#`, up to the end of input.
///
/// Returns the raw fragment including its leading `#`.
pub(crate) fn parse_fragment(cursor: &mut Cursor<'_>) -> Result<String, UriErrorKind> {
    let start = cursor.pos();
    cursor.eat_with_pct(is_query_or_fragment)?;
    let raw = cursor.slice_from(start);

    if !cursor.is_empty() {
        return Err(UriErrorKind::FragmentMalformed);
    }

    Ok(format!("#{raw}"))
}
