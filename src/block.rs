//! Generated block handling for the hosts file.
//!
//! The block owned by this crate looks like:
//!
//! ```text
//!
//! ### BEGIN: Auto-Generated by dhcp2hosts. DO NOT EDIT ###
//! 172.30.50.22	family-room
//! 172.30.50.2	appletv
//! ###   END: Auto-Generated by dhcp2hosts. DO NOT EDIT ###
//! ```
//!
//! The header carries a leading newline so the block always starts on a
//! fresh line, even after user content with no trailing newline.

use crate::error::{Result, SyncError};
use crate::record::DhcpRecord;
use regex::Regex;
use std::ops::Range;
use std::sync::LazyLock;

/// Opening marker, including the blank line that separates it from user content.
pub const BLOCK_HEADER: &str = "\n### BEGIN: Auto-Generated by dhcp2hosts. DO NOT EDIT ###\n";

/// Closing marker.
pub const BLOCK_FOOTER: &str = "###   END: Auto-Generated by dhcp2hosts. DO NOT EDIT ###\n";

// Header + nearest following footer, across lines. A block at the very
// start of the file has no preceding newline to consume, and a footer at
// the very end may have lost its trailing newline.
static BLOCK_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    let pattern = format!(
        r"(?s)(?:\A|\n){}\n.*?{}(?:\n|\z)",
        regex::escape(header_line()),
        regex::escape(footer_line())
    );
    Regex::new(&pattern).expect("Invalid generated block regex")
});

fn header_line() -> &'static str {
    BLOCK_HEADER.trim_matches('\n')
}

fn footer_line() -> &'static str {
    BLOCK_FOOTER.trim_end_matches('\n')
}

/// Renders the block for `records`, in the given order.
///
/// An empty record set still yields a header/footer pair so the next
/// merge can find and replace it.
#[must_use]
pub fn generated_block(records: &[DhcpRecord]) -> String {
    let body = records
        .iter()
        .map(|record| format!("{}\t{}", record.ip(), record.host()))
        .collect::<Vec<_>>()
        .join("\n");
    format!("{BLOCK_HEADER}{body}\n{BLOCK_FOOTER}")
}

/// Removes every generated block from `content`.
///
/// Content without a block is returned unchanged.
///
/// # Errors
///
/// Returns [`SyncError::MalformedBlock`] if a header marker is left with
/// no footer after it.
pub fn strip_block(content: &str) -> Result<String> {
    let blocks: Vec<Range<usize>> = BLOCK_REGEX
        .find_iter(content)
        .map(|m| m.range())
        .collect();
    if let Some(line) = orphan_header_line(content, &blocks) {
        return Err(SyncError::MalformedBlock { line });
    }
    if blocks.len() > 1 {
        tracing::warn!(blocks = blocks.len(), "Removing duplicate generated blocks");
    }
    Ok(BLOCK_REGEX.replace_all(content, "").into_owned())
}

/// Replaces any generated block in `content` with a fresh one for
/// `records`, appended at the end.
///
/// Everything outside the old block is preserved byte for byte, and
/// merging the output again with the same records returns it unchanged.
///
/// ```
/// use dhcp2hosts::{BLOCK_FOOTER, BLOCK_HEADER, DhcpRecord, merge};
///
/// let records = [DhcpRecord::new("nas", "10.0.0.5")];
/// let merged = merge("127.0.0.1 localhost\n", &records).unwrap();
///
/// assert_eq!(
///     merged,
///     format!("127.0.0.1 localhost\n{BLOCK_HEADER}10.0.0.5\tnas\n{BLOCK_FOOTER}")
/// );
/// assert_eq!(merge(&merged, &records).unwrap(), merged);
/// ```
///
/// # Errors
///
/// Returns [`SyncError::MalformedBlock`] if `content` holds a header marker
/// without a matching footer.
pub fn merge(content: &str, records: &[DhcpRecord]) -> Result<String> {
    let mut merged = strip_block(content)?;
    merged.push_str(&generated_block(records));
    Ok(merged)
}

/// 1-based line number of the first header marker outside any complete block.
fn orphan_header_line(content: &str, blocks: &[Range<usize>]) -> Option<usize> {
    let mut offset = 0;
    for (idx, line) in content.split_inclusive('\n').enumerate() {
        if line.trim_end() == header_line() && !blocks.iter().any(|b| b.contains(&offset)) {
            return Some(idx + 1);
        }
        offset += line.len();
    }
    None
}
