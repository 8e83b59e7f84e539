//! # Document Scanner
//!
//! Applies a block rewrite to every `{ ... }` block that follows an anchor keyword.
//!
//! The loop threads an explicit `(document, cursor)` pair: each iteration anchors on the next
//! keyword at or after the cursor, bounds the block with the delimiter scanner, splices the
//! rewritten block back in, and resumes right after the spliced text. Only bytes inside the
//! matched span are ever replaced.

use crate::block::{rewrite_provider_block, rewrite_required_provider_block};
use crate::error::MigrationError;
use crate::scanner::find_balanced;
use crate::token::find_token_after;

pub const REQUIRED_PROVIDERS: &str = "required_providers";
pub const PROVIDER: &str = "provider";

/// Rewrites every block anchored on `keyword` with `rewrite`.
///
/// Returns the document unchanged when `keyword` never occurs. A keyword that is not followed
/// by a balanced block aborts the whole document with `MalformedBlock`.
pub fn rewrite_all_blocks<F>(
    keyword: &'static str,
    document: &str,
    rewrite: F,
) -> Result<String, MigrationError>
where
    F: Fn(&str) -> Result<String, MigrationError>,
{
    let mut document = document.to_string();
    let mut cursor = 0;

    while let Some(anchor) = find_token_after(keyword, &document, cursor) {
        let start = cursor + anchor.start;
        let (_, close) = find_balanced(b'{', b'}', &document[start..]).require(keyword)?;
        let end = start + close + 1;

        let block = rewrite(&document[start..end])?;

        let mut spliced = String::with_capacity(document.len() - (end - start) + block.len());
        spliced.push_str(&document[..start]);
        spliced.push_str(&block);
        spliced.push_str(&document[end..]);

        cursor = start + block.len();
        document = spliced;
    }

    Ok(document)
}

/// Rewrites `terraform.required_providers` entries and then `provider` blocks.
pub fn rewrite_provider_declarations(document: &str) -> Result<String, MigrationError> {
    let document =
        rewrite_all_blocks(REQUIRED_PROVIDERS, document, rewrite_required_provider_block)?;
    rewrite_all_blocks(PROVIDER, &document, rewrite_provider_block)
}
