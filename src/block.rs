//! # Block Rewriter
//!
//! Rewrites a single `required_providers { ... }` or `provider "x" { ... }` block that may
//! declare the legacy `metal`/`packet` provider. Both entry points return the input unchanged
//! when no legacy keyword is present.

use crate::error::MigrationError;
use crate::scanner::find_balanced;
use crate::token::{Span, find_token};

const LEGACY_PROVIDERS: [&str; 2] = ["metal", "packet"];
const CANONICAL_PROVIDER: &str = "equinix";
const LEGACY_SOURCES: [&str; 2] = ["equinix/metal", "packethost/packet"];
const CANONICAL_SOURCE: &str = "equinix/equinix";

/// Finds the first `metal`, falling back to the first `packet`.
fn find_legacy_provider(text: &str) -> Option<(&'static str, Span)> {
    LEGACY_PROVIDERS
        .iter()
        .find_map(|&name| find_token(name, text).map(|span| (name, span)))
}

/// Renames the first `metal` and the first `packet` in `text` to `equinix`.
fn rename_provider_key(text: &str) -> String {
    LEGACY_PROVIDERS
        .iter()
        .fold(text.to_string(), |acc, &name| {
            acc.replacen(name, CANONICAL_PROVIDER, 1)
        })
}

/// Rewrites a `required_providers` block: renames the legacy provider key, points its
/// `source` at `equinix/equinix` and comments out its `version`.
///
/// Only the attribute block of the matched provider entry is touched, so a sibling provider's
/// `version` survives.
pub fn rewrite_required_provider_block(block: &str) -> Result<String, MigrationError> {
    let Some((legacy, anchor)) = find_legacy_provider(block) else {
        return Ok(block.to_string());
    };

    let entry = rename_provider_key(&block[anchor.start..]);
    let (_, close) = find_balanced(b'{', b'}', &entry).require(legacy)?;

    let mut attributes = entry[..close].to_string();
    for source in LEGACY_SOURCES {
        attributes = attributes.replacen(source, CANONICAL_SOURCE, 1);
    }
    // Pinned legacy versions mean nothing for the equinix provider.
    attributes = attributes.replacen("version", "#version", 1);

    let mut rewritten = String::with_capacity(block.len() + 16);
    rewritten.push_str(&block[..anchor.start]);
    rewritten.push_str(&attributes);
    rewritten.push_str(&entry[close..]);
    Ok(rewritten)
}

/// Rewrites a `provider "x" { ... }` block by renaming the legacy provider name.
pub fn rewrite_provider_block(block: &str) -> Result<String, MigrationError> {
    let Some((_, anchor)) = find_legacy_provider(block) else {
        return Ok(block.to_string());
    };

    let mut rewritten = block[..anchor.start].to_string();
    rewritten.push_str(&rename_provider_key(&block[anchor.start..]));
    Ok(rewritten)
}
