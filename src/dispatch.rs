use crate::patterns::{RewriteChain, STATE_CHAIN, TEMPLATE_CHAIN};

/// Which rewrite chain a file goes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Syntax {
    /// `.tf` configuration.
    Template,
    /// Anything else, `.tfstate` in practice.
    State,
}

impl Syntax {
    /// Accepts the extension with or without its leading dot.
    pub fn from_extension(extension: &str) -> Self {
        if extension.trim_start_matches('.') == "tf" {
            Syntax::Template
        } else {
            Syntax::State
        }
    }

    pub fn chain(self) -> &'static RewriteChain {
        match self {
            Syntax::Template => &*TEMPLATE_CHAIN,
            Syntax::State => &*STATE_CHAIN,
        }
    }
}

/// Streams `source` through the chain chosen by `extension`, line by line.
///
/// Every output line is terminated with `\n`; `\r\n` input is normalized.
pub fn rewrite_file(source: &str, extension: &str) -> String {
    let chain = Syntax::from_extension(extension).chain();
    let mut rewritten = String::with_capacity(source.len() + source.len() / 8);
    for line in source.lines() {
        rewritten.push_str(&chain.rewrite_line(line));
        rewritten.push('\n');
    }
    rewritten
}
