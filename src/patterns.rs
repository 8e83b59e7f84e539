//! # Pattern Rewrite Chains
//!
//! Ordered regex substitutions that rename `metal_*`/`packet_*` resource and datasource types
//! to `equinix_metal_*`, one physical line at a time.
//!
//! Order matters. Each rule only fires where a specific character context (a quote, `${`, `=`,
//! `(`, `?`/`:`, `in`, an operator, `data.`) sits directly in front of the legacy prefix. After a
//! rule rewrites a reference, the prefix is preceded by `equinix_`, so no later rule sees it
//! again and the chains are idempotent.

use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;

/// One named `(pattern, replacement)` pair.
#[derive(Debug)]
pub struct RewriteRule {
    pub name: &'static str,
    pattern: Regex,
    replacement: &'static str,
}

impl RewriteRule {
    fn new(name: &'static str, pattern: &str, replacement: &'static str) -> Self {
        Self {
            name,
            pattern: Regex::new(pattern).expect("Invalid regex"),
            replacement,
        }
    }

    /// Replaces every non-overlapping match in `line`.
    pub fn apply<'a>(&self, line: &'a str) -> Cow<'a, str> {
        self.pattern.replace_all(line, self.replacement)
    }
}

/// Rules applied strictly in sequence; the output of one is the input of the next.
#[derive(Debug)]
pub struct RewriteChain {
    rules: Vec<RewriteRule>,
}

impl RewriteChain {
    pub fn rewrite_line(&self, line: &str) -> String {
        self.rules
            .iter()
            .fold(line.to_string(), |acc, rule| rule.apply(&acc).into_owned())
    }

    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|rule| rule.name).collect()
    }
}

// resource "metal_project" "fooproject" {
// data "packet_vlan" "foovlan" {
fn block_header() -> RewriteRule {
    RewriteRule::new(
        "block_header",
        r#"(resource|data)(\s+")(metal|packet)(.*?)"#,
        r#"${1} "equinix_metal${4}"#,
    )
}

// device_id = "${metal_device.foodevice.id}"
fn interpolation() -> RewriteRule {
    RewriteRule::new(
        "interpolation",
        r"(.*?)(\$\{\s*)(metal|packet)(_.*?)",
        r"${1}$${equinix_metal${4}",
    )
}

// device_id = metal_device.foodevice.id
fn reference() -> RewriteRule {
    RewriteRule::new(
        "reference",
        r"(.*?)(=\s*)(metal|packet)(_.*?)",
        r"${1}= equinix_metal${4}",
    )
}

// cidr_notation = cidrhost(metal_reserved_ip_block.fooblock.cidr_notation, 0)
fn function_argument() -> RewriteRule {
    RewriteRule::new(
        "function_argument",
        r"(.*?)(\(\s*)(metal|packet)(_.*?)",
        r"${1}(equinix_metal${4}",
    )
}

// ip = var.public ? metal_device.a.access_public_ipv4 : metal_device.a.access_private_ipv4
fn conditional() -> RewriteRule {
    RewriteRule::new(
        "conditional",
        r"(.*?[:|\?])(\s*)(metal|packet)(_.*?)",
        r"${1} equinix_metal${4}",
    )
}

// toset([for network in metal_device.foodevice.network : network.family])
fn for_loop() -> RewriteRule {
    RewriteRule::new(
        "for_loop",
        r"(.*?)(in\s*)(metal|packet)(_.*?)",
        r"${1}in equinix_metal${4}",
    )
}

// tolist([metal_device.foodevice[*].access_public_ipv4])
// !metal_ip_attachment.fooattach.public
// total = metal_connection.a.speed + metal_connection.b.speed
fn expression() -> RewriteRule {
    RewriteRule::new(
        "expression",
        r"(.*?[\+\-\*/><&|%!\[]\s*)(metal|packet)(_.*?)",
        r"${1}equinix_metal${3}",
    )
}

// lookup(data.packet_device_bgp_neighbors.test.bgp_neighbors[0], "address_family")
fn datasource() -> RewriteRule {
    RewriteRule::new(
        "datasource",
        r"(.*?data)(\.)(metal|packet)(_.*?)",
        r"${1}.equinix_metal${4}",
    )
}

// "provider": "provider[\"registry.terraform.io/equinix/metal\"]"
fn state_provider() -> RewriteRule {
    RewriteRule::new(
        "state_provider",
        r#"(.*?)(equinix/metal|packethost/packet)(\\".*?)"#,
        r"${1}equinix/equinix${3}",
    )
}

// "type": "metal_device"
fn state_prefix() -> RewriteRule {
    RewriteRule::new(
        "state_prefix",
        r#"(.*")(metal|packet)(_.*)"#,
        r"${1}equinix_metal${3}",
    )
}

/// Chain for `.tf` configuration syntax.
pub static TEMPLATE_CHAIN: Lazy<RewriteChain> = Lazy::new(|| RewriteChain {
    rules: vec![
        block_header(),
        interpolation(),
        reference(),
        function_argument(),
        conditional(),
        for_loop(),
        expression(),
        datasource(),
    ],
});

/// Chain for everything else, notably `.tfstate` JSON.
pub static STATE_CHAIN: Lazy<RewriteChain> = Lazy::new(|| RewriteChain {
    rules: vec![state_provider(), datasource(), state_prefix()],
});
