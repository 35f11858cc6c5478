//! Target services: domain allow-lists, mirror sources, block markers.

use clap::ValueEnum;

/// GitHub rule-list mirrors, in preference order.
const GITHUB_SOURCES: &[&str] = &[
    "https://gitee.com/ineo6/hosts/raw/master/hosts",
    "https://raw.hellogithub.com/hosts",
    "https://cdn.jsdelivr.net/gh/ineo6/hosts/hosts",
];

/// Replit rule-list mirrors, in preference order.
const REPLIT_SOURCES: &[&str] = &[
    "https://raw.githubusercontent.com/techsharing/toolbox/main/hosts/replit-hosts",
    "https://gitee.com/techsharing/toolbox/raw/main/hosts/replit-hosts",
    "https://cdn.jsdelivr.net/gh/techsharing/toolbox/hosts/replit-hosts",
];

const GITHUB_DOMAINS: &[&str] = &[
    "github.com",
    "github.global.ssl.fastly.net",
    "assets-cdn.github.com",
    "github.githubassets.com",
    "codeload.github.com",
    "api.github.com",
    "raw.githubusercontent.com",
    "user-images.githubusercontent.com",
    "favicons.githubusercontent.com",
    "camo.githubusercontent.com",
    "gist.github.com",
    "gist.githubusercontent.com",
];

const REPLIT_DOMAINS: &[&str] = &[
    "replit.com",
    "repl.co",
    "repl.it",
    "cdn.replit.com",
    "static.replit.com",
    "sp.replit.com",
    "replit.app",
    "firewalledreplit.com",
    "ide.replit.com",
    "docs.replit.com",
    "api.replit.com",
    "eval.replit.com",
    "widgets.replit.com",
];

/// A target service with a fixed domain allow-list and mirror list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Target {
    Github,
    Replit,
}

impl Target {
    /// Human-readable section name used in block markers and messages.
    pub fn section_name(&self) -> &'static str {
        match self {
            Target::Github => "GitHub",
            Target::Replit => "Replit",
        }
    }

    /// Domains that identify a rule line as belonging to this target.
    pub fn domains(&self) -> &'static [&'static str] {
        match self {
            Target::Github => GITHUB_DOMAINS,
            Target::Replit => REPLIT_DOMAINS,
        }
    }

    /// Mirror source URLs, in preference order.
    pub fn sources(&self) -> &'static [&'static str] {
        match self {
            Target::Github => GITHUB_SOURCES,
            Target::Replit => REPLIT_SOURCES,
        }
    }

    /// Managed-block start marker. Matched by prefix: the written form
    /// carries a trailing `- Updated at <timestamp>` comment.
    pub fn start_marker(&self) -> String {
        format!("# {} Hosts Start", self.section_name())
    }

    /// Managed-block end marker.
    pub fn end_marker(&self) -> String {
        format!("# {} Hosts End", self.section_name())
    }

    /// Comment line representing "no rules found" for this target.
    pub fn not_found_marker(&self) -> String {
        format!("# {} related rules not found", self.section_name())
    }
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.section_name())
    }
}
