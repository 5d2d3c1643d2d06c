//! Parser configuration.

use serde::{Deserialize, Serialize};

/// Knobs for a single parse.
///
/// Deserializes from JSON with every field optional:
///
/// ```
/// use wombat_html::ParserOptions;
///
/// let options: ParserOptions = serde_json::from_str(r#"{"scripting_enabled": true}"#).unwrap();
/// assert!(options.scripting_enabled);
/// assert!(options.collect_issues);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserOptions {
    /// [§ 13.2.4.5 Other parsing state flags](https://html.spec.whatwg.org/multipage/parsing.html#scripting-flag)
    ///
    /// "The scripting flag is set to "enabled" if scripting was enabled for
    /// the Document with which the parser is associated when the parser was
    /// created, and "disabled" otherwise."
    ///
    /// Nothing is executed either way; the flag only changes how `<noscript>`
    /// is parsed.
    pub scripting_enabled: bool,

    /// The document is an iframe `srcdoc` document, so a missing DOCTYPE does
    /// not put it in quirks mode.
    pub iframe_srcdoc: bool,

    /// Keep a list of parse issues for [`crate::HTMLParser::run_with_issues`].
    pub collect_issues: bool,

    /// Log each parse issue through `wombat_common::warning::warn_once`.
    pub log_errors: bool,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            scripting_enabled: false,
            iframe_srcdoc: false,
            collect_issues: true,
            log_errors: false,
        }
    }
}

impl ParserOptions {
    /// Set the scripting flag.
    #[must_use]
    pub const fn with_scripting(mut self, enabled: bool) -> Self {
        self.scripting_enabled = enabled;
        self
    }

    /// Treat the input as an iframe `srcdoc` document.
    #[must_use]
    pub const fn with_iframe_srcdoc(mut self, srcdoc: bool) -> Self {
        self.iframe_srcdoc = srcdoc;
        self
    }

    /// Turn issue collection on or off.
    #[must_use]
    pub const fn with_issue_collection(mut self, collect: bool) -> Self {
        self.collect_issues = collect;
        self
    }

    /// Turn issue logging on or off.
    #[must_use]
    pub const fn with_error_logging(mut self, log: bool) -> Self {
        self.log_errors = log;
        self
    }
}
