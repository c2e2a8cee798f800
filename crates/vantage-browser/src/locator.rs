//! Lazy element locators.
//!
//! A [`Locator`] is a value type capturing a selection strategy; it holds
//! no element handle. Resolution happens inside each session action, so a
//! locator always reflects current DOM state and never goes stale across
//! navigations.
//!
//! Strategies are deliberately the stable kind (role, placeholder, label)
//! rather than structural selectors, to keep specs resilient against
//! incidental markup changes. CSS remains available as an escape hatch.

use std::fmt;

/// ARIA-style roles the locator layer understands.
///
/// A fixed typed set, not a full accessibility-tree engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// An anchor element
    Link,
    /// A button or submit input
    Button,
    /// A `nav` landmark
    Navigation,
    /// Any heading level, matched case-insensitively by name
    Heading,
    /// An element with `role="alert"`
    Alert,
}

impl Role {
    fn as_str(self) -> &'static str {
        match self {
            Self::Link => "link",
            Self::Button => "button",
            Self::Navigation => "navigation",
            Self::Heading => "heading",
            Self::Alert => "alert",
        }
    }
}

/// The selection strategy behind a locator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Strategy {
    /// By role, optionally narrowed by accessible name
    Role {
        /// Element role
        role: Role,
        /// Accessible name (rendered text) to match
        name: Option<String>,
    },
    /// By input placeholder text
    Placeholder(String),
    /// By associated label text
    Label(String),
    /// Raw CSS selector
    Css(String),
}

/// A compiled query ready to hand to the browser collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    /// CSS selector for `querySelector`
    Css(String),
    /// XPath expression
    XPath(String),
}

/// A deferred, re-resolvable reference to DOM element(s).
///
/// Stateless until resolved; each resolution queries the live DOM.
#[derive(Debug, Clone)]
pub struct Locator {
    description: String,
    strategy: Strategy,
}

impl Locator {
    /// Locate by role and accessible name, e.g. a link named "Get started".
    pub fn role(role: Role, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            description: format!("{} {:?}", role.as_str(), name),
            strategy: Strategy::Role {
                role,
                name: Some(name),
            },
        }
    }

    /// Locate by role alone, e.g. the navigation landmark.
    #[must_use]
    pub fn role_only(role: Role) -> Self {
        Self {
            description: role.as_str().to_string(),
            strategy: Strategy::Role { role, name: None },
        }
    }

    /// Locate an input by its placeholder text.
    pub fn placeholder(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            description: format!("placeholder {text:?}"),
            strategy: Strategy::Placeholder(text),
        }
    }

    /// Locate a form control by its label text.
    pub fn label(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            description: format!("label {text:?}"),
            strategy: Strategy::Label(text),
        }
    }

    /// Locate by raw CSS selector.
    pub fn css(selector: impl Into<String>) -> Self {
        let selector = selector.into();
        Self {
            description: format!("css {selector:?}"),
            strategy: Strategy::Css(selector),
        }
    }

    /// Human-readable description used in error messages.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Compile the strategy into a CSS or XPath query.
    #[must_use]
    pub fn to_query(&self) -> Query {
        match &self.strategy {
            Strategy::Css(selector) => Query::Css(selector.clone()),
            Strategy::Placeholder(text) => {
                Query::Css(format!("[placeholder={}]", css_string(text)))
            }
            Strategy::Label(text) => {
                let lit = xpath_literal(text);
                Query::XPath(format!(
                    "//label[normalize-space(.)={lit}]//input \
                     | //label[normalize-space(.)={lit}]//textarea \
                     | //*[@id = //label[normalize-space(.)={lit}]/@for]"
                ))
            }
            Strategy::Role { role, name } => role_query(*role, name.as_deref()),
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description)
    }
}

fn role_query(role: Role, name: Option<&str>) -> Query {
    match (role, name) {
        (Role::Link, Some(name)) => {
            let lit = xpath_literal(name);
            Query::XPath(format!("//a[normalize-space(.)={lit}]"))
        }
        (Role::Link, None) => Query::Css("a".to_string()),
        (Role::Button, Some(name)) => {
            let lit = xpath_literal(name);
            Query::XPath(format!(
                "//button[normalize-space(.)={lit}] \
                 | //input[(@type=\"submit\" or @type=\"button\") and @value={lit}]"
            ))
        }
        (Role::Button, None) => Query::Css("button, input[type=\"submit\"]".to_string()),
        (Role::Navigation, _) => Query::Css("nav, [role=\"navigation\"]".to_string()),
        (Role::Heading, Some(name)) => {
            // Headings match case-insensitively on contained text, since
            // specs usually quote them loosely.
            let contains = xpath_ci_contains(name);
            let levels: Vec<String> = (1..=6)
                .map(|level| format!("//h{level}[{contains}]"))
                .collect();
            Query::XPath(levels.join(" | "))
        }
        (Role::Heading, None) => Query::Css("h1, h2, h3, h4, h5, h6".to_string()),
        (Role::Alert, _) => Query::Css("[role=\"alert\"]".to_string()),
    }
}

/// Case-insensitive `contains` predicate over an element's normalized text.
fn xpath_ci_contains(needle: &str) -> String {
    const UPPER: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
    const LOWER: &str = "abcdefghijklmnopqrstuvwxyz";
    let lit = xpath_literal(&needle.to_lowercase());
    format!("contains(translate(normalize-space(.), \"{UPPER}\", \"{LOWER}\"), {lit})")
}

/// Quote a string as an XPath 1.0 literal.
///
/// XPath has no escape sequences, so values containing both quote kinds
/// fall back to `concat()`.
fn xpath_literal(value: &str) -> String {
    if !value.contains('"') {
        format!("\"{value}\"")
    } else if !value.contains('\'') {
        format!("'{value}'")
    } else {
        let parts: Vec<String> = value
            .split('"')
            .map(|part| format!("\"{part}\""))
            .collect();
        format!("concat({})", parts.join(", '\"', "))
    }
}

/// Quote a string for use inside a CSS attribute selector.
fn css_string(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}
