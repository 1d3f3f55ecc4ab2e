//! Heuristic matchers
//!
//! Every lookup the extractors perform ("the first heading inside the article",
//! "anything whose class mentions a date") is a [`Matcher`]. Fallback chains are
//! ordered lists of matchers where the first hit wins, so each heuristic can be
//! exercised on a fragment of HTML without loading a page.

use super::text::visible_text;
use crate::provider::parse_selector;
use crate::ExtractError;
use regex::Regex;
use scraper::{ElementRef, Selector};

/// A single structural or textual heuristic
#[derive(Debug, Clone)]
pub enum Matcher {
    /// Descendant matching a CSS selector
    Css(Selector),

    /// Descendant whose class attribute contains one of the fragments
    /// (substring match on the raw attribute, not per class token)
    ClassContains(Vec<String>),

    /// The scope itself, when its visible text matches the pattern
    TextPattern(Regex),
}

impl Matcher {
    pub fn css(css: &str) -> Result<Self, ExtractError> {
        Ok(Self::Css(parse_selector(css)?))
    }

    pub fn class_contains(fragments: &[&str]) -> Self {
        Self::ClassContains(fragments.iter().map(|f| f.to_string()).collect())
    }

    /// Returns true if `element` itself satisfies this matcher
    pub fn matches(&self, element: &ElementRef) -> bool {
        match self {
            Self::Css(selector) => selector.matches(element),
            Self::ClassContains(fragments) => element
                .value()
                .attr("class")
                .map_or(false, |class| fragments.iter().any(|f| class.contains(f.as_str()))),
            Self::TextPattern(pattern) => pattern.is_match(&visible_text(*element)),
        }
    }

    /// First match strictly below `scope`, in document order
    ///
    /// `TextPattern` looks at the scope's own text instead.
    pub fn find<'a>(&self, scope: ElementRef<'a>) -> Option<ElementRef<'a>> {
        match self {
            Self::Css(selector) => scope.select(selector).next(),
            Self::ClassContains(_) => scope
                .descendants()
                .skip(1)
                .filter_map(ElementRef::wrap)
                .find(|element| self.matches(element)),
            Self::TextPattern(_) => Some(scope).filter(|element| self.matches(element)),
        }
    }

    /// Like [`Matcher::find`], but `scope` itself is also a candidate
    pub fn find_inclusive<'a>(&self, scope: ElementRef<'a>) -> Option<ElementRef<'a>> {
        if self.matches(&scope) {
            Some(scope)
        } else {
            self.find(scope)
        }
    }
}

/// Ordered fallback chain; the first matcher that finds something wins
#[derive(Debug, Clone, Default)]
pub struct MatcherChain {
    steps: Vec<Matcher>,
}

impl MatcherChain {
    pub fn new(steps: Vec<Matcher>) -> Self {
        Self { steps }
    }

    /// A chain of CSS selectors, tried in the given order
    pub fn from_css(selectors: &[&str]) -> Result<Self, ExtractError> {
        let steps = selectors
            .iter()
            .map(|css| Matcher::css(css))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(steps))
    }

    pub fn first_match<'a>(&self, scope: ElementRef<'a>) -> Option<ElementRef<'a>> {
        self.steps.iter().find_map(|matcher| matcher.find(scope))
    }

    /// Returns true if any step matches `element` itself
    pub fn matches_any(&self, element: &ElementRef) -> bool {
        self.steps.iter().any(|matcher| matcher.matches(element))
    }
}

/// Where a matched element's value comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldSource {
    /// Trimmed visible text
    Text,
    /// The named attribute when present and non-empty, else trimmed visible text
    AttrOrText(&'static str),
}

impl FieldSource {
    pub fn read(&self, element: ElementRef) -> String {
        match self {
            Self::Text => visible_text(element).trim().to_string(),
            Self::AttrOrText(attr) => element
                .value()
                .attr(attr)
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| visible_text(element).trim().to_string()),
        }
    }
}
