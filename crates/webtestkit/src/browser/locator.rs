// Locator - declarative element selector, resolved at action time
//
// Locators carry a CSS selector plus an optional match index; they hold no
// live element handle. Every PageHandle action resolves the locator fresh,
// which is what makes actions retry-able while an element is still
// attaching.

use serde::Serialize;

/// A declarative reference to a page element.
///
/// # Example
///
/// ```ignore
/// use webtestkit::browser::Locator;
///
/// let button = Locator::css("#submit");
/// let last_row = Locator::css("table tr").last();
/// let third_cell = Locator::css("td").nth(2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Locator {
    selector: String,
    /// Index among matches; negative counts from the end (-1 = last)
    index: Option<i64>,
}

impl Locator {
    /// Creates a locator from a CSS selector.
    pub fn css(selector: impl Into<String>) -> Self {
        Locator {
            selector: selector.into(),
            index: None,
        }
    }

    /// Returns the raw selector string.
    pub fn selector(&self) -> &str {
        &self.selector
    }

    /// Index among matches, if the locator was refined.
    pub fn index(&self) -> Option<i64> {
        self.index
    }

    /// Locator for the first matching element.
    pub fn first(mut self) -> Self {
        self.index = Some(0);
        self
    }

    /// Locator for the last matching element.
    pub fn last(mut self) -> Self {
        self.index = Some(-1);
        self
    }

    /// Locator for the nth matching element (0-indexed).
    pub fn nth(mut self, index: i64) -> Self {
        self.index = Some(index);
        self
    }

    /// JS expression evaluating to the target element or `null`.
    ///
    /// The selector is JSON-escaped so quotes and backslashes in selector
    /// text cannot break out of the script.
    pub(crate) fn js_element(&self) -> String {
        let escaped = serde_json::to_string(&self.selector)
            .unwrap_or_else(|_| "\"\"".to_owned());
        match self.index {
            None | Some(0) => format!("document.querySelector({escaped})"),
            Some(index) => format!(
                "(() => {{ const list = document.querySelectorAll({escaped}); \
                 const i = {index} < 0 ? list.length + {index} : {index}; \
                 return list[i] ?? null; }})()"
            ),
        }
    }

    /// Human-readable form for timeout and error messages.
    pub(crate) fn describe(&self) -> String {
        match self.index {
            None => self.selector.clone(),
            Some(0) => format!("{} (first)", self.selector),
            Some(-1) => format!("{} (last)", self.selector),
            Some(index) => format!("{} (nth {index})", self.selector),
        }
    }
}

impl From<&str> for Locator {
    fn from(selector: &str) -> Self {
        Locator::css(selector)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_locator_resolves_with_query_selector() {
        let locator = Locator::css("#search");
        assert_eq!(locator.js_element(), "document.querySelector(\"#search\")");
    }

    #[test]
    fn selector_text_is_json_escaped_in_js() {
        let locator = Locator::css(r#"input[name="btnK"]"#);
        assert!(
            locator
                .js_element()
                .contains(r#"document.querySelector("input[name=\"btnK\"]")"#)
        );
    }

    #[test]
    fn last_uses_negative_indexing_from_the_end() {
        let locator = Locator::css("li").last();
        let js = locator.js_element();
        assert!(js.contains("querySelectorAll(\"li\")"));
        assert!(js.contains("list.length + -1"));
        assert_eq!(locator.describe(), "li (last)");
    }

    #[test]
    fn nth_keeps_zero_based_index() {
        let locator = Locator::css("td").nth(2);
        assert_eq!(locator.index(), Some(2));
        assert_eq!(locator.describe(), "td (nth 2)");
    }
}
