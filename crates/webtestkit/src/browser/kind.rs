// Copyright 2026 Paul Adamson
// Licensed under the Apache License, Version 2.0
//
// BrowserKind - the closed set of launchable browser types

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Tag prefix that selects the browser for a scenario, e.g. `@Browser:Chrome`.
///
/// Cucumber strips the leading `@` before tags reach the hooks.
pub const BROWSER_TAG_PREFIX: &str = "Browser:";

/// A supported browser type.
///
/// The harness drives browsers over the Chrome DevTools Protocol, so every
/// member is a Chromium-family binary: the open-source Chromium build, the
/// branded Google Chrome channel, and the branded Microsoft Edge channel.
/// Matching on this enum is exhaustive on purpose - adding a member forces
/// every selection site to handle it.
///
/// # Example
///
/// ```ignore
/// use webtestkit::browser::BrowserKind;
///
/// let kind: BrowserKind = "chrome".parse()?;
/// assert_eq!(kind, BrowserKind::Chrome);
/// assert_eq!(kind.to_string(), "Chrome");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BrowserKind {
    /// Open-source Chromium build (engine default when no branded binary is wanted)
    Chromium,
    /// Branded Google Chrome, stable channel
    Chrome,
    /// Branded Microsoft Edge, stable channel
    Edge,
}

impl BrowserKind {
    /// Canonical capitalized name, as used in tags and the report.
    pub fn name(&self) -> &'static str {
        match self {
            BrowserKind::Chromium => "Chromium",
            BrowserKind::Chrome => "Chrome",
            BrowserKind::Edge => "Edge",
        }
    }

    /// Selects the browser kind from a scenario's tags.
    ///
    /// Looks for a `Browser:<Name>` tag; a missing tag or an unrecognized
    /// name fails with `UnsupportedBrowser`.
    pub fn from_tags<S: AsRef<str>>(tags: &[S]) -> Result<Self> {
        let tag = tags
            .iter()
            .map(AsRef::as_ref)
            .find(|tag| tag.starts_with(BROWSER_TAG_PREFIX))
            .ok_or_else(|| Error::UnsupportedBrowser {
                tag: "<none>".to_owned(),
            })?;

        tag[BROWSER_TAG_PREFIX.len()..]
            .parse()
            .map_err(|_| Error::UnsupportedBrowser {
                tag: tag.to_owned(),
            })
    }

    /// Locates the branded executable for this kind on PATH.
    ///
    /// `Chromium` returns `None` so the engine falls back to its own
    /// discovery of a system Chromium build.
    pub fn executable(&self) -> Option<PathBuf> {
        let candidates: &[&str] = match self {
            BrowserKind::Chromium => &[],
            BrowserKind::Chrome => &["google-chrome", "google-chrome-stable", "chrome"],
            BrowserKind::Edge => &["microsoft-edge", "microsoft-edge-stable", "msedge"],
        };

        candidates.iter().find_map(|name| which::which(name).ok())
    }
}

impl FromStr for BrowserKind {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "chromium" => Ok(BrowserKind::Chromium),
            "chrome" => Ok(BrowserKind::Chrome),
            "edge" | "msedge" => Ok(BrowserKind::Edge),
            _ => Err(()),
        }
    }
}

impl fmt::Display for BrowserKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_supported_name_parses_to_its_kind() {
        for (name, kind) in [
            ("Chromium", BrowserKind::Chromium),
            ("Chrome", BrowserKind::Chrome),
            ("Edge", BrowserKind::Edge),
        ] {
            assert_eq!(name.parse::<BrowserKind>().unwrap(), kind);
            assert_eq!(name.to_lowercase().parse::<BrowserKind>().unwrap(), kind);
            assert_eq!(kind.name(), name);
        }
    }

    #[test]
    fn tag_selection_finds_the_browser_tag_among_others() {
        let tags = ["UI".to_owned(), "Browser:Edge".to_owned()];
        assert_eq!(BrowserKind::from_tags(&tags).unwrap(), BrowserKind::Edge);
    }

    #[test]
    fn unrecognized_tag_fails_with_unsupported_browser() {
        let tags = ["UI".to_owned(), "Browser:Netscape".to_owned()];
        let err = BrowserKind::from_tags(&tags).unwrap_err();
        assert!(matches!(
            err,
            crate::error::Error::UnsupportedBrowser { ref tag } if tag == "Browser:Netscape"
        ));
    }

    #[test]
    fn missing_tag_fails_with_unsupported_browser() {
        let tags = ["UI".to_owned()];
        assert!(matches!(
            BrowserKind::from_tags(&tags),
            Err(crate::error::Error::UnsupportedBrowser { .. })
        ));
    }
}
