// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Page count resolution.
//!
//! A pager can learn how many pages exist from several places. They are
//! consulted in a fixed order and the first one that knows wins:
//!
//! 1. [`PageCountSource::Preset`]: an explicit count set on the pager.
//! 2. [`PageCountSource::Provider`]: [`ContentProvider::page_count`].
//! 3. [`PageCountSource::Discovered`]: the first index for which the provider
//!    returned no content, when neither of the above is known.
//!
//! When none is known the sequence is open-ended and the provider is asked
//! until it runs out.
//!
//! [`ContentProvider::page_count`]: crate::ContentProvider::page_count

/// Where a resolved page count came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PageCountSource {
    /// Explicitly set on the pager.
    Preset,
    /// Reported by the content provider.
    Provider,
    /// Inferred from the provider running out of content.
    Discovered,
}

impl PageCountSource {
    /// All sources, in precedence order.
    pub const PRECEDENCE: [Self; 3] = [Self::Preset, Self::Provider, Self::Discovered];
}

/// A page count together with its source.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResolvedPageCount {
    /// Number of pages; valid indices are `0..count`.
    pub count: usize,
    /// Which source supplied `count`.
    pub source: PageCountSource,
}

/// The candidate counts known at one point in time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PageCountSources {
    /// Explicit count set on the pager.
    pub preset: Option<usize>,
    /// Count reported by the content provider.
    pub provider: Option<usize>,
    /// First index the provider had no content for.
    pub discovered: Option<usize>,
}

impl PageCountSources {
    /// Returns the candidate for one source.
    #[must_use]
    pub fn get(&self, source: PageCountSource) -> Option<usize> {
        match source {
            PageCountSource::Preset => self.preset,
            PageCountSource::Provider => self.provider,
            PageCountSource::Discovered => self.discovered,
        }
    }

    /// Resolves the count: the first present candidate in precedence order.
    #[must_use]
    pub fn resolve(&self) -> Option<ResolvedPageCount> {
        PageCountSource::PRECEDENCE.into_iter().find_map(|source| {
            self.get(source)
                .map(|count| ResolvedPageCount { count, source })
        })
    }

    /// Returns `true` if a preset or provider count is known.
    ///
    /// Only these are authoritative; a discovered end may move if the
    /// provider gains content later.
    #[must_use]
    pub fn is_explicit(&self) -> bool {
        self.preset.is_some() || self.provider.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::{PageCountSource, PageCountSources, ResolvedPageCount};

    #[test]
    fn nothing_known_is_open_ended() {
        assert_eq!(PageCountSources::default().resolve(), None);
    }

    #[test]
    fn preset_beats_provider_beats_discovered() {
        let mut sources = PageCountSources {
            preset: Some(3),
            provider: Some(10),
            discovered: Some(7),
        };
        assert_eq!(
            sources.resolve(),
            Some(ResolvedPageCount {
                count: 3,
                source: PageCountSource::Preset
            })
        );

        sources.preset = None;
        assert_eq!(sources.resolve().map(|r| r.source), Some(PageCountSource::Provider));
        assert!(sources.is_explicit());

        sources.provider = None;
        assert_eq!(sources.resolve().map(|r| r.count), Some(7));
        assert!(!sources.is_explicit());
    }

    #[test]
    fn zero_is_a_real_count() {
        let sources = PageCountSources {
            preset: Some(0),
            provider: Some(4),
            discovered: None,
        };
        assert_eq!(sources.resolve().map(|r| r.count), Some(0));
    }
}
