//! Style sets: the style variants available within one family.

use std::fmt::Debug;
use std::sync::Arc;

use fontmgr_style::FontStyle;

use crate::typeface::SharedTypeface;

/// Style sets are handed out as shared references and outlive the manager
/// that created them.
pub type SharedStyleSet = Arc<dyn StyleSet>;

/// The styles available within one family.
///
/// Indices run over `0..count()`. Calling `style` or `create_typeface` with an
/// index outside that range is a caller bug and panics.
pub trait StyleSet: Send + Sync + Debug {
    /// Number of styles in the set.
    fn count(&self) -> usize;

    /// Returns the style at `index` together with its style name, if the
    /// backend knows one (e.g. "Bold Italic").
    fn style(&self, index: usize) -> (FontStyle, Option<String>);

    /// Creates the typeface at `index`, or `None` if its resource can no longer be loaded.
    fn create_typeface(&self, index: usize) -> Option<SharedTypeface>;

    /// Returns the member closest to `pattern`, or `None` if the set has no usable member.
    fn match_style(&self, pattern: &FontStyle) -> Option<SharedTypeface>;
}

/// A style set with no members.
///
/// Stands in wherever a backend has nothing to offer, so callers never see
/// a missing style set.
#[derive(Debug, Default, Clone, Copy)]
pub struct EmptyStyleSet;

impl EmptyStyleSet {
    pub fn new() -> Self {
        EmptyStyleSet
    }

    /// A fresh shared empty set.
    pub fn shared() -> SharedStyleSet {
        Arc::new(EmptyStyleSet)
    }
}

impl StyleSet for EmptyStyleSet {
    fn count(&self) -> usize {
        0
    }

    fn style(&self, index: usize) -> (FontStyle, Option<String>) {
        panic!("StyleSet::style({index}) called on empty set");
    }

    fn create_typeface(&self, index: usize) -> Option<SharedTypeface> {
        panic!("StyleSet::create_typeface({index}) called on empty set");
    }

    fn match_style(&self, _pattern: &FontStyle) -> Option<SharedTypeface> {
        None
    }
}

/// Index of the style in `styles` closest to `pattern`. Ties go to the earlier entry.
pub fn closest_style<I>(styles: I, pattern: &FontStyle) -> Option<usize>
where
    I: IntoIterator<Item = FontStyle>,
{
    styles
        .into_iter()
        .enumerate()
        .min_by_key(|(_, style)| pattern.distance(style))
        .map(|(index, _)| index)
}
