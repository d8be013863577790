//! Classification of raw scanner output into UR fragments.
//!
//! Fragment bodies are owned by the external codec and are treated as opaque
//! here. Only the scheme prefix, the type segment and the optional part marker
//! are inspected.

use super::{FormatError, PartMarker};

/// Scheme prefix every UR string starts with, compared case-insensitively.
pub const UR_SCHEME: &str = "ur:";

/// A single scanned UR fragment.
///
/// # Examples
///
/// ```
/// use psbt_qr::fragment::Fragment;
/// let fragment = Fragment::parse("UR:CRYPTO-PSBT/2-9/LPAOASCSKN").expect("ur fragment");
/// assert_eq!(fragment.ur_type(), "crypto-psbt");
/// assert_eq!(fragment.marker().map(|m| m.total().get()), Some(9));
/// assert!(fragment.is_multi_part());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fragment {
    text: String,
    ur_type: String,
    marker: Option<PartMarker>,
}

impl Fragment {
    /// Classify `text` as a UR fragment.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::MissingScheme`] when `text` does not begin with
    /// `ur:` in any letter case, and [`FormatError::InvalidMarker`] when the
    /// segment after the type looks like an `i-n` marker but does not parse.
    pub fn parse(text: &str) -> Result<Self, FormatError> {
        if !has_ur_scheme(text) {
            return Err(FormatError::MissingScheme);
        }
        let path = &text[UR_SCHEME.len()..];
        let mut segments = path.split('/');
        let ur_type = segments.next().unwrap_or_default().to_ascii_lowercase();
        let marker = match (segments.next(), segments.next()) {
            (Some(candidate), Some(_body)) if candidate.contains('-') => {
                Some(candidate.parse::<PartMarker>()?)
            }
            _ => None,
        };
        Ok(Self {
            text: text.to_owned(),
            ur_type,
            marker,
        })
    }

    /// Borrow the text exactly as scanned.
    #[must_use]
    pub fn text(&self) -> &str { &self.text }

    /// Consume the fragment, returning the scanned text.
    #[must_use]
    pub fn into_text(self) -> String { self.text }

    /// UR type tag, lower-cased.
    #[must_use]
    pub fn ur_type(&self) -> &str { &self.ur_type }

    /// Part marker for multi-part fragments.
    #[must_use]
    pub const fn marker(&self) -> Option<PartMarker> { self.marker }

    /// Report whether the fragment is one part of a fountain-coded series.
    #[must_use]
    pub const fn is_multi_part(&self) -> bool { self.marker.is_some() }
}

/// Check the case-insensitive `ur:` prefix without allocating.
#[must_use]
pub fn has_ur_scheme(text: &str) -> bool {
    text.get(..UR_SCHEME.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(UR_SCHEME))
}
