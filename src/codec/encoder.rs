//! Outbound helper that turns a payload into UR fragment strings.
//!
//! [`FragmentStream`] mirrors the decoder side: it hands out fragments one at
//! a time and can be rewound to any sequence number, which is all an animated
//! QR display needs. The fountain parts themselves come from [`ur::Encoder`].

use std::{fmt, num::NonZeroUsize};

use super::{EncodeError, encode_single_part, is_valid_ur_type};
use crate::fragment::SequenceNumber;

/// Default cap on the bytes carried by one fragment.
pub const DEFAULT_MAX_FRAGMENT_LEN: NonZeroUsize = NonZeroUsize::new(100).unwrap();

/// Default lower bound on fragment length.
pub const DEFAULT_MIN_FRAGMENT_LEN: NonZeroUsize = NonZeroUsize::new(10).unwrap();

/// Largest sequence number a stream may start or restart at.
///
/// Reaching sequence `n` means generating and discarding `n - 1` parts.
pub const MAX_START_SEQUENCE: u32 = 10_000;

fn check_start(sequence: SequenceNumber) -> Result<(), EncodeError> {
    if sequence.get() > MAX_START_SEQUENCE {
        return Err(EncodeError::SequenceTooLarge {
            sequence: sequence.get(),
            max: MAX_START_SEQUENCE,
        });
    }
    Ok(())
}

/// Settings that bound fragment sizes and choose where the sequence starts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EncodeOptions {
    max_fragment_len: NonZeroUsize,
    min_fragment_len: NonZeroUsize,
    first_sequence: SequenceNumber,
}

impl EncodeOptions {
    /// Validate and construct encoder options.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError::FragmentBounds`] when `min_fragment_len`
    /// exceeds `max_fragment_len`, and [`EncodeError::SequenceTooLarge`]
    /// when `first_sequence` is above [`MAX_START_SEQUENCE`].
    pub fn new(
        max_fragment_len: NonZeroUsize,
        min_fragment_len: NonZeroUsize,
        first_sequence: SequenceNumber,
    ) -> Result<Self, EncodeError> {
        if min_fragment_len > max_fragment_len {
            return Err(EncodeError::FragmentBounds {
                min: min_fragment_len,
                max: max_fragment_len,
            });
        }
        check_start(first_sequence)?;
        Ok(Self {
            max_fragment_len,
            min_fragment_len,
            first_sequence,
        })
    }

    /// Maximum payload bytes per fragment.
    #[must_use]
    pub const fn max_fragment_len(&self) -> NonZeroUsize { self.max_fragment_len }

    /// Minimum payload bytes per fragment.
    #[must_use]
    pub const fn min_fragment_len(&self) -> NonZeroUsize { self.min_fragment_len }

    /// Sequence number of the first emitted fragment.
    #[must_use]
    pub const fn first_sequence(&self) -> SequenceNumber { self.first_sequence }

    /// Report whether `len` payload bytes fit in a single-part UR.
    #[must_use]
    pub const fn fits_single_part(&self, len: usize) -> bool { len <= self.max_fragment_len.get() }
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            max_fragment_len: DEFAULT_MAX_FRAGMENT_LEN,
            min_fragment_len: DEFAULT_MIN_FRAGMENT_LEN,
            first_sequence: SequenceNumber::first(),
        }
    }
}

type NextPart<'a> = Box<dyn FnMut() -> Result<String, EncodeError> + 'a>;

enum PartSource<'a> {
    Single(String),
    Fountain(NextPart<'a>),
}

/// Lazily generated fragments for one payload.
///
/// Iterating yields [`fragment_count`](Self::fragment_count) fragments from
/// the current position. [`next_part`](Self::next_part) keeps going past that
/// point: the fountain encoder emits an unbounded stream of mixed parts, any
/// sufficient subset of which rebuilds the payload.
///
/// # Examples
///
/// ```
/// use psbt_qr::codec::{EncodeOptions, encode};
/// let payload = vec![7_u8; 450];
/// let stream = encode("bytes", &payload, EncodeOptions::default()).expect("valid options");
/// assert_eq!(stream.fragment_count(), 5);
/// let parts: Vec<String> = stream.collect::<Result<_, _>>().expect("parts");
/// assert!(parts[0].starts_with("ur:bytes/1-5/"));
/// ```
pub struct FragmentStream<'a> {
    ur_type: &'a str,
    payload: &'a [u8],
    options: EncodeOptions,
    fragment_count: usize,
    next_sequence: u32,
    yielded: usize,
    source: PartSource<'a>,
}

/// Build a [`FragmentStream`] for `payload` tagged with `ur_type`.
///
/// Payloads that fit in one fragment produce a single-part UR, repeated on
/// every call.
///
/// # Errors
///
/// Returns [`EncodeError::InvalidType`] for malformed type tags and
/// [`EncodeError::Codec`] when the fountain encoder rejects the payload.
pub fn encode<'a>(
    ur_type: &'a str,
    payload: &'a [u8],
    options: EncodeOptions,
) -> Result<FragmentStream<'a>, EncodeError> {
    FragmentStream::new(ur_type, payload, options)
}

impl<'a> FragmentStream<'a> {
    fn new(ur_type: &'a str, payload: &'a [u8], options: EncodeOptions) -> Result<Self, EncodeError> {
        if !is_valid_ur_type(ur_type) {
            return Err(EncodeError::InvalidType(ur_type.to_owned()));
        }
        let mut stream = Self {
            ur_type,
            payload,
            options,
            fragment_count: 1,
            next_sequence: 1,
            yielded: 0,
            source: PartSource::Single(String::new()),
        };
        stream.restart_at(options.first_sequence())?;
        Ok(stream)
    }

    /// Number of pure fragments the payload was split into.
    #[must_use]
    pub const fn fragment_count(&self) -> usize { self.fragment_count }

    /// Report whether the payload travels as a single-part UR.
    #[must_use]
    pub const fn is_single_part(&self) -> bool { matches!(self.source, PartSource::Single(_)) }

    /// Sequence number the next call to [`next_part`](Self::next_part) emits.
    #[must_use]
    pub const fn next_sequence(&self) -> u32 { self.next_sequence }

    /// UR type tag carried by every fragment.
    #[must_use]
    pub const fn ur_type(&self) -> &'a str { self.ur_type }

    /// Emit the next fragment, continuing into mixed parts past the pure range.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError::Codec`] when the fountain encoder fails.
    pub fn next_part(&mut self) -> Result<String, EncodeError> {
        let part = match &mut self.source {
            PartSource::Single(text) => text.clone(),
            PartSource::Fountain(next) => next()?,
        };
        self.next_sequence = self.next_sequence.saturating_add(1);
        crate::metrics::inc_fragments_encoded();
        Ok(part)
    }

    /// Rewind or fast-forward so the next fragment carries `sequence`.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError::SequenceTooLarge`] when `sequence` is above
    /// [`MAX_START_SEQUENCE`] and [`EncodeError::Codec`] when the fountain
    /// encoder cannot be rebuilt for the payload.
    pub fn restart_at(&mut self, sequence: SequenceNumber) -> Result<(), EncodeError> {
        check_start(sequence)?;
        self.yielded = 0;
        self.next_sequence = sequence.get();
        if self.options.fits_single_part(self.payload.len()) {
            self.fragment_count = 1;
            self.source = PartSource::Single(encode_single_part(self.ur_type, self.payload)?);
            return Ok(());
        }

        let mut encoder = ur::Encoder::new(
            self.payload,
            self.options.max_fragment_len().get(),
            self.ur_type,
        )
        .map_err(|err| EncodeError::Codec(err.to_string()))?;
        self.fragment_count = encoder.fragment_count();
        for _ in 1..sequence.get() {
            encoder
                .next_part()
                .map_err(|err| EncodeError::Codec(err.to_string()))?;
        }
        self.source = PartSource::Fountain(Box::new(move || {
            encoder
                .next_part()
                .map_err(|err| EncodeError::Codec(err.to_string()))
        }));
        Ok(())
    }
}

impl Iterator for FragmentStream<'_> {
    type Item = Result<String, EncodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.yielded >= self.fragment_count {
            return None;
        }
        self.yielded += 1;
        Some(self.next_part())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.fragment_count.saturating_sub(self.yielded);
        (remaining, Some(remaining))
    }
}

impl fmt::Debug for FragmentStream<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FragmentStream")
            .field("ur_type", &self.ur_type)
            .field("payload_len", &self.payload.len())
            .field("options", &self.options)
            .field("fragment_count", &self.fragment_count)
            .field("next_sequence", &self.next_sequence)
            .finish_non_exhaustive()
    }
}
