//! Unit tests for the scan reassembly controller.

use std::sync::{Arc, Mutex};

use proptest::prelude::*;
use rstest::{fixture, rstest};

use super::*;
use crate::{
    codec::{BYTES, DecodedPayload, EncodeOptions, FragmentDecoder, encode},
    fragment::FormatError,
};

/// Decoder double that records every fragment and completes on demand.
#[derive(Debug, Default)]
struct RecordingDecoder {
    log: Arc<Mutex<Vec<String>>>,
    complete_after: Option<usize>,
    fail_with: Option<String>,
    estimate: Option<f64>,
}

impl RecordingDecoder {
    fn received(&self) -> usize { self.log.lock().expect("log lock").len() }
}

impl FragmentDecoder for RecordingDecoder {
    fn receive(&mut self, fragment: &str) {
        self.log.lock().expect("log lock").push(fragment.to_owned());
    }

    fn is_complete(&self) -> bool {
        self.fail_with.is_some() || self.complete_after.is_some_and(|n| self.received() >= n)
    }

    fn is_success(&self) -> bool { self.is_complete() && self.fail_with.is_none() }

    fn result(&self) -> Option<DecodedPayload> {
        self.is_success()
            .then(|| DecodedPayload::new("bytes", b"payload".to_vec()))
    }

    fn error(&self) -> Option<String> { self.fail_with.clone() }

    fn estimated_percent_complete(&self) -> Option<f64> { self.estimate }
}

struct Harness {
    session: ScanSession<RecordingDecoder>,
    log: Arc<Mutex<Vec<String>>>,
}

impl Harness {
    fn new(complete_after: Option<usize>) -> Self {
        Self::build(move |log| RecordingDecoder {
            log,
            complete_after,
            ..RecordingDecoder::default()
        })
    }

    fn build(make: impl Fn(Arc<Mutex<Vec<String>>>) -> RecordingDecoder + Send + 'static) -> Self {
        let log = Arc::new(Mutex::new(Vec::new()));
        let shared = Arc::clone(&log);
        let session = ScanSession::with_decoder_factory(move || make(Arc::clone(&shared)));
        Self { session, log }
    }

    fn fed(&self) -> Vec<String> { self.log.lock().expect("log lock").clone() }
}

#[fixture]
fn harness() -> Harness { Harness::new(None) }

fn part(sequence: u32, total: u32) -> String { format!("ur:bytes/{sequence}-{total}/lpadaxcs") }

#[rstest]
#[case("not-a-ur-code")]
#[case("")]
#[case("u")]
#[case("bitcoin:bc1qxyz")]
#[case("https://example.com/ur:bytes")]
fn foreign_text_is_rejected_without_advancing(mut harness: Harness, #[case] text: &str) {
    harness
        .session
        .on_fragment(&part(1, 4))
        .expect("fragment accepted");
    let progress = harness.session.progress();

    let err = harness
        .session
        .on_fragment(text)
        .expect_err("foreign text must be rejected");
    assert_eq!(err, ScanError::Format(FormatError::MissingScheme));
    assert!(err.is_recoverable());
    assert_eq!(harness.session.scanned_len(), 1);
    assert_eq!(harness.session.progress(), progress);
    assert_eq!(harness.fed().len(), 1);
    assert_eq!(harness.session.outcome(), &ScanOutcome::Pending);
}

#[rstest]
fn first_foreign_text_leaves_progress_at_zero(mut harness: Harness) {
    assert!(harness.session.on_fragment("not-a-ur-code").is_err());
    assert_eq!(harness.session.progress(), Progress::ZERO);
    assert!(harness.session.decoder().is_none());
}

#[rstest]
#[case("ur:crypto-psbt/3-0/lpadaxcs")]
#[case("ur:crypto-psbt/0-5/lpadaxcs")]
#[case("UR:CRYPTO-PSBT/99999999999-10/LPADAXCS")]
fn malformed_marker_never_completes_the_session(mut harness: Harness, #[case] text: &str) {
    harness
        .session
        .on_fragment(&part(1, 4))
        .expect("fragment accepted");
    let progress = harness.session.progress();

    let err = harness
        .session
        .on_fragment(text)
        .expect_err("malformed marker must be rejected");
    assert!(matches!(err, ScanError::Format(FormatError::InvalidMarker(_))));
    assert!(err.is_recoverable());
    assert!(!harness.session.is_terminal());
    assert_eq!(harness.session.outcome(), &ScanOutcome::Pending);
    assert_eq!(harness.session.scanned_len(), 1);
    assert_eq!(harness.session.progress(), progress);
    assert_eq!(harness.fed().len(), 1);
}

#[rstest]
fn duplicates_reach_the_decoder_once(mut harness: Harness) {
    let text = part(2, 5);
    let first = harness.session.on_fragment(&text).expect("accepted");
    assert!(matches!(first, ScanStatus::Accepted { .. }));
    for _ in 0..3 {
        assert_eq!(
            harness.session.on_fragment(&text).expect("duplicate"),
            ScanStatus::Duplicate
        );
    }
    assert_eq!(harness.session.scanned_len(), 1);
    assert_eq!(harness.fed(), vec![text]);
}

#[rstest]
fn letter_case_variants_are_distinct_texts(mut harness: Harness) {
    let text = part(1, 5);
    harness.session.on_fragment(&text).expect("accepted");
    harness
        .session
        .on_fragment(&text.to_ascii_uppercase())
        .expect("accepted");
    assert_eq!(harness.session.scanned_len(), 2);
}

#[rstest]
#[case("ur:bytes/hdcxdwinvezm")]
#[case("UR:CRYPTO-PSBT/HDCXDWINVEZM")]
fn single_part_completes_immediately(mut harness: Harness, #[case] text: &str) {
    let status = harness.session.on_fragment(text).expect("single part");
    assert_eq!(status, ScanStatus::Completed);
    assert!(harness.session.is_terminal());
    assert_eq!(harness.session.progress(), Progress::COMPLETE);
    assert!(harness.fed().is_empty(), "single parts bypass the decoder");
    match harness.session.outcome() {
        ScanOutcome::Success(ScanResult::SinglePart(fragment)) => {
            assert_eq!(fragment.text(), text);
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
}

#[rstest]
fn single_part_wins_over_a_partial_decode(mut harness: Harness) {
    harness.session.on_fragment(&part(1, 3)).expect("accepted");
    let status = harness
        .session
        .on_fragment("ur:bytes/hdcxdwinvezm")
        .expect("single part");
    assert_eq!(status, ScanStatus::Completed);
    assert_eq!(harness.fed().len(), 1);
}

#[test]
fn decoder_is_built_lazily() {
    let builds = Arc::new(Mutex::new(0_usize));
    let counter = Arc::clone(&builds);
    let mut session = ScanSession::with_decoder_factory(move || {
        *counter.lock().expect("counter lock") += 1;
        RecordingDecoder::default()
    });
    assert!(session.decoder().is_none());
    session.on_fragment(&part(1, 3)).expect("accepted");
    session.on_fragment(&part(2, 3)).expect("accepted");
    assert_eq!(*builds.lock().expect("counter lock"), 1);
}

#[test]
fn progress_follows_fraction_of_declared_total() {
    let mut harness = Harness::new(None);
    let expected = [33, 66, 100];
    for (sequence, want) in (1..=3).zip(expected) {
        let status = harness
            .session
            .on_fragment(&part(sequence, 3))
            .expect("accepted");
        assert_eq!(
            status,
            ScanStatus::Accepted {
                progress: Progress::from_fraction(sequence as usize, 3)
            }
        );
        assert_eq!(harness.session.progress().percent(), want);
    }
    assert!(
        !harness.session.is_terminal(),
        "reaching 100% does not imply completion"
    );
    assert_eq!(harness.session.declared_total().map(|n| n.get()), Some(3));
}

#[test]
fn decoder_estimate_takes_precedence() {
    let mut harness = Harness::build(|log| RecordingDecoder {
        log,
        estimate: Some(0.42),
        ..RecordingDecoder::default()
    });
    harness.session.on_fragment(&part(1, 2)).expect("accepted");
    assert_eq!(harness.session.progress().percent(), 42);
}

#[test]
fn decoder_completion_yields_payload() {
    let mut harness = Harness::new(Some(2));
    harness.session.on_fragment(&part(1, 9)).expect("accepted");
    let status = harness.session.on_fragment(&part(7, 9)).expect("completed");
    assert_eq!(status, ScanStatus::Completed);
    let result = harness.session.outcome().result().expect("payload");
    assert_eq!(
        result,
        &ScanResult::Reassembled(DecodedPayload::new("bytes", b"payload".to_vec()))
    );
    assert_eq!(harness.session.progress(), Progress::COMPLETE);
}

#[test]
fn decoder_failure_is_terminal_and_verbatim() {
    let mut harness = Harness::build(|log| RecordingDecoder {
        log,
        fail_with: Some("Invalid checksum".to_owned()),
        ..RecordingDecoder::default()
    });
    let err = harness
        .session
        .on_fragment(&part(1, 4))
        .expect_err("decoder failure");
    assert_eq!(
        err,
        ScanError::Decoder {
            reason: "Invalid checksum".to_owned()
        }
    );
    assert!(!err.is_recoverable());
    assert_eq!(harness.session.outcome().failure(), Some("Invalid checksum"));
}

#[test]
fn terminal_sessions_ignore_input() {
    let mut harness = Harness::new(Some(1));
    harness.session.on_fragment(&part(1, 2)).expect("completed");
    assert_eq!(
        harness.session.on_fragment(&part(2, 2)).expect("ignored"),
        ScanStatus::Ignored
    );
    assert_eq!(
        harness.session.on_fragment("not-a-ur-code").expect("ignored"),
        ScanStatus::Ignored
    );
    assert_eq!(harness.fed().len(), 1);
}

#[rstest]
fn reset_clears_everything(mut harness: Harness) {
    let text = part(1, 4);
    harness.session.on_fragment(&text).expect("accepted");
    harness.session.reset();
    assert_eq!(harness.session.scanned_len(), 0);
    assert_eq!(harness.session.progress(), Progress::ZERO);
    assert!(harness.session.decoder().is_none());
    assert_eq!(harness.session.declared_total(), None);
    assert_eq!(harness.session.outcome(), &ScanOutcome::Pending);

    let status = harness.session.on_fragment(&text).expect("accepted again");
    assert!(matches!(status, ScanStatus::Accepted { .. }));
    assert_eq!(harness.fed().len(), 2, "seen text is new after a reset");
}

#[rstest]
fn reset_reopens_a_terminal_session(mut harness: Harness) {
    harness
        .session
        .on_fragment("ur:bytes/hdcxdwinvezm")
        .expect("single part");
    harness.session.reset();
    assert!(!harness.session.is_terminal());
    harness.session.reset();
    assert_eq!(harness.session.outcome(), &ScanOutcome::Pending);
}

#[test]
fn real_decoder_reassembles_shuffled_parts() {
    let data: Vec<u8> = (0..1_000_u32).map(|i| (i % 251) as u8).collect();
    let mut parts: Vec<String> = encode(BYTES, &data, EncodeOptions::default())
        .expect("stream")
        .collect::<Result<_, _>>()
        .expect("parts");
    assert_eq!(parts.len(), 10);
    parts.swap(0, 9);
    parts.swap(3, 6);

    let mut session = ScanSession::new();
    for text in &parts {
        session.on_fragment(text).expect("fragment accepted");
        session.on_fragment(text).expect("duplicate ignored");
    }
    match session.into_outcome() {
        ScanOutcome::Success(ScanResult::Reassembled(payload)) => {
            assert_eq!(payload.bytes(), data.as_slice());
            assert_eq!(payload.ur_type(), BYTES);
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
}

#[tracing_test::traced_test]
#[test]
fn rejected_text_is_logged() {
    let mut harness = Harness::new(None);
    assert!(harness.session.on_fragment("not-a-ur-code").is_err());
    assert!(logs_contain("rejected scanned text"));
}

proptest! {
    #[test]
    fn progress_never_decreases(
        total in 1_u32..40,
        order in proptest::collection::vec(1_u32..80, 1..120),
    ) {
        let mut harness = Harness::new(None);
        let mut last = Progress::ZERO;
        for sequence in order {
            let _ = harness.session.on_fragment(&part(sequence, total));
            let now = harness.session.progress();
            prop_assert!(now >= last);
            prop_assert!(now.percent() <= 100);
            last = now;
        }
    }

    #[test]
    fn non_ur_text_never_reaches_the_decoder(text in "[^uU].*") {
        let mut harness = Harness::new(None);
        let result = harness.session.on_fragment(&text);
        prop_assert_eq!(result, Err(ScanError::Format(FormatError::MissingScheme)));
        prop_assert_eq!(harness.session.scanned_len(), 0);
        prop_assert!(harness.fed().is_empty());
    }

    #[test]
    fn repeats_grow_the_set_by_at_most_one(sequence in 1_u32..20, repeats in 1_usize..10) {
        let mut harness = Harness::new(None);
        let text = part(sequence, 20);
        for _ in 0..repeats {
            harness.session.on_fragment(&text).expect("accepted or duplicate");
        }
        prop_assert_eq!(harness.session.scanned_len(), 1);
        prop_assert_eq!(harness.fed().len(), 1);
    }
}
