//! Unit tests for fragment classification and part markers.

use rstest::rstest;

use crate::fragment::*;

#[rstest]
#[case("ur:bytes/hdeymejtswhhylkepmykhhtsytsnoyoyaxaedsuttydmmhhpktpmsrjtgwdpfnsboxgwlbaawzuefywkdplrsrjynbvygabwjldapfcsdwkbrkch")]
#[case("UR:BYTES/HDEYMEJTSWHHYLKEPMYKHHTSYTSNOYOYAXAEDSUTTYDMMHHPKTPMSRJTGWDPFNSBOXGWLBAAWZUEFYWKDPLRSRJYNBVYGABWJLDAPFCSDWKBRKCH")]
#[case("Ur:crypto-psbt/lpadaxcsencylobemohsgmoyadhdeynteelblrcygldwvarfl")]
fn fragment_accepts_scheme_in_any_case(#[case] text: &str) {
    let fragment = Fragment::parse(text).expect("ur text must be accepted");
    assert_eq!(fragment.text(), text);
    assert!(!fragment.ur_type().is_empty());
}

#[rstest]
#[case("not-a-ur-code")]
#[case("")]
#[case("u")]
#[case("bitcoin:bc1qxy2kgdygjrsqtzq2n0yrf2493p83kkfjhx0wlh")]
#[case(" ur:bytes/abcd")]
#[case("urn:bytes/abcd")]
fn fragment_rejects_foreign_text(#[case] text: &str) {
    assert_eq!(Fragment::parse(text), Err(FormatError::MissingScheme));
}

#[test]
fn fragment_without_marker_is_single_part() {
    let fragment = Fragment::parse("ur:crypto-psbt/hdcxlkahssqzwfvslofzoxwkrewngotktbmwjkwdcmnefsaaehrlolkskncnktlbaypkrphsmyid")
        .expect("single part");
    assert!(!fragment.is_multi_part());
    assert_eq!(fragment.marker(), None);
    assert_eq!(fragment.ur_type(), "crypto-psbt");
}

#[test]
fn fragment_with_marker_is_multi_part() {
    let fragment = Fragment::parse("UR:CRYPTO-PSBT/7-10/LPATAXBKCSJSEE").expect("multi part");
    let marker = fragment.marker().expect("marker detected");
    assert_eq!(marker.sequence().get(), 7);
    assert_eq!(marker.total().get(), 10);
    assert!(!marker.is_mixed());
    assert_eq!(fragment.ur_type(), "crypto-psbt");
}

#[rstest]
#[case("ur:bytes/x-y/body", MarkerError::NotNumeric)]
#[case("ur:bytes/0-5/body", MarkerError::Zero)]
#[case("ur:bytes/3-0/body", MarkerError::Zero)]
#[case("ur:bytes/-/body", MarkerError::NotNumeric)]
#[case("UR:BYTES/99999999999-10/BODY", MarkerError::OutOfRange)]
fn malformed_marker_is_rejected(#[case] text: &str, #[case] expected: MarkerError) {
    assert_eq!(
        Fragment::parse(text),
        Err(FormatError::InvalidMarker(expected))
    );
}

#[test]
fn segment_without_separator_is_not_a_marker() {
    let fragment = Fragment::parse("ur:bytes/3/body").expect("prefix is valid");
    assert!(!fragment.is_multi_part());
}

#[test]
fn marker_segment_without_body_is_not_a_marker() {
    let fragment = Fragment::parse("ur:bytes/1-2").expect("prefix is valid");
    assert!(!fragment.is_multi_part());
}

#[rstest]
#[case("1-1", 1, 1)]
#[case("15-10", 15, 10)]
#[case("4294967295-1", u32::MAX, 1)]
fn marker_parses_components(#[case] raw: &str, #[case] sequence: u32, #[case] total: u32) {
    let marker: PartMarker = raw.parse().expect("valid marker");
    assert_eq!(marker.sequence().get(), sequence);
    assert_eq!(marker.total().get(), total);
    assert_eq!(marker.to_string(), raw);
}

#[rstest]
#[case("12", MarkerError::MissingSeparator)]
#[case("a-2", MarkerError::NotNumeric)]
#[case("-2", MarkerError::NotNumeric)]
#[case("+1-2", MarkerError::NotNumeric)]
#[case("4294967296-2", MarkerError::OutOfRange)]
#[case("0-2", MarkerError::Zero)]
fn marker_rejects_malformed_input(#[case] raw: &str, #[case] expected: MarkerError) {
    assert_eq!(raw.parse::<PartMarker>(), Err(expected));
}

#[test]
fn first_sequence_number_is_one() {
    assert_eq!(SequenceNumber::first().get(), 1);
    assert_eq!(SequenceNumber::new(0), None);
    assert_eq!(PartCount::new(0), None);
}
