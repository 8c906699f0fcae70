use proptest::prelude::*;
use shapedraw::path::{decode, encode, strip_closing_points, EMPTY_PATH};

mod proptest_helpers;

proptest! {
    #![proptest_config(proptest_helpers::proptest_config())]

    #[test]
    fn closed_sets_roundtrip_through_path_string(
        polygons in proptest_helpers::arb_polygon_set(3, 12)
    ) {
        let restored = strip_closing_points(decode(&encode(&polygons, false)));
        prop_assert_eq!(restored, polygons);
    }

    #[test]
    fn open_sets_roundtrip_without_stripping(
        polygons in proptest_helpers::arb_polygon_set(3, 12)
    ) {
        let encoded = encode(&polygons, true);
        prop_assert!(!encoded.ends_with('Z'));
        prop_assert_eq!(decode(&encoded), polygons);
    }

    #[test]
    fn encoding_is_stable_after_one_roundtrip(
        polygons in proptest_helpers::arb_polygon_set(3, 12)
    ) {
        let once = encode(&polygons, false);
        let twice = encode(&strip_closing_points(decode(&once)), false);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn decoder_never_panics(input in ".{0,200}") {
        let polygons = decode(&input);
        let encoded = encode(&polygons, false);
        prop_assert!(encoded.starts_with('M'));
    }

    #[test]
    fn decoder_tolerates_unknown_commands(
        polygons in proptest_helpers::arb_polygon_set(2, 8)
    ) {
        let encoded = encode(&polygons, false);
        let noisy = format!("C1,2,3,4,5,6{}Q9,9,9,9", encoded);
        prop_assert_eq!(decode(&noisy), decode(&encoded));
    }
}

#[test]
fn empty_set_encodes_as_degenerate_path() {
    let polygons: Vec<Vec<shapedraw::geom::Point<shapedraw::geom::Pixel>>> = Vec::new();
    assert_eq!(encode(&polygons, false), EMPTY_PATH);
}
