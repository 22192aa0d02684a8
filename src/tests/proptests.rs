use crate::{
    decode, decode_chunk, encode, encode_chunk, zigzag_decode, zigzag_encode, Coordinate, Decoder,
    Encoder, Polyline,
};
use proptest::prelude::*;

prop_compose! {
    /// A coordinate anywhere on the globe
    fn arb_coordinate()(lat in -90.0f64..=90.0, lng in -180.0f64..=180.0) -> Coordinate {
        Coordinate::new(lat, lng)
    }
}

prop_compose! {
    /// A path confined to a small region around the null island, to be shifted
    fn arb_local_path()(
        points in prop::collection::vec((-5.0f64..5.0, -5.0f64..5.0), 0..100),
    ) -> Vec<Coordinate> {
        points.into_iter().map(Coordinate::from).collect()
    }
}

fn arb_path() -> impl Strategy<Value = Vec<Coordinate>> {
    prop::collection::vec(arb_coordinate(), 0..200)
}

/// Allowed distance between a component and its decoded value
fn tolerance(precision: u8) -> f64 {
    0.5 * 10f64.powi(-i32::from(precision)) + 1e-9
}

fn assert_within(expected: &[Coordinate], decoded: &[Coordinate], precision: u8) -> Result<(), TestCaseError> {
    prop_assert_eq!(expected.len(), decoded.len());
    let tol = tolerance(precision);
    for (o, d) in expected.iter().zip(decoded) {
        prop_assert!((o.lat - d.lat).abs() <= tol, "lat {} decoded as {} (p={})", o.lat, d.lat, precision);
        prop_assert!((o.lng - d.lng).abs() <= tol, "lng {} decoded as {} (p={})", o.lng, d.lng, precision);
    }
    Ok(())
}

/// Generate the codec laws for one precision
macro_rules! proptest_precision {
    ($precision:expr, $mod_name:ident) => {
        mod $mod_name {
            use super::*;

            const P: u8 = $precision;

            proptest! {
                /// Property: decode(encode(xs)) is within half a grid step of xs
                #[test]
                fn prop_roundtrip_within_bound(path in arb_path()) {
                    let encoded = encode(&path, P).unwrap();
                    let decoded = decode(&encoded, P).unwrap();
                    assert_within(&path, &decoded, P)?;
                }

                /// Property: a second round trip changes nothing
                #[test]
                fn prop_second_roundtrip_is_identity(path in arb_path()) {
                    let first = decode(&encode(&path, P).unwrap(), P).unwrap();
                    let encoded_again = encode(&first, P).unwrap();
                    let second = decode(&encoded_again, P).unwrap();
                    prop_assert_eq!(&first, &second);
                    prop_assert_eq!(encode(&path, P).unwrap(), encoded_again);
                }

                /// Property: shifting a path by a large offset keeps the error bound
                #[test]
                fn prop_offset_independence(
                    path in arb_local_path(),
                    d_lat in -80.0f64..80.0,
                    d_lng in -170.0f64..170.0,
                ) {
                    let shifted: Vec<Coordinate> = path
                        .iter()
                        .map(|c| Coordinate::new(c.lat + d_lat, c.lng + d_lng))
                        .collect();
                    let encoded = encode(&shifted, P).unwrap();
                    let decoded = decode(&encoded, P).unwrap();
                    assert_within(&shifted, &decoded, P)?;
                }

                /// Property: appending one point at a time equals batch encoding
                #[test]
                fn prop_streaming_matches_batch(path in arb_path()) {
                    let mut enc = Encoder::new(P);
                    for c in &path {
                        enc.append(*c).unwrap();
                    }
                    prop_assert_eq!(enc.count(), path.len());
                    prop_assert_eq!(enc.as_str(), encode(&path, P).unwrap());
                }

                /// Property: resuming a prefix and appending the rest equals batch encoding
                #[test]
                fn prop_resume_matches_batch(path in arb_path(), split in any::<prop::sample::Index>()) {
                    let at = if path.is_empty() { 0 } else { split.index(path.len() + 1) };
                    let prefix = encode(&path[..at], P).unwrap();

                    let mut enc = Encoder::resume(prefix, P).unwrap();
                    enc.extend(path[at..].iter().copied()).unwrap();
                    prop_assert_eq!(enc.into_string(), encode(&path, P).unwrap());
                }
            }
        }
    };
}

proptest_precision!(0, precision_0);
proptest_precision!(1, precision_1);
proptest_precision!(2, precision_2);
proptest_precision!(3, precision_3);
proptest_precision!(4, precision_4);
proptest_precision!(5, precision_5);
proptest_precision!(6, precision_6);

proptest! {
    /// Property: zigzag is a bijection
    #[test]
    fn prop_zigzag_inverse(v in any::<i32>()) {
        prop_assert_eq!(zigzag_decode(zigzag_encode(v)), v);
    }

    /// Property: small magnitudes map to small values
    #[test]
    fn prop_zigzag_compact(v in -1_000_000i32..1_000_000) {
        prop_assert!(zigzag_encode(v) <= 2 * v.unsigned_abs());
    }

    /// Property: every chunk decodes to its value and consumes exactly its bytes
    #[test]
    fn prop_chunk_inverse(v in any::<u32>(), tail in "[?-~]{0,8}") {
        let mut out = String::new();
        encode_chunk(v, &mut out);
        let len = out.len();
        out.push_str(&tail);
        prop_assert_eq!(decode_chunk(out.as_bytes()).unwrap(), (v, len));
    }

    /// Property: encoded output stays inside the printable alphabet
    #[test]
    fn prop_output_alphabet(path in arb_path(), precision in 0u8..=6) {
        let encoded = encode(&path, precision).unwrap();
        prop_assert!(encoded.bytes().all(|b| (63..=126).contains(&b)));
        prop_assert_eq!(encoded.is_empty(), path.is_empty());
    }

    /// Property: arbitrary bytes never panic and yield at most one error, last
    #[test]
    fn prop_decoder_total(bytes in prop::collection::vec(any::<u8>(), 0..256)) {
        let items: Vec<_> = Decoder::from_bytes(&bytes, 5).collect();
        prop_assert!(items.len() <= bytes.len().div_ceil(2));
        if let Some(pos) = items.iter().position(Result::is_err) {
            prop_assert_eq!(pos, items.len() - 1);
            let err = items[pos].unwrap_err();
            prop_assert!(err.offset() <= bytes.len());
        }
    }

    /// Property: strings over the alphabet either decode or fail cleanly
    #[test]
    fn prop_alphabet_strings(s in "[?-~]{0,64}") {
        match decode(&s, 5) {
            Ok(points) => prop_assert!(points.len() * 2 <= s.len()),
            Err(e) => prop_assert!(e.offset() <= s.len()),
        }
    }

    /// Property: stitching segments then encoding round-trips the whole trip
    #[test]
    fn prop_stitched_trip_roundtrip(a in arb_path(), b in arb_path()) {
        let mut trip = Polyline::new(a);
        trip.append(&Polyline::new(b));
        let encoded = trip.encode(5).unwrap();
        let decoded = Polyline::decode(&encoded, 5).unwrap();
        assert_within(trip.points(), decoded.points(), 5)?;
    }
}
