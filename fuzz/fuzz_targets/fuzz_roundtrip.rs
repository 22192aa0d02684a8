#![no_main]

use libfuzzer_sys::fuzz_target;
use trackline::{decode, encode, Coordinate, Encoder};

fuzz_target!(|data: &[u8]| {
    // Need at least 1 byte for precision + one coordinate
    if data.len() < 9 {
        return;
    }

    // First byte determines precision (0-6)
    let precision = data[0] % 7;

    // Remaining bytes are interpreted as (lat: i32, lng: i32) micro-degree tuples
    let coordinates: Vec<Coordinate> = data[1..]
        .chunks_exact(8)
        .map(|chunk| {
            let lat = i32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
            let lng = i32::from_le_bytes([chunk[4], chunk[5], chunk[6], chunk[7]]);
            // Fold into +-90 / +-180 degrees
            Coordinate::new(
                f64::from(lat % 90_000_000) / 1e6,
                f64::from(lng % 180_000_000) / 1e6,
            )
        })
        .collect();

    let encoded = encode(&coordinates, precision).expect("in-range coordinates must encode");

    // Property 1: round trip within half a grid step
    let decoded = decode(&encoded, precision).expect("encoder output must decode");
    assert_eq!(decoded.len(), coordinates.len(), "length mismatch");
    let tol = 0.5 * 10f64.powi(-i32::from(precision)) + 1e-9;
    for (o, d) in coordinates.iter().zip(decoded.iter()) {
        assert!((o.lat - d.lat).abs() <= tol, "lat {} decoded as {}", o.lat, d.lat);
        assert!((o.lng - d.lng).abs() <= tol, "lng {} decoded as {}", o.lng, d.lng);
    }

    // Property 2: appending one at a time equals batch encoding
    let mut enc = Encoder::new(precision);
    enc.extend(coordinates.iter().copied()).expect("append must succeed");
    assert_eq!(enc.as_str(), encoded, "streaming encode mismatch");
    assert_eq!(enc.count(), coordinates.len(), "count mismatch");
});
