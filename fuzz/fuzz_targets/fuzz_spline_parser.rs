#![no_main]

use libfuzzer_sys::fuzz_target;
use zone_spline::{parse_zone_spline, write_zone_spline, PointDecodePolicy, SplineXmlOptions};

fuzz_target!(|data: &[u8]| {
    let Ok(xml) = std::str::from_utf8(data) else {
        return;
    };

    for decode_policy in [PointDecodePolicy::Strict, PointDecodePolicy::Lenient] {
        let options = SplineXmlOptions {
            decode_policy,
            ..SplineXmlOptions::default()
        };
        if let Ok(spline) = parse_zone_spline(xml, &options) {
            let written = write_zone_spline(&spline, "zone", &options).expect("Export darf nicht fehlschlagen");
            let reparsed = parse_zone_spline(&written, &options).expect("Re-Parsing darf nicht fehlschlagen");
            assert_eq!(reparsed, spline);
        }
    }
});
