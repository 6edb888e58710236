#![no_main]

use libfuzzer_sys::fuzz_target;
use lotname::{NameCodec, Scheme};

fuzz_target!(|data: &[u8]| {
    if let Ok(name) = std::str::from_utf8(data) {
        let codec = NameCodec::default();
        // Anything accepted must render back to a name that parses identically
        if let Some(parsed) = codec.parse(name) {
            if parsed.scheme != Scheme::Bare {
                let rendered =
                    codec.render(&parsed.lot_id, parsed.position, parsed.scheme, &parsed.extension);
                assert_eq!(codec.parse(&rendered), Some(parsed));
            }
        }
    }
});
