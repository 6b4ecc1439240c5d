#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(src) = std::str::from_utf8(data) {
        if let Ok(format) = binpack::Format::parse(src) {
            // kanonische Schreibweise muss dasselbe Programm ergeben
            let again = binpack::Format::parse(&format.to_string()).expect("canonical format reparses");
            assert_eq!(format, again);
            let _ = format.predict_size();
        }
    }
});
