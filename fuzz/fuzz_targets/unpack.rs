#![no_main]
use libfuzzer_sys::fuzz_target;

// Erstes Byte: Länge des Format-Strings, danach Format und Eingabedaten.
fuzz_target!(|data: &[u8]| {
    let Some((&len, rest)) = data.split_first() else {
        return;
    };
    let len = usize::from(len).min(rest.len());
    let (format, input) = rest.split_at(len);
    let Ok(format) = std::str::from_utf8(format) else {
        return;
    };
    let opts = binpack::PackOptions::lenient();
    if let Ok(result) = binpack::unpack_with_options(format, input, 0, &opts) {
        assert!(result.next_offset <= input.len());
    }
});
