#![no_main]
use libfuzzer_sys::fuzz_target;

// Dekodierte Werte müssen sich verlustfrei neu packen lassen.
fuzz_target!(|data: &[u8]| {
    let Some((&len, rest)) = data.split_first() else {
        return;
    };
    let len = usize::from(len).min(rest.len());
    let (format, input) = rest.split_at(len);
    let Ok(format) = std::str::from_utf8(format) else {
        return;
    };
    let Ok(format) = binpack::Format::parse(format) else {
        return;
    };
    let Ok(first) = format.unpack(input, 0) else {
        return;
    };
    let bytes = format.pack(&first.values).expect("decoded values pack again");
    assert_eq!(format.compute_size(&first.values).ok(), Some(bytes.len()));
    let second = format.unpack(&bytes, 0).expect("packed bytes unpack again");
    assert_eq!(second.next_offset, bytes.len());
    assert_eq!(
        binpack::json::values_to_json(&first.values),
        binpack::json::values_to_json(&second.values)
    );
});
