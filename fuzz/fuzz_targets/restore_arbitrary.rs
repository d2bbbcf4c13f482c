#![no_main]
use libfuzzer_sys::fuzz_target;

use lzwd::{Decoder, DecoderConfig, DictionarySnapshot};

fuzz_target!(|data: &[u8]| {
    // Layout: [table length: u16 LE][serialised table][fixed-width codes].
    if data.len() < 2 {
        return;
    }
    let table_len = usize::from(u16::from_le_bytes([data[0], data[1]])).min(data.len() - 2);
    let (table, stream) = data[2..].split_at(table_len);

    let Ok(snapshot) = DictionarySnapshot::parse(table) else {
        return;
    };
    let config = DecoderConfig::with_dict_bits(16)
        .unwrap()
        .restore_code_width(16)
        .unwrap();
    if let Ok(mut decoder) = Decoder::restore(config, &snapshot, Vec::new()) {
        let _ = decoder.decode_chunk(stream);
        let _ = decoder.check_end();
        let _ = decoder.snapshot();
    }
});
