#![no_main]
use libfuzzer_sys::fuzz_target;

use lzwd::{Decoder, DecoderConfig, LzwError};

fn decode_bytewise(data: &[u8], config: DecoderConfig) -> (Vec<u8>, Result<(), LzwError>) {
    let mut decoder = Decoder::new(config, Vec::new());
    for byte in data.chunks(1) {
        if let Err(err) = decoder.decode_chunk(byte) {
            return (decoder.into_sink(), Err(err));
        }
    }
    let result = decoder.check_end();
    (decoder.into_sink(), result)
}

fuzz_target!(|data: &[u8]| {
    // First byte picks the dictionary size so small capacities (and their
    // resets) are reached quickly.
    let Some((&selector, stream)) = data.split_first() else {
        return;
    };
    let bits = 9 + u32::from(selector % 16);
    let config = DecoderConfig::with_dict_bits(bits)
        .unwrap()
        .strict(selector & 0x80 != 0);

    let mut whole = Decoder::new(config, Vec::new());
    let whole_result = whole.decode_chunk(stream).and_then(|_| whole.check_end());
    let whole_out = whole.into_sink();

    // Chunking never changes output or outcome.
    let (bytewise_out, bytewise_result) = decode_bytewise(stream, config);
    assert_eq!(whole_out, bytewise_out);
    assert_eq!(whole_result, bytewise_result);
});
