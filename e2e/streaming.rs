// Streaming behaviour across the public API: readers that trickle bytes or
// get interrupted, writer-backed sinks, restarts between independent streams.

#[path = "../tests/support/encoder.rs"]
mod encoder;

use std::io::{self, Cursor, Read};

use lzwd::io::{decompress_stream, Prefs};
use lzwd::{Decoder, DecoderConfig, LzwReader, Phase, WriteSink};

use encoder::{encode, pseudo_random, sample_text};

/// Yields at most `step` bytes per read and an `Interrupted` error every
/// third call.
struct Trickle<'a> {
    data: &'a [u8],
    step: usize,
    calls: usize,
}

impl Read for Trickle<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.calls += 1;
        if self.calls % 3 == 0 {
            return Err(io::Error::new(io::ErrorKind::Interrupted, "try again"));
        }
        let n = self.step.min(buf.len()).min(self.data.len());
        buf[..n].copy_from_slice(&self.data[..n]);
        self.data = &self.data[n..];
        Ok(n)
    }
}

#[test]
fn reader_survives_trickling_interrupted_source() {
    let data = sample_text(12_000);
    let stream = encode(&data, 1 << 18);
    let source = Trickle {
        data: &stream,
        step: 3,
        calls: 0,
    };
    let mut out = Vec::new();
    LzwReader::new(source, DecoderConfig::default())
        .read_to_end(&mut out)
        .unwrap();
    assert_eq!(out, data);
}

#[test]
fn decompress_stream_retries_interrupted_reads() {
    let config = DecoderConfig::with_dict_bits(10).unwrap();
    let data = pseudo_random(9_000, 5);
    let stream = encode(&data, config.capacity());
    let mut prefs = Prefs::default();
    prefs.set_decoder_config(config);
    prefs.set_chunk_size(13);

    let mut source = Trickle {
        data: &stream,
        step: 5,
        calls: 0,
    };
    let mut out = Vec::new();
    let stats = decompress_stream(&mut source, &mut out, &prefs).unwrap();
    assert_eq!(out, data);
    assert_eq!(stats.compressed_bytes, stream.len() as u64);
    assert!(stats.resets > 0);
}

#[test]
fn write_sink_streams_into_any_writer() {
    let data = sample_text(40_000);
    let stream = encode(&data, 1 << 18);
    let mut decoder = Decoder::new(DecoderConfig::default(), WriteSink::new(Cursor::new(Vec::new())));
    for piece in stream.chunks(4096) {
        decoder.decode_chunk(piece).unwrap();
    }
    let sink = decoder.finish().unwrap();
    assert_eq!(sink.written(), data.len() as u64);
    assert_eq!(sink.into_inner().into_inner(), data);
}

#[test]
fn restart_decodes_back_to_back_streams() {
    let first = sample_text(3_000);
    let second = pseudo_random(2_000, 42);
    let mut decoder = Decoder::new(DecoderConfig::default(), Vec::new());

    decoder.decode_chunk(&encode(&first, 1 << 18)).unwrap();
    decoder.check_end().unwrap();
    decoder.restart();
    assert_eq!(decoder.phase(), Phase::AwaitingFirstCode);
    assert_eq!(decoder.code_width(), 8);
    assert_eq!(decoder.pending_bits(), 0);

    decoder.decode_chunk(&encode(&second, 1 << 18)).unwrap();
    let out = decoder.finish().unwrap();
    assert_eq!(&out[..first.len()], &first[..]);
    assert_eq!(&out[first.len()..], &second[..]);
}
