// Reference LZW encoder for tests.
//
// Produces streams the decoder accepts: MSB-first codes, width 8 for the first
// code after a (re)start, then one bit wider each time the next code to be
// assigned reaches 2^width. When that next code would equal the dictionary
// capacity both sides drop back to the literals instead.
#![allow(dead_code)]

use std::collections::HashMap;

use lzwd::DictionarySnapshot;

/// MSB-first bit packer, zero-padded to a whole byte on finish.
#[derive(Default)]
pub struct BitWriter {
    out: Vec<u8>,
    acc: u64,
    nbits: u32,
}

impl BitWriter {
    pub fn put(&mut self, code: u32, width: u32) {
        assert!(width <= 24 && u64::from(code) < (1u64 << width));
        self.acc = (self.acc << width) | u64::from(code);
        self.nbits += width;
        while self.nbits >= 8 {
            self.nbits -= 8;
            self.out.push((self.acc >> self.nbits) as u8);
        }
        self.acc &= (1u64 << self.nbits) - 1;
    }

    pub fn finish(mut self) -> Vec<u8> {
        if self.nbits > 0 {
            self.out.push((self.acc << (8 - self.nbits)) as u8);
        }
        self.out
    }
}

/// Everything an encoding run did, for tests that check the decoder's view.
pub struct Encoded {
    pub bytes: Vec<u8>,
    pub codes: Vec<u32>,
    pub resets: u64,
}

/// Encode `data` for a decoder whose dictionary holds `capacity` entries.
pub fn encode(data: &[u8], capacity: u32) -> Vec<u8> {
    encode_traced(data, capacity).bytes
}

/// [`encode`], also returning the emitted codes and the number of resets.
pub fn encode_traced(data: &[u8], capacity: u32) -> Encoded {
    let mut writer = BitWriter::default();
    let mut codes = Vec::new();
    let mut resets = 0u64;
    let Some((&first, rest)) = data.split_first() else {
        return Encoded {
            bytes: Vec::new(),
            codes,
            resets,
        };
    };

    let mut table: HashMap<(u32, u8), u32> = HashMap::new();
    let mut width = 8u32;
    let mut emitted = 0u32;
    let mut current = u32::from(first);

    for &byte in rest {
        if let Some(&code) = table.get(&(current, byte)) {
            current = code;
            continue;
        }
        writer.put(current, width);
        codes.push(current);
        emitted += 1;

        let next = 255 + emitted;
        if next == capacity {
            table.clear();
            width = 8;
            emitted = 0;
            resets += 1;
        } else {
            table.insert((current, byte), next);
            if next == 1 << width && width < 24 {
                width += 1;
            }
        }
        current = u32::from(byte);
    }
    writer.put(current, width);
    codes.push(current);
    // The decoder also drops its dictionary when the last code fills it.
    if 255 + emitted + 1 == capacity {
        resets += 1;
    }

    Encoded {
        bytes: writer.finish(),
        codes,
        resets,
    }
}

/// Encode `data` as fixed-width codes over an existing table (greedy longest match).
///
/// Panics if some byte has no root entry in `snapshot`.
pub fn encode_with_table(data: &[u8], snapshot: &DictionarySnapshot, width: u32) -> Vec<u8> {
    let mut roots: HashMap<u8, u32> = HashMap::new();
    let mut children: HashMap<(u32, u8), u32> = HashMap::new();
    for code in 0..snapshot.len() as u32 {
        match snapshot.entry(code) {
            Some((None, byte)) => {
                roots.entry(byte).or_insert(code);
            }
            Some((Some(prefix), byte)) => {
                children.entry((prefix, byte)).or_insert(code);
            }
            None => unreachable!(),
        }
    }

    let mut writer = BitWriter::default();
    let mut iter = data.iter();
    let Some(&first) = iter.next() else {
        return Vec::new();
    };
    let mut current = roots[&first];
    for &byte in iter {
        match children.get(&(current, byte)) {
            Some(&code) => current = code,
            None => {
                writer.put(current, width);
                current = roots[&byte];
            }
        }
    }
    writer.put(current, width);
    writer.finish()
}

/// Deterministic pseudo-random bytes (xorshift32).
pub fn pseudo_random(len: usize, seed: u32) -> Vec<u8> {
    let mut state = seed.max(1);
    (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            (state >> 24) as u8
        })
        .collect()
}

/// Text-like input with plenty of repetition.
pub fn sample_text(len: usize) -> Vec<u8> {
    const WORDS: &[&str] = &[
        "stream", "decoder", "prefix", "chain", "dictionary", "code", "width", "reset", "the",
        "of", "and", "a", "\n",
    ];
    let mut out = Vec::with_capacity(len + 16);
    let mut i = 0usize;
    while out.len() < len {
        out.extend_from_slice(WORDS[(i * 7 + i / 3) % WORDS.len()].as_bytes());
        out.push(b' ');
        i += 1;
    }
    out.truncate(len);
    out
}
