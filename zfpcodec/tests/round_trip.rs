#![allow(missing_docs)]

use zfpcodec::{
    CompressionMode, ZfpCodec, ZfpError, ZfpMode, ZfpParameters, compress, decompress,
};

const SHAPES: [&[usize]; 4] = [&[100], &[10, 12], &[5, 6, 7], &[3, 4, 5, 6]];

fn smooth(num_elements: usize) -> Vec<f32> {
    (0..num_elements)
        .map(|i| {
            let x = i as f32 * 0.05;
            x.sin() * 10.0 + x.cos() * 0.5 + 2.0
        })
        .collect()
}

fn num_elements(shape: &[usize]) -> usize {
    shape.iter().product()
}

fn max_abs_error(a: &[f32], b: &[f32]) -> f32 {
    a.iter()
        .zip(b)
        .map(|(a, b)| (a - b).abs())
        .fold(0.0, f32::max)
}

#[test]
#[cfg_attr(miri, ignore)]
fn round_trip_fixed_accuracy() {
    for shape in SHAPES {
        for tolerance in [1e-1, 1e-2, 1e-3] {
            let input = smooth(num_elements(shape));
            let parameters = ZfpParameters::default().with_tolerance(tolerance);
            let compressed =
                compress(&input, shape, CompressionMode::FixedAccuracy, &parameters).unwrap();
            let mut out = vec![0.0f32; input.len()];
            decompress(
                &compressed,
                &mut out,
                shape,
                CompressionMode::FixedAccuracy,
                &parameters,
            )
            .unwrap();
            let error = max_abs_error(&input, &out);
            assert!(
                f64::from(error) <= tolerance,
                "shape {shape:?} tolerance {tolerance} error {error}"
            );
        }
    }
}

#[test]
#[cfg_attr(miri, ignore)]
fn round_trip_fixed_precision() {
    for shape in SHAPES {
        let input = smooth(num_elements(shape));
        let parameters = ZfpParameters::default().with_precision(20);
        let compressed =
            compress(&input, shape, CompressionMode::FixedPrecision, &parameters).unwrap();
        let mut out = vec![0.0f32; input.len()];
        decompress(
            &compressed,
            &mut out,
            shape,
            CompressionMode::FixedPrecision,
            &parameters,
        )
        .unwrap();
        assert!(max_abs_error(&input, &out) <= 0.1, "shape {shape:?}");

        let mut again = vec![0.0f32; input.len()];
        decompress(
            &compressed,
            &mut again,
            shape,
            CompressionMode::FixedPrecision,
            &parameters,
        )
        .unwrap();
        assert_eq!(out, again);
    }
}

#[test]
#[cfg_attr(miri, ignore)]
fn round_trip_fixed_rate() {
    for shape in SHAPES {
        let input = smooth(num_elements(shape));
        let parameters = ZfpParameters::default();
        let compressed =
            compress(&input, shape, CompressionMode::FixedRate, &parameters).unwrap();
        let mut out = vec![0.0f32; input.len()];
        decompress(
            &compressed,
            &mut out,
            shape,
            CompressionMode::FixedRate,
            &parameters,
        )
        .unwrap();
        assert!(out.iter().all(|v| v.is_finite()), "shape {shape:?}");

        let mut again = vec![0.0f32; input.len()];
        decompress(
            &compressed,
            &mut again,
            shape,
            CompressionMode::FixedRate,
            &parameters,
        )
        .unwrap();
        assert_eq!(out, again);
    }
}

#[test]
#[cfg_attr(miri, ignore)]
fn round_trip_reversible() {
    let codec = ZfpCodec::new_reversible();
    let input = smooth(120);
    let encoded = codec.encode(&input, &[4, 5, 6]).unwrap();
    assert_eq!(codec.decode::<f32>(&encoded, &[4, 5, 6]).unwrap(), input);

    let input: Vec<i32> = (0..64).map(|i| i * i - 1000).collect();
    let encoded = codec.encode(&input, &[8, 8]).unwrap();
    assert_eq!(codec.decode::<i32>(&encoded, &[8, 8]).unwrap(), input);

    let input: Vec<i64> = (0..27).map(|i| i64::from(i) << 40).collect();
    let encoded = codec.encode(&input, &[3, 3, 3]).unwrap();
    assert_eq!(codec.decode::<i64>(&encoded, &[3, 3, 3]).unwrap(), input);
}

#[test]
#[cfg_attr(miri, ignore)]
fn round_trip_2x3_fixed_accuracy() {
    let input = [1.0f32, 2.0, 3.0, 4.0, 5.0, 6.0];
    let parameters = ZfpParameters::default().with_tolerance(0.001);
    let compressed =
        compress(&input, &[2, 3], CompressionMode::FixedAccuracy, &parameters).unwrap();
    let mut out = [0.0f32; 6];
    decompress(
        &compressed,
        &mut out,
        &[2, 3],
        CompressionMode::FixedAccuracy,
        &parameters,
    )
    .unwrap();
    for (a, b) in input.iter().zip(&out) {
        assert!((a - b).abs() <= 0.001, "{a} decoded as {b}");
    }
}

#[test]
#[cfg_attr(miri, ignore)]
fn compress_is_deterministic() {
    for mode in [
        CompressionMode::FixedRate,
        CompressionMode::FixedPrecision,
        CompressionMode::FixedAccuracy,
    ] {
        for shape in SHAPES {
            let input = smooth(num_elements(shape));
            let parameters = ZfpParameters::default();
            let first = compress(&input, shape, mode, &parameters).unwrap();
            let second = compress(&input, shape, mode, &parameters).unwrap();
            assert_eq!(first, second, "{mode} {shape:?}");
        }
    }
}

#[test]
#[cfg_attr(miri, ignore)]
fn fixed_rate_size_is_monotonic() {
    let shape = [16, 16, 16];
    let input = smooth(num_elements(&shape));
    let mut previous = 0;
    for rate in [1.0, 2.0, 4.0, 8.0, 16.0, 32.0] {
        let parameters = ZfpParameters::default().with_rate(rate);
        let size = compress(&input, &shape, CompressionMode::FixedRate, &parameters)
            .unwrap()
            .len();
        assert!(size >= previous, "rate {rate}: {size} < {previous}");
        previous = size;
    }
}

#[test]
#[cfg_attr(miri, ignore)]
fn encoded_size_bound() {
    for shape in SHAPES {
        let input = smooth(num_elements(shape));
        for codec in [
            ZfpCodec::new_fixed_rate(12.0),
            ZfpCodec::new_fixed_precision(12),
            ZfpCodec::new_fixed_accuracy(1e-4),
            ZfpCodec::new_reversible().with_write_header(true),
        ] {
            let encoded = codec.encode(&input, shape).unwrap();
            assert!(encoded.len() <= codec.encoded_size_bound::<f32>(shape).unwrap());
        }
    }
}

#[test]
#[cfg_attr(miri, ignore)]
fn rank_dispatch_changes_encoding() {
    let shape = [4, 4, 4, 4];
    let input = smooth(num_elements(&shape));
    let codec = ZfpCodec::new_fixed_accuracy(1e-3);

    let encoded_4d = codec.encode(&input, &shape).unwrap();
    let encoded_1d = codec.encode(&input, &[input.len()]).unwrap();
    assert_ne!(encoded_4d, encoded_1d);

    let decoded_4d: Vec<f32> = codec.decode(&encoded_4d, &shape).unwrap();
    let decoded_1d: Vec<f32> = codec.decode(&encoded_1d, &[input.len()]).unwrap();
    assert!(max_abs_error(&input, &decoded_4d) <= 1e-3);
    assert!(max_abs_error(&input, &decoded_1d) <= 1e-3);
}

#[test]
#[cfg_attr(miri, ignore)]
fn unsupported_dimensionality_is_flattened() {
    let codec = ZfpCodec::new_fixed_precision(16);
    let shape = [2, 3, 2, 2, 3];
    let input = smooth(num_elements(&shape));
    let encoded_5d = codec.encode(&input, &shape).unwrap();
    let encoded_1d = codec.encode(&input, &[input.len()]).unwrap();
    assert_eq!(encoded_5d, encoded_1d);
    assert_eq!(
        codec.decode::<f32>(&encoded_5d, &shape).unwrap(),
        codec.decode::<f32>(&encoded_1d, &[input.len()]).unwrap()
    );

    let scalar = [42.0f32];
    let encoded_0d = codec.encode(&scalar, &[]).unwrap();
    assert_eq!(encoded_0d, codec.encode(&scalar, &[1]).unwrap());
}

#[test]
#[cfg_attr(miri, ignore)]
fn truncated_input_is_decompression_failure() {
    let shape = [32, 32];
    let input = smooth(num_elements(&shape));
    let parameters = ZfpParameters::default();
    let compressed = compress(&input, &shape, CompressionMode::FixedRate, &parameters).unwrap();
    let truncated = &compressed[..compressed.len() / 2];

    let mut out = vec![0.0f32; input.len()];
    assert!(matches!(
        decompress(
            truncated,
            &mut out,
            &shape,
            CompressionMode::FixedRate,
            &parameters
        ),
        Err(ZfpError::DecompressionFailure)
    ));
}

#[test]
#[cfg_attr(miri, ignore)]
fn mutated_input_never_reads_past_input() {
    let shape = [32, 32];
    let input = smooth(num_elements(&shape));
    let mut state = 0x2545_f491_4f6c_dd1d_u64;
    let mut next = move || {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        state
    };

    for mode in [CompressionMode::FixedRate, CompressionMode::FixedAccuracy] {
        let parameters = ZfpParameters::default();
        let compressed = compress(&input, &shape, mode, &parameters).unwrap();
        for _ in 0..64 {
            let mut mutated = compressed.clone();
            for _ in 0..8 {
                let index = usize::try_from(next() % mutated.len() as u64).unwrap();
                mutated[index] ^= u8::try_from(next() % 255 + 1).unwrap();
            }
            let mut out = vec![0.0f32; input.len()];
            let result = decompress(&mutated, &mut out, &shape, mode, &parameters);
            assert!(
                matches!(result, Ok(()) | Err(ZfpError::DecompressionFailure)),
                "{mode}: {result:?}"
            );
        }

        // Clearing the stream makes every block empty, so decoding ends early
        let cleared = vec![0u8; compressed.len()];
        let mut out = vec![1.0f32; input.len()];
        if mode == CompressionMode::FixedAccuracy {
            decompress(&cleared, &mut out, &shape, mode, &parameters).unwrap();
            assert!(out.iter().all(|&v| v == 0.0));
        }

        // Saturating the stream makes every block as long as possible
        let saturated = vec![0xffu8; compressed.len() / 4];
        let result = decompress(&saturated, &mut out, &shape, mode, &parameters);
        assert!(
            matches!(result, Err(ZfpError::DecompressionFailure)),
            "{mode}: {result:?}"
        );
    }
}

#[test]
#[cfg_attr(miri, ignore)]
fn zero_extent_is_invalid_shape() {
    let parameters = ZfpParameters::default();
    let shapes: [&[usize]; 3] = [&[0], &[3, 0], &[0, 3]];
    for shape in shapes {
        assert!(matches!(
            compress::<f32>(&[], shape, CompressionMode::FixedAccuracy, &parameters),
            Err(ZfpError::InvalidShape(_))
        ));
        let mut out: [f32; 0] = [];
        assert!(matches!(
            decompress(
                &[0u8; 64],
                &mut out,
                shape,
                CompressionMode::FixedAccuracy,
                &parameters
            ),
            Err(ZfpError::InvalidShape(_))
        ));
        let codec = ZfpCodec::new_reversible();
        assert!(matches!(
            codec.decode::<f64>(&[0u8; 64], shape),
            Err(ZfpError::InvalidShape(_))
        ));
        assert!(matches!(
            codec.encoded_size_bound::<f64>(shape),
            Err(ZfpError::InvalidShape(_))
        ));
    }
}

#[test]
#[cfg_attr(miri, ignore)]
fn empty_input_is_decompression_failure() {
    let mut out = vec![0.0f32; 64];
    assert!(matches!(
        decompress(
            &[],
            &mut out,
            &[8, 8],
            CompressionMode::FixedAccuracy,
            &ZfpParameters::default()
        ),
        Err(ZfpError::DecompressionFailure)
    ));
}

#[test]
#[cfg_attr(miri, ignore)]
fn mismatched_number_of_elements() {
    let parameters = ZfpParameters::default();
    assert!(matches!(
        compress(&[0.0f32; 5], &[2, 3], CompressionMode::FixedRate, &parameters),
        Err(ZfpError::InvalidNumberOfElements {
            len: 5,
            expected_len: 6
        })
    ));
    let mut out = [0.0f32; 7];
    assert!(matches!(
        decompress(
            &[0u8; 64],
            &mut out,
            &[2, 3],
            CompressionMode::FixedRate,
            &parameters
        ),
        Err(ZfpError::InvalidNumberOfElements {
            len: 7,
            expected_len: 6
        })
    ));
}

#[test]
#[cfg_attr(miri, ignore)]
fn expert_mode_round_trip() {
    let codec = ZfpCodec::new(ZfpMode::Expert {
        minbits: 1,
        maxbits: 16658,
        maxprec: 24,
        minexp: -20,
    });
    let input = smooth(216);
    let encoded = codec.encode(&input, &[6, 6, 6]).unwrap();
    let decoded: Vec<f32> = codec.decode(&encoded, &[6, 6, 6]).unwrap();
    assert!(max_abs_error(&input, &decoded) <= 1e-3);
}

#[test]
#[cfg_attr(miri, ignore)]
fn expert_mode_invalid_parameters() {
    let codec = ZfpCodec::new_expert(64, 8, 24, -20);
    assert!(matches!(
        codec.encode(&smooth(16), &[16]),
        Err(ZfpError::StreamCreate)
    ));
}
