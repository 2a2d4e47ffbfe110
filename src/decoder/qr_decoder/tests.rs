use super::*;
use crate::encoder::{QrEncoder, Segment, encode};
use crate::models::{ECLevel, MaskPattern, Mode};

/// 1-M, mask 7, numeric "4376471154038", produced by an independent encoder
const GOLDEN: [&str; 21] = [
    "#######.....#.#######",
    "#.....#..#....#.....#",
    "#.###.#...##..#.###.#",
    "#.###.#...#...#.###.#",
    "#.###.#..####.#.###.#",
    "#.....#.#.#...#.....#",
    "#######.#.#.#.#######",
    ".........#...........",
    "#..#.##.######.#.....",
    "###.#..##..#.#.#.##..",
    "#..#.####.##..###...#",
    "..#.#..#....#####....",
    "..#...##.#.#.###.##..",
    "........#.#..####.##.",
    "#######...###.#.####.",
    "#.....#.#.....##....#",
    "#.###.#..##.###..#.##",
    "#.###.#.#.#..####..##",
    "#.###.#..###.###.#..#",
    "#.....#..####..##..#.",
    "#######.###..#.###...",
];

fn golden() -> BitMatrix {
    BitMatrix::from_fn(21, 21, |x, y| GOLDEN[y].as_bytes()[x] == b'#')
}

/// Scale a module grid to pixels with a light quiet zone
fn raster(modules: &BitMatrix, scale: usize, quiet: usize) -> BitMatrix {
    let side = (modules.width() + 2 * quiet) * scale;
    BitMatrix::from_fn(side, side, |x, y| {
        let (mx, my) = (x / scale, y / scale);
        mx >= quiet && my >= quiet && modules.get(mx - quiet, my - quiet)
    })
}

/// Finder centres of a symbol drawn by `raster`
fn finder_centres(size: usize, scale: usize, quiet: usize) -> (Point, Point, Point) {
    let at = |m: f32| (quiet as f32 + m) * scale as f32;
    let far = size as f32 - 3.5;
    (
        Point::new(at(3.5), at(3.5)),
        Point::new(at(far), at(3.5)),
        Point::new(at(3.5), at(far)),
    )
}

#[test]
fn test_golden_matrix_decode() {
    let qr = QrDecoder::decode_matrix(&golden()).unwrap();
    assert_eq!(qr.content, "4376471154038");
    assert_eq!(qr.data, b"4376471154038");
    assert_eq!(qr.version, Version::MIN);
    assert_eq!(qr.error_correction, ECLevel::M);
    assert_eq!(qr.mask_pattern, MaskPattern::Pattern7);
    assert_eq!(qr.modes, vec![Mode::Numeric]);
    assert_eq!(qr.corrected_codewords, 0);
}

#[test]
fn test_encoder_reproduces_golden_matrix() {
    let qr = QrEncoder::new(ECLevel::M)
        .add_segment(Segment::numeric("4376471154038").unwrap())
        .with_mask(MaskPattern::Pattern7)
        .encode()
        .unwrap();
    assert_eq!(qr.to_bit_matrix(), golden());
}

#[test]
fn test_has_finders_correct_golden_matrix() {
    let matrix = golden();
    assert!(orientation::has_finders_correct(&matrix));
    assert!(!orientation::has_finders_correct(&orientation::rotate90(&matrix)));
}

#[test]
fn test_every_orientation_decodes() {
    for (i, grid) in orientation::orientations(&golden()).iter().enumerate() {
        let qr = QrDecoder::decode_matrix(grid).unwrap_or_else(|e| panic!("orientation {i}: {e}"));
        assert_eq!(qr.content, "4376471154038");
    }
}

#[test]
fn test_damaged_codewords_are_corrected() {
    let mut matrix = golden();
    // Codeword 0 occupies rows 20..17 of the two rightmost columns, codeword 1 rows 16..13
    matrix.toggle(20, 20);
    matrix.toggle(19, 15);
    let qr = QrDecoder::decode_matrix(&matrix).unwrap();
    assert_eq!(qr.content, "4376471154038");
    assert_eq!(qr.corrected_codewords, 2);
}

#[test]
fn test_damaged_top_left_format_copy_uses_split_copy() {
    for ec in ECLevel::ALL {
        for mask in MaskPattern::ALL {
            let encoded = QrEncoder::new(ec)
                .add_segment(Segment::auto("HELLO"))
                .with_mask(mask)
                .encode()
                .unwrap();
            let mut matrix = encoded.to_bit_matrix();
            for y in 0..6 {
                matrix.toggle(8, y);
            }
            let qr = QrDecoder::decode_matrix(&matrix)
                .unwrap_or_else(|e| panic!("{ec:?} {mask:?}: {e}"));
            assert_eq!(qr.content, "HELLO");
            assert_eq!(qr.error_correction, ec);
            assert_eq!(qr.mask_pattern, mask);
        }
    }
}

#[test]
fn test_wiped_data_region_fails_after_locating() {
    let func = crate::decoder::function_mask::FunctionMask::new(Version::MIN);
    let mut matrix = golden();
    for y in 0..21 {
        for x in 0..21 {
            if !func.is_function(x, y) {
                matrix.set(x, y, false);
            }
        }
    }
    let err = QrDecoder::decode_matrix(&matrix).unwrap_err();
    assert!(matches!(err, DecodeError::Checksum | DecodeError::Format), "{err:?}");
}

#[test]
fn test_blank_and_malformed_grids() {
    assert_eq!(
        QrDecoder::decode_matrix(&BitMatrix::new(21, 21)).unwrap_err(),
        DecodeError::Format
    );
    assert_eq!(
        QrDecoder::decode_matrix(&BitMatrix::new(22, 22)).unwrap_err(),
        DecodeError::NotFound
    );
    assert_eq!(
        QrDecoder::decode_matrix(&BitMatrix::new(21, 25)).unwrap_err(),
        DecodeError::NotFound
    );
}

#[test]
fn test_round_trip_every_mode() {
    let cases = [
        ("31415926535897932384626", Mode::Numeric),
        ("HELLO WORLD $%*+-./:", Mode::Alphanumeric),
        ("hello, world", Mode::Byte),
        ("grüße ✓", Mode::Byte),
    ];
    for (data, mode) in cases {
        for ec in ECLevel::ALL {
            let encoded = encode(data, ec).unwrap();
            let qr = QrDecoder::decode_matrix(&encoded.to_bit_matrix()).unwrap();
            assert_eq!(qr.content, data);
            assert_eq!(qr.modes, vec![mode]);
            assert_eq!(qr.error_correction, ec);
            assert_eq!(qr.mask_pattern, encoded.mask());
        }
    }
}

#[test]
fn test_round_trip_kanji_bytes() {
    // "点茗" in Shift JIS
    let sjis = [0x93, 0x5F, 0xE4, 0xAA];
    let encoded = QrEncoder::new(ECLevel::Q)
        .add_segment(Segment::kanji(&sjis).unwrap())
        .encode()
        .unwrap();
    let qr = QrDecoder::decode_matrix(&encoded.to_bit_matrix()).unwrap();
    assert_eq!(qr.data, sjis);
    assert_eq!(qr.modes, vec![Mode::Kanji]);
}

#[test]
fn test_round_trip_large_multi_block_symbol() {
    let data: String = (0..600).map(|i| char::from(b'a' + (i % 26) as u8)).collect();
    let encoded = encode(&data, ECLevel::H).unwrap();
    assert!(encoded.version().number() >= 7);
    let qr = QrDecoder::decode_matrix(&encoded.to_bit_matrix()).unwrap();
    assert_eq!(qr.content, data);
    assert_eq!(qr.version, encoded.version());
}

#[test]
fn test_decode_from_finders_on_raster() {
    let encoded = encode("HELLO WORLD", ECLevel::Q).unwrap();
    let (scale, quiet) = (4, 4);
    let binary = raster(&encoded.to_bit_matrix(), scale, quiet);
    let (tl, tr, bl) = finder_centres(encoded.size(), scale, quiet);

    let qr = QrDecoder::decode_from_finders(&binary, &tl, &tr, &bl, scale as f32).unwrap();
    assert_eq!(qr.content, "HELLO WORLD");
    assert!((qr.position[0].x - 16.0).abs() < 0.5);
    assert!((qr.position[2].x - 100.0).abs() < 0.5);
}

#[test]
fn test_decode_from_finders_with_alignment() {
    let encoded = encode("alignment patterns steer the sampling grid", ECLevel::H).unwrap();
    assert!(encoded.version().number() >= 2);
    let (scale, quiet) = (3, 2);
    let binary = raster(&encoded.to_bit_matrix(), scale, quiet);
    let (tl, tr, bl) = finder_centres(encoded.size(), scale, quiet);

    let qr = QrDecoder::decode_from_finders(&binary, &tl, &tr, &bl, scale as f32).unwrap();
    assert_eq!(qr.content, "alignment patterns steer the sampling grid");
}

#[test]
fn test_decode_from_finders_without_symbol() {
    let binary = BitMatrix::new(100, 100);
    let err = QrDecoder::decode_from_finders(
        &binary,
        &Point::new(14.0, 14.0),
        &Point::new(70.0, 14.0),
        &Point::new(14.0, 70.0),
        4.0,
    )
    .unwrap_err();
    assert_eq!(err, DecodeError::Format);
}
