// Debug tool: print an encoded symbol and the penalty of every mask
//
// Usage: debug_matrix <data> [L|M|Q|H]
use std::env;
use std::process::ExitCode;

use styled_qr::encoder::penalty;
use styled_qr::{ECLevel, MaskPattern, QrDecoder, QrEncoder, Segment, encode};

fn parse_level(arg: Option<&str>) -> Option<ECLevel> {
    match arg.map(|s| s.to_ascii_uppercase()).as_deref() {
        None | Some("M") => Some(ECLevel::M),
        Some("L") => Some(ECLevel::L),
        Some("Q") => Some(ECLevel::Q),
        Some("H") => Some(ECLevel::H),
        Some(_) => None,
    }
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().skip(1).collect();
    let Some(data) = args.first() else {
        eprintln!("usage: debug_matrix <data> [L|M|Q|H]");
        return ExitCode::FAILURE;
    };
    let Some(ec_level) = parse_level(args.get(1).map(String::as_str)) else {
        eprintln!("unknown error correction level {:?}", args[1]);
        return ExitCode::FAILURE;
    };

    let qr = match encode(data, ec_level) {
        Ok(qr) => qr,
        Err(err) => {
            eprintln!("encode failed: {err}");
            return ExitCode::FAILURE;
        }
    };

    println!(
        "version {} ({}x{}), EC {:?}, mode {:?}, mask {}",
        qr.version().number(),
        qr.size(),
        qr.size(),
        qr.ec_level(),
        qr.mode(),
        qr.mask().bits()
    );
    println!("{qr}");

    println!("mask  runs  blocks  finder  balance  total");
    for mask in MaskPattern::ALL {
        let bits = mask.bits();
        let forced = QrEncoder::new(ec_level)
            .add_segment(Segment::auto(data))
            .with_version(qr.version())
            .with_mask(mask)
            .encode();
        match forced {
            Ok(candidate) => {
                let p = penalty::evaluate(candidate.modules());
                let marker = if mask == qr.mask() { " *" } else { "" };
                println!(
                    "{bits:>4}  {:>4}  {:>6}  {:>6}  {:>7}  {:>5}{marker}",
                    p.runs,
                    p.blocks,
                    p.finder_like,
                    p.balance,
                    p.total()
                );
            }
            Err(err) => println!("{bits:>4}  {err}"),
        }
    }

    match QrDecoder::decode_matrix(&qr.to_bit_matrix()) {
        Ok(decoded) => println!("\nround trip: {:?}", decoded.content),
        Err(err) => println!("\nround trip failed: {err}"),
    }
    ExitCode::SUCCESS
}
