use std::fs;

use log::{error, info, warn};

use super::codec::Codec;
use super::compress::{read_stdin, remove_input, report, write_output};
use crate::error::{Error, Result};
use crate::tools::cli::Opts;

/// Decompress the inputs defined in opts (Opts).
pub fn decompress(opts: &Opts) -> Result<()> {
    if opts.files.is_empty() {
        let data = read_stdin()?;
        let plain = opts.codec.decode(&data)?;
        return write_output(opts, "", &plain);
    }

    for fname in &opts.files {
        let (codec, out_name) = output_name(opts.codec, fname);
        info!("Decompressing {} with {}", fname, codec);
        let data = fs::read(fname)?;
        let plain = codec.decode(&data).map_err(|e| {
            error!("{} is not a valid {} file: {}", fname, codec, e);
            e
        })?;
        write_output(opts, &out_name, &plain)?;
        remove_input(opts, fname)?;
    }
    Ok(())
}

/// Check the inputs without writing anything. Compressed files (known extension) are
/// decoded; anything else is encoded and decoded again in memory and compared.
pub fn test(opts: &Opts) -> Result<()> {
    if opts.files.is_empty() {
        let data = read_stdin()?;
        return round_trip(opts.codec, "stdin", &data);
    }

    for fname in &opts.files {
        let data = fs::read(fname)?;
        match Codec::from_extension(fname) {
            Some(codec) => {
                let plain = codec.decode(&data)?;
                info!("{}: ok, {} bytes decoded", fname, plain.len());
            }
            None => round_trip(opts.codec, fname, &data)?,
        }
    }
    Ok(())
}

fn round_trip(codec: Codec, name: &str, data: &[u8]) -> Result<()> {
    let packed = codec.encode(data)?;
    report(name, data.len(), packed.len());
    if codec.decode(&packed)? != data {
        error!("{}: {} round trip changed the data", name, codec);
        return Err(Error::MalformedInput(format!(
            "{} round trip of {} did not reproduce the input",
            codec, name
        )));
    }
    info!("{}: ok", name);
    Ok(())
}

/// Pick the codec and output name for a compressed file. A known extension is stripped
/// and wins over the codec from the command line.
fn output_name(default: Codec, fname: &str) -> (Codec, String) {
    match Codec::from_extension(fname) {
        Some(codec) => {
            let stem = &fname[..fname.len() - codec.extension().len() - 1];
            (codec, stem.to_string())
        }
        None => {
            warn!(
                "{} has no .rle or .huf extension, decoding as {} into {}.out",
                fname, default, fname
            );
            (default, format!("{}.out", fname))
        }
    }
}
