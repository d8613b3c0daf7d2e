use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use log::{error, info};

use crate::error::{Error, Result};
use crate::tools::cli::{Opts, Output};

/*
    Each input is read whole, coded in memory with the codec chosen in Opts, and written
    out in one go. With no file names we work from stdin to stdout.
*/

/// Compress the inputs defined in opts <Opts>.
pub fn compress(opts: &Opts) -> Result<()> {
    if opts.files.is_empty() {
        let data = read_stdin()?;
        let packed = opts.codec.encode(&data)?;
        report("stdin", data.len(), packed.len());
        return write_output(opts, "", &packed);
    }

    for fname in &opts.files {
        info!("Compressing {} with {}", fname, opts.codec);
        let data = fs::read(fname)?;
        let packed = opts.codec.encode(&data)?;
        report(fname, data.len(), packed.len());

        let out_name = format!("{}.{}", fname, opts.codec.extension());
        write_output(opts, &out_name, &packed)?;
        remove_input(opts, fname)?;
    }
    Ok(())
}

/// Read all of stdin.
pub(crate) fn read_stdin() -> Result<Vec<u8>> {
    let mut data = Vec::new();
    io::stdin().lock().read_to_end(&mut data)?;
    Ok(data)
}

/// Write to the named file, or to stdout when opts ask for it. Existing files are only
/// replaced when forced.
pub(crate) fn write_output(opts: &Opts, fname: &str, data: &[u8]) -> Result<()> {
    if opts.output == Output::Stdout {
        let mut out = io::stdout().lock();
        out.write_all(data)?;
        out.flush()?;
        return Ok(());
    }
    if !opts.force_overwrite && Path::new(fname).exists() {
        error!("Output file {} already exists. Use -f to overwrite it.", fname);
        return Err(Error::Io(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("{} already exists", fname),
        )));
    }
    fs::write(fname, data)?;
    info!("Wrote {} bytes to {}", data.len(), fname);
    Ok(())
}

/// Remove an input file after it was processed, unless the user wants to keep it or the
/// result went to stdout.
pub(crate) fn remove_input(opts: &Opts, fname: &str) -> Result<()> {
    if !opts.keep_input_files && opts.output == Output::File {
        fs::remove_file(fname)?;
        info!("Removed {}", fname);
    }
    Ok(())
}

/// Log how much the data shrank (or grew).
pub(crate) fn report(name: &str, original: usize, packed: usize) {
    if original == 0 {
        info!("{}: empty input, {} bytes out", name, packed);
    } else {
        info!(
            "{}: {} -> {} bytes, {:.1}% of the original",
            name,
            original,
            packed,
            packed as f64 * 100.0 / original as f64
        );
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::compression::codec::Codec;

    fn scratch_dir(name: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!("hufrle-{}-{}", name, std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn compress_file_test() {
        let dir = scratch_dir("compress");
        let input = dir.join("data.txt");
        fs::write(&input, "AAABBCCCC").unwrap();

        let mut opts = Opts::new();
        opts.files = vec![input.to_string_lossy().to_string()];
        opts.keep_input_files = true;
        compress(&opts).unwrap();

        let packed = fs::read(dir.join("data.txt.huf")).unwrap();
        assert_eq!(Codec::Huffman.decode(&packed).unwrap(), b"AAABBCCCC");
        assert!(input.exists());

        // A second run refuses to overwrite, unless forced.
        assert!(matches!(compress(&opts), Err(Error::Io(_))));
        opts.force_overwrite = true;
        opts.keep_input_files = false;
        compress(&opts).unwrap();
        assert!(!input.exists());

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn compress_rle_test() {
        let dir = scratch_dir("compress-rle");
        let input = dir.join("runs.bin");
        fs::write(&input, vec![9_u8; 300]).unwrap();

        let mut opts = Opts::new();
        opts.codec = Codec::Rle;
        opts.files = vec![input.to_string_lossy().to_string()];
        compress(&opts).unwrap();

        assert_eq!(fs::read(dir.join("runs.bin.rle")).unwrap(), vec![255, 9, 45, 9]);
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn missing_file_test() {
        let mut opts = Opts::new();
        opts.files = vec!["/nonexistent/hufrle/input".to_string()];
        assert!(matches!(compress(&opts), Err(Error::Io(_))));
    }
}
