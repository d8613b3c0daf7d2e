use clap::Parser;
use log::info;
use std::{fmt::Display, fmt::Formatter};

use crate::compression::codec::Codec;

/// Verbosity of user information
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Errors,
    Warnings,
    Info,
    Debug,
    Trace,
}

impl Verbosity {
    pub fn level_filter(&self) -> log::LevelFilter {
        match self {
            Verbosity::Quiet => log::LevelFilter::Off,
            Verbosity::Errors => log::LevelFilter::Error,
            Verbosity::Warnings => log::LevelFilter::Warn,
            Verbosity::Info => log::LevelFilter::Info,
            Verbosity::Debug => log::LevelFilter::Debug,
            Verbosity::Trace => log::LevelFilter::Trace,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Zip, Unzip, Test
pub enum Mode {
    Zip,
    Unzip,
    Test,
}
impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Define the two output channels
pub enum Output {
    File,
    Stdout,
}
impl Display for Output {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug)]
pub struct Opts {
    /// Codec used to compress, and to decompress files without a known extension
    pub codec: Codec,
    /// Vec of names of files to read for input
    pub files: Vec<String>,
    /// Silently overwrite existing files with the same name
    pub force_overwrite: bool,
    /// Don't remove input files after processing
    pub keep_input_files: bool,
    /// Compress/Decompress/Test
    pub op_mode: Mode,
    /// Location where output is sent
    pub output: Output,
    /// Verbosity of user information
    pub verbose: Verbosity,
}

impl Opts {
    pub fn new() -> Self {
        Self {
            codec: Codec::Huffman,
            files: vec![],
            force_overwrite: false,
            keep_input_files: false,
            op_mode: Mode::Zip,
            output: Output::File,
            verbose: Verbosity::Warnings,
        }
    }
}

impl Default for Opts {
    fn default() -> Self {
        Self::new()
    }
}

/// Command Line Interpretation - uses external CLAP crate.
#[derive(Parser, Debug)]
#[clap(
    version,
    about = "A run-length and Huffman byte stream compressor",
    long_about = "
    Compresses files with either run-length encoding or a static Huffman code. Compressed
    files get a .rle or .huf extension, which decompression uses to pick the codec again.

    With no file names, reads standard input and writes standard output."
)]
pub struct Args {
    /// Files to process
    #[clap()]
    files: Vec<String>,

    /// Perform compression on the input files (default)
    #[clap(short = 'z', long = "compress")]
    compress: bool,

    /// Perform decompression on the input files
    #[clap(short = 'd', long = "decompress")]
    decompress: bool,

    /// Test compressed file integrity, or round trip an uncompressed file in memory
    #[clap(short = 't', long = "test")]
    test: bool,

    /// Keep input files
    #[clap(short = 'k', long = "keep")]
    keep: bool,

    /// Force overwriting output files
    #[clap(short = 'f', long = "force")]
    force: bool,

    /// Send output to the terminal
    #[clap(short = 'c', long = "stdout")]
    stdout: bool,

    /// Codec to compress with
    #[clap(long, value_enum, default_value_t = Codec::Huffman)]
    codec: Codec,

    /// Suppress all messages
    #[clap(short = 'q', long = "quiet")]
    quiet: bool,

    /// Sets verbosity. -v0 is silent, -v5 is chatty
    #[clap(short = 'v', long = "verbose", default_value_t = 2)]
    v: u8,
}

/// Parse the process arguments and set the log level from them.
pub fn opts_init() -> Opts {
    let opts = opts_from_args(Args::parse());
    log::set_max_level(opts.verbose.level_filter());

    // Below we report initialization status to the user
    info!("---- Initialization Start ----");
    info!("Verbosity set to {}", log::max_level());
    info!("Operational mode set to {}", opts.op_mode);
    info!("Codec set to {}", opts.codec);
    if opts.files.is_empty() {
        info!("Reading from stdin, writing to stdout");
    }
    if opts.force_overwrite {
        info!("Forcing file overwriting")
    };
    if opts.keep_input_files {
        info!("Keeping input files")
    };
    info!("---- Initialization End ----\n");
    opts
}

/// Put command line information from CLAP into our internal structure.
pub fn opts_from_args(args: Args) -> Opts {
    let mut opts = Opts::new();
    opts.files = args.files;
    opts.codec = args.codec;

    // Later flags win, in the order compress, decompress, test.
    if args.compress {
        opts.op_mode = Mode::Zip
    };
    if args.decompress {
        opts.op_mode = Mode::Unzip
    };
    if args.test {
        opts.op_mode = Mode::Test
    };

    opts.force_overwrite = args.force;
    opts.keep_input_files = args.keep;

    // Without files everything goes through stdin and stdout.
    if args.stdout || opts.files.is_empty() {
        opts.output = Output::Stdout
    };

    opts.verbose = match (args.quiet, args.v) {
        (true, _) | (_, 0) => Verbosity::Quiet,
        (_, 1) => Verbosity::Errors,
        (_, 2) => Verbosity::Warnings,
        (_, 3) => Verbosity::Info,
        (_, 4) => Verbosity::Debug,
        _ => Verbosity::Trace,
    };
    opts
}

#[cfg(test)]
mod test {
    use super::*;

    fn parse(args: &[&str]) -> Opts {
        let args = Args::try_parse_from(std::iter::once("hufrle").chain(args.iter().copied()))
            .expect("arguments should parse");
        opts_from_args(args)
    }

    #[test]
    fn defaults_test() {
        let opts = parse(&["notes.txt"]);
        assert_eq!(opts.op_mode, Mode::Zip);
        assert_eq!(opts.codec, Codec::Huffman);
        assert_eq!(opts.output, Output::File);
        assert_eq!(opts.verbose, Verbosity::Warnings);
        assert_eq!(opts.files, vec!["notes.txt".to_string()]);
        assert!(!opts.keep_input_files);
        assert!(!opts.force_overwrite);
    }

    #[test]
    fn flags_test() {
        let opts = parse(&["-d", "-k", "-f", "--codec", "rle", "-v", "5", "a.rle", "b.rle"]);
        assert_eq!(opts.op_mode, Mode::Unzip);
        assert_eq!(opts.codec, Codec::Rle);
        assert_eq!(opts.verbose, Verbosity::Trace);
        assert!(opts.keep_input_files);
        assert!(opts.force_overwrite);
        assert_eq!(opts.files.len(), 2);
    }

    #[test]
    fn stdin_test() {
        let opts = parse(&["-t"]);
        assert_eq!(opts.op_mode, Mode::Test);
        assert_eq!(opts.output, Output::Stdout);
        assert!(opts.files.is_empty());
    }

    #[test]
    fn quiet_test() {
        let opts = parse(&["-q", "-v", "4", "x"]);
        assert_eq!(opts.verbose, Verbosity::Quiet);
        assert_eq!(opts.verbose.level_filter(), log::LevelFilter::Off);
    }

    #[test]
    fn every_level_compiled_in_test() {
        // -v5 has to reach trace! calls in release builds too.
        assert_eq!(log::STATIC_MAX_LEVEL, log::LevelFilter::Trace);
        assert_eq!(
            parse(&["-v", "5", "x"]).verbose.level_filter(),
            log::LevelFilter::Trace
        );
    }

    #[test]
    fn bad_codec_test() {
        assert!(Args::try_parse_from(["hufrle", "--codec", "lzw", "x"]).is_err());
    }
}
