use aztec_bits::tools::{load_bytes, load_symbols, parse_bit_string, parse_hex};
use aztec_bits::{AztecError, AztecStructure, BitView, CodewordUnstuffer, Unstuffer, WordGeometry};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

type CliError = Box<dyn std::error::Error>;
type CliResult<T> = Result<T, CliError>;

/// Exit status for an unstuffed reserved codeword inside the message region.
const EXIT_MALFORMED_SYMBOL: u8 = 3;
/// Exit status for input, configuration and range failures.
const EXIT_FAILURE: u8 = 1;

#[derive(Parser)]
#[command(name = "aztecbits", version, about = "Aztec codeword unstuffing tools")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Strip stuffing bits from one symbol's codewords and print the bitstream
    Unstuff(UnstuffArgs),
    /// Print word width and reserved/stuffing values
    Geometry {
        #[command(flatten)]
        width: WidthArgs,
    },
    /// Unstuff every symbol listed in a fixture file
    Batch {
        /// Lines of `<compact|full> <layers> <message_words> <hex>`
        #[arg(long)]
        fixtures: PathBuf,
        /// Override AZTEC_PAR_MIN_BATCH
        #[arg(long)]
        par_min_batch: Option<usize>,
    },
}

#[derive(Debug, Args)]
#[group(required = true, multiple = false)]
struct InputArgs {
    /// Codeword bytes as hex
    #[arg(long)]
    hex: Option<String>,
    /// File of raw codeword bytes
    #[arg(long)]
    file: Option<PathBuf>,
    /// Codeword bits as a string of 0/1
    #[arg(long)]
    bits: Option<String>,
}

#[derive(Debug, Args)]
struct WidthArgs {
    /// Codeword width in bits
    #[arg(long, conflicts_with = "layers")]
    word_bits: Option<usize>,
    /// Data layer count; implies the codeword width
    #[arg(long)]
    layers: Option<u8>,
    /// Treat --layers as a compact symbol
    #[arg(long, requires = "layers")]
    compact: bool,
}

impl WidthArgs {
    fn word_bit_count(&self) -> CliResult<usize> {
        match (self.word_bits, self.layers) {
            (Some(bits), _) => Ok(bits),
            (None, Some(layers)) => {
                let structure = if self.compact {
                    AztecStructure::Compact
                } else {
                    AztecStructure::Full
                };
                Ok(structure.word_bit_count(layers)?)
            }
            (None, None) => Err("one of --word-bits or --layers is required".into()),
        }
    }
}

#[derive(Debug, Args)]
struct UnstuffArgs {
    #[command(flatten)]
    input: InputArgs,
    #[command(flatten)]
    width: WidthArgs,
    /// Leading words that must not carry reserved values
    #[arg(long)]
    message_words: usize,
    /// Bits to read from the input (default: message words x word width)
    #[arg(long)]
    bit_length: Option<usize>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("AZTEC_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Command::Unstuff(args) => unstuff_cmd(&args),
        Command::Geometry { width } => geometry_cmd(&width),
        Command::Batch {
            fixtures,
            par_min_batch,
        } => batch_cmd(&fixtures, par_min_batch),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{}", err);
            ExitCode::from(exit_status(&err))
        }
    }
}

/// Process exit status for a failed command.
fn exit_status(err: &CliError) -> u8 {
    match err.downcast_ref::<AztecError>() {
        Some(e) if e.is_validation() => EXIT_MALFORMED_SYMBOL,
        _ => EXIT_FAILURE,
    }
}

fn read_input(input: &InputArgs) -> CliResult<(Vec<u8>, usize)> {
    if let Some(hex) = &input.hex {
        let bytes = parse_hex(hex)?;
        let len = bytes.len() * 8;
        return Ok((bytes, len));
    }
    if let Some(path) = &input.file {
        let bytes = load_bytes(path)?;
        let len = bytes.len() * 8;
        return Ok((bytes, len));
    }
    if let Some(bits) = &input.bits {
        let buffer = parse_bit_string(bits)?;
        let len = buffer.len();
        return Ok((buffer.into_bytes(), len));
    }
    Err("one of --hex, --file or --bits is required".into())
}

fn unstuff_cmd(args: &UnstuffArgs) -> CliResult<()> {
    let word_bit_count = args.width.word_bit_count()?;
    let geometry = WordGeometry::new(word_bit_count, args.message_words)?;
    let (bytes, available) = read_input(&args.input)?;
    let bit_length = match args.bit_length {
        Some(bits) => bits,
        None => geometry.message_bits()?,
    };

    tracing::debug!(
        word_bit_count,
        message_words = args.message_words,
        bit_length,
        available,
        "unstuffing"
    );

    let view = BitView::wrap(&bytes, bit_length)?;
    let outcome = CodewordUnstuffer::unstuff_with_stats(&view, geometry)?;
    if outcome.ignored_tail_bits > 0 {
        tracing::warn!(
            "ignoring {} trailing bits that do not fill a {}-bit word",
            outcome.ignored_tail_bits,
            word_bit_count
        );
    }
    tracing::info!(
        words = outcome.words,
        stuffed = outcome.stuffed_words,
        bits = outcome.bits.len(),
        "unstuffed"
    );

    println!("{}", outcome.bits.len());
    println!("{}", outcome.bits);
    Ok(())
}

fn geometry_cmd(width: &WidthArgs) -> CliResult<()> {
    let geometry = WordGeometry::new(width.word_bit_count()?, 0)?;
    let w = geometry.word_bit_count();
    println!("word bits:        {}", w);
    println!("reserved zero:    {:0w$b}", 0, w = w);
    println!("reserved ones:    {:0w$b}", geometry.ones(), w = w);
    println!("stuffed low:      {:0w$b}", 1, w = w);
    println!("stuffed high:     {:0w$b}", geometry.ones_minus_one(), w = w);
    Ok(())
}

fn batch_cmd(fixtures: &Path, par_min_batch: Option<usize>) -> CliResult<()> {
    let symbols = load_symbols(fixtures)?;
    let unstuffer = match par_min_batch {
        Some(n) => Unstuffer::with_par_min_batch(n),
        None => Unstuffer::new(),
    };

    let results = unstuffer.unstuff_batch(&symbols);
    let mut failed = 0usize;
    for (i, result) in results.iter().enumerate() {
        match result {
            Ok(bits) => println!("{}\t{}\t{}", i, bits.len(), bits),
            Err(err) => {
                failed += 1;
                println!("{}\terror\t{}", i, err);
            }
        }
    }

    tracing::info!(
        "Processed {} symbols from {} ({} failed)",
        symbols.len(),
        fixtures.display(),
        failed
    );
    Ok(())
}
