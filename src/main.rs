use clap::Parser;
use log::{error, info};
use rayon::ThreadPoolBuilder;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::process::ExitCode;
use xmfacheck::alignment_record::ComparisonWindow;
use xmfacheck::commands::verify::run_verify;
use xmfacheck::config::VerifyConfig;

/// Check that an XMFA alignment agrees with the genomes it aligns.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Path to the XMFA file to verify (plain or BGZF-compressed)
    #[clap(value_parser)]
    xmfa: PathBuf,

    /// Directory containing the reference FASTA file (first sequence in the XMFA header)
    #[clap(value_parser)]
    reference: PathBuf,

    /// Directory containing the FASTA files of all other sequences
    #[clap(value_parser)]
    sources: PathBuf,

    /// Export the alignment as a MAF file next to the report
    #[clap(short = 'm', long, action)]
    maf: bool,

    /// Search for the actual position of mismatched fragments (slow)
    #[clap(short = 'f', long, action)]
    find_actual: bool,

    /// Compare each entry's whole sequence instead of its first characters
    #[clap(long, action)]
    full_compare: bool,

    /// Number of leading characters compared per entry
    #[clap(long, value_parser, default_value_t = ComparisonWindow::DEFAULT_PREFIX, conflicts_with = "full_compare")]
    prefix_length: usize,

    /// Directory where the report (and MAF file) are created
    #[clap(short = 'o', long, value_parser, default_value = ".")]
    output_dir: PathBuf,

    /// Number of threads for parallel processing.
    #[clap(short = 't', long, value_parser, default_value_t = NonZeroUsize::new(num_cpus::get().min(4)).unwrap_or(NonZeroUsize::MIN))]
    threads: NonZeroUsize,

    /// Verbosity level (0 = error, 1 = info, 2 = debug)
    #[clap(short, long, default_value = "0")]
    verbose: u8,
}

fn main() -> ExitCode {
    let args = Args::parse();

    // Initialize logger based on verbosity
    env_logger::Builder::new()
        .filter_level(match args.verbose {
            0 => log::LevelFilter::Error,
            1 => log::LevelFilter::Info,
            _ => log::LevelFilter::Debug,
        })
        .init();

    // Configure thread pool
    if let Err(e) = ThreadPoolBuilder::new()
        .num_threads(args.threads.into())
        .build_global()
    {
        error!("Failed to configure thread pool: {}", e);
        return ExitCode::FAILURE;
    }

    let config = VerifyConfig {
        export_alternate_format: args.maf,
        locate_mismatches: args.find_actual,
        comparison_window: if args.full_compare {
            ComparisonWindow::Full
        } else {
            ComparisonWindow::Prefix(args.prefix_length)
        },
        output_dir: args.output_dir.clone(),
        ..VerifyConfig::new(&args.xmfa, &args.reference, &args.sources)
    };

    match run_verify(&config) {
        Ok(summary) => {
            info!(
                "{} records checked, {} mismatches ({} located); report: '{}'",
                summary.records_checked,
                summary.mismatches,
                summary.located,
                summary.report_path.display()
            );
            if let Some(maf_path) = &summary.maf_path {
                info!("MAF written to '{}'", maf_path.display());
            }
            println!("{}", summary.reverse_matches);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
