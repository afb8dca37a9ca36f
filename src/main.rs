use std::process::ExitCode;

use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use lodestone::batch::{evaluate, run_file, BatchConfig};
use lodestone::constants::RECORD_FIELDS;
use lodestone::lodestone_errors::LodestoneError;
use lodestone::model::DipoleModel;

/// Input-format description printed by the `h` subcommand.
const FORMAT_HELP: &str = "\
The input file may have any number of entries, one per line, in the form

    <date> <coord-system> <altitude> <latitude> <longitude>

Date: xxxx.xxx for decimal years (2013.7)
      or year,month,day for calendar dates (2013,7,1)
Coord-System: M for height above mean sea level
              E for height above the WGS84 ellipsoid
Altitude: Kxxxxxx.xxx for kilometers (K1000.13)
          Mxxxxxx.xxx for meters (M1389.24)
          Fxxxxxx.xxx for feet (F192133.73)
Lat/Lon: xxx.xxx in decimal degrees (-76.53)
         or degrees,minutes,seconds (-76,31,48)
         (Lat and Lon must be specified in the same format.)
Date and altitude must fit the model.
Lat: -90 to 90 (use - to denote southern latitude)
Lon: -180 to 180 (use - to denote western longitude)

An example of an entry in the input file:

    2013.7 E F30000 -70.3 -30.8
";

#[derive(Parser)]
#[command(
    name = "lodestone",
    version,
    about = "Batch front end for geomagnetic field queries"
)]
struct Cli {
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Subcommand)]
enum Mode {
    /// Convert a coordinate file with one query per line
    #[command(name = "f")]
    File {
        /// Input coordinate file
        input: Utf8PathBuf,
        /// Output result file
        output: Utf8PathBuf,
        /// Abort on the first malformed record instead of skipping it
        #[arg(long)]
        fail_fast: bool,
    },
    /// Describe the accepted input formats
    #[command(name = "h")]
    Formats,
    // One query given as positional tokens:
    // <date> [coord-system] [altitude] [lat] [lon]
    #[command(external_subcommand)]
    Point(Vec<String>),
}

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let model = DipoleModel::wmm2010();

    match cli.mode {
        Mode::Formats => {
            print!("{FORMAT_HELP}");
            ExitCode::from(2)
        }
        Mode::File {
            input,
            output,
            fail_fast,
        } => match run_file(&model, &input, &output, BatchConfig { fail_fast }) {
            Ok(summary) => {
                println!("Processed {} lines", summary.lines_read);
                ExitCode::SUCCESS
            }
            Err(err @ LodestoneError::BatchAborted { .. }) => {
                eprintln!("{err}");
                ExitCode::from(1)
            }
            Err(err) => {
                eprintln!("{err}");
                ExitCode::from(2)
            }
        },
        Mode::Point(tokens) => {
            if tokens.len() > RECORD_FIELDS {
                eprintln!(
                    "Expected at most {RECORD_FIELDS} fields: <date> [coord-system] [altitude] [lat] [lon]"
                );
                return ExitCode::from(2);
            }
            match evaluate(&model, &tokens) {
                Ok(rows) => {
                    for row in rows {
                        println!("{row}");
                    }
                    ExitCode::SUCCESS
                }
                Err(err) => {
                    eprintln!("{err}");
                    ExitCode::from(1)
                }
            }
        }
    }
}
