//! This module is in charge of outputting the final statistics to the
//! standard output and to a results file

use crate::run::{config::Configuration, stats::FinalStatistics};

use event_shapes::{numeric::floats, Float, RapidityConvention};
use eyre::{Result, WrapErr};
use time::{macros::format_description, OffsetDateTime};

use std::{
    fs::File,
    io::{self, Write},
    time::Duration,
};

/// Number of significant digits in file output
const SIG_DIGITS: usize = (floats::DIGITS - 1) as usize;

/// Name of the results file
const RESULTS_FILE: &str = "shapes.data";

/// Names of the event shape variables, in emission order
const SHAPE_NAMES: [&str; 5] = [
    "ln(tau) central thrust",
    "ln(B) total broadening",
    "ln(rho) total jet mass",
    "ln(rho_T) total transv. jet mass",
    "ln(y23) three-jet resolution",
];

/// Output the statistics to the console and to disk
pub fn dump_results(
    cfg: &Configuration,
    stats: &FinalStatistics,
    elapsed_time: Duration,
) -> Result<()> {
    // Print out the summary on stdout
    print_summary(stats);

    // Compute a timestamp of when the run ended
    let timestamp = format_timestamp(OffsetDateTime::now_utc())?;

    // Write the results file
    let mut dat_file =
        File::create(RESULTS_FILE).wrap_err_with(|| format!("Could not create {RESULTS_FILE}"))?;
    write_results(&mut dat_file, cfg, stats, elapsed_time, &timestamp)
        .wrap_err_with(|| format!("Could not write {RESULTS_FILE}"))
}

/// Format a date the way it appears at the top of the results file
fn format_timestamp(date: OffsetDateTime) -> Result<String> {
    let format = format_description!(
        "[day]-[month repr:short]-[year repr:last_two]   [hour]:[minute]:[second]"
    );
    date.format(format).wrap_err("Could not format timestamp")
}

/// Display the main statistics on stdout
fn print_summary(stats: &FinalStatistics) {
    println!("Processed events      : {}", stats.processed_events);
    println!("... failed            : {}", stats.failed_events);
    println!("... too few central   : {}", stats.sparse_events);
    println!("... empty hemisphere  : {}", stats.vetoed_events);
    for (idx, name) in SHAPE_NAMES.iter().enumerate() {
        println!(
            "{:<33}: {:>12.6} +/- {:<12.6} ({} events)",
            name, stats.means[idx], stats.std_devs[idx], stats.counts[idx]
        );
    }
}

/// Write down the run parameters and statistics
fn write_results(
    writer: &mut impl Write,
    cfg: &Configuration,
    stats: &FinalStatistics,
    elapsed_time: Duration,
    timestamp: &str,
) -> io::Result<()> {
    let shapes = &cfg.shapes;
    writeln_column(writer, timestamp)?;
    writeln_column(writer, "---------------------------------------------")?;
    writeln_column(writer, ("Number of events", cfg.num_events))?;
    writeln_column(writer, ("Center of mass energy (GeV)", cfg.e_total))?;
    writeln_column(writer, ("Outgoing particles", cfg.num_outgoing))?;
    writeln_column(writer, ("Central region cut", shapes.eta_central()))?;
    let convention = match shapes.convention() {
        RapidityConvention::Pseudorapidity => "pseudorapidity",
        RapidityConvention::Rapidity => "rapidity",
    };
    writeln_column(writer, ("Angular coordinate", convention))?;
    writeln_column(writer, ("Minimal central multiplicity", shapes.min_multiplicity()))?;
    writeln_column(writer, ("Beam distance factor", shapes.beam_distance_factor()))?;
    writeln_column(writer, "---------------------------------------------")?;
    writeln_column(writer, ("Failed events", stats.failed_events))?;
    writeln_column(writer, ("Too few central particles", stats.sparse_events))?;
    writeln_column(writer, ("Empty hemisphere", stats.vetoed_events))?;
    writeln_column(writer, "---------------------------------------------")?;
    for (idx, name) in SHAPE_NAMES.iter().enumerate() {
        writeln_column(writer, (*name, stats.means[idx]))?;
        writeln_column(writer, ("... standard deviation", stats.std_devs[idx]))?;
        writeln_column(writer, ("... events", stats.counts[idx]))?;
    }
    writeln_column(writer, "---------------------------------------------")?;
    let elapsed_secs = elapsed_time.as_secs_f64() as Float;
    writeln_column(writer, ("Elapsed time (s)", elapsed_secs))?;
    let secs_per_ev = elapsed_secs / (cfg.num_events as Float);
    writeln_column(writer, ("Elapsed time per event (s)", secs_per_ev))
}

/// Text output facility with one item per line, and fixed-size key columns
fn writeln_column(writer: &mut impl Write, data: impl WriteColumn) -> io::Result<()> {
    write!(writer, " ")?;
    data.write(writer)?;
    writeln!(writer)
}

/// Trait implemented by things which can be written in the results file
trait WriteColumn: Sized {
    /// Write down `self` to the output
    fn write(self, writer: &mut impl Write) -> io::Result<()>;
}

impl WriteColumn for &str {
    // Strings work in the usual way
    fn write(self, writer: &mut impl Write) -> io::Result<()> {
        write!(writer, "{}", self)
    }
}

impl WriteColumn for usize {
    // Integers work in the usual way too
    fn write(self, writer: &mut impl Write) -> io::Result<()> {
        write!(writer, "{}", self)
    }
}

impl WriteColumn for Float {
    // Floats mimick the %g format of C
    fn write(self, writer: &mut impl Write) -> io::Result<()> {
        write_engineering(writer, self, SIG_DIGITS)
    }
}

impl<T: WriteColumn> WriteColumn for (&str, T) {
    // Key-value output that uses fixed-size columns for better readability
    fn write(self, writer: &mut impl Write) -> io::Result<()> {
        write!(writer, "{:<33}: ", self.0)?;
        self.1.write(writer)
    }
}

/// Write a floating-point number using "engineering" notation
///
/// Analogous to the %g format of the C printf function, this method switches
/// between naive and scientific notation for floating-point numbers when the
/// number being printed becomes so small that printing leading zeroes could end
/// up larger than the scientific notation, or so large that we would be forced
/// to print more significant digits than requested.
///
fn write_engineering(writer: &mut impl Write, x: Float, sig_digits: usize) -> io::Result<()> {
    let mut precision = sig_digits - 1;
    if x == 0. {
        // Zero is special because you can't take its log
        write!(writer, "0")
    } else {
        // Otherwise, use log to evaluate order of magnitude
        let log_x = x.abs().log10();
        if log_x >= -3. && log_x <= (sig_digits as Float) {
            // Print using naive notation, adjusting the number of digits after
            // the decimal point to keep a constant number of significant ones
            precision = (precision as isize - log_x.trunc() as isize) as usize;

            // Numbers smaller than 1 must get one extra digit since the leading
            // zero does not count as a significant digit.
            if log_x < 0. {
                precision += 1
            }

            // Trailing zeros and decimal point are not expected, but be
            // careful with integer numbers...
            let str_with_zeros = format!("{:.1$}", x, precision);
            if str_with_zeros.contains('.') {
                write!(
                    writer,
                    "{}",
                    str_with_zeros.trim_end_matches('0').trim_end_matches('.')
                )
            } else {
                write!(writer, "{}", str_with_zeros)
            }
        } else {
            // Print using scientific notation
            write!(writer, "{:.1$e}", x, precision)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engineering(x: Float) -> String {
        let mut buffer = Vec::new();
        write_engineering(&mut buffer, x, 6).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn engineering_notation() {
        assert_eq!(engineering(0.), "0");
        assert_eq!(engineering(2.4), "2.4");
        assert_eq!(engineering(91.188), "91.188");
        assert_eq!(engineering(-46.0517019), "-46.0517");
        assert_eq!(engineering(1e-20), "1.00000e-20");
    }

    #[test]
    fn timestamp() {
        let date = time::macros::datetime!(2024-03-07 09:05:30 UTC);
        assert_eq!(format_timestamp(date).unwrap(), "07-Mar-24   09:05:30");
    }

    #[test]
    fn key_value_columns() {
        let mut buffer = Vec::new();
        writeln_column(&mut buffer, ("Outgoing particles", 4usize)).unwrap();
        let line = String::from_utf8(buffer).unwrap();
        assert!(line.starts_with(" Outgoing particles "));
        assert!(line.ends_with(": 4\n"));
    }
}
