use std::{
    fs,
    path::{Path, PathBuf},
    process::ExitCode,
};

use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use time::{
    Date, OffsetDateTime, format_description::BorrowedFormatItem, macros::format_description,
};
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

use dashboard_analytics::{
    AggregateOptions, DeltaResult, Error, Granularity, KpiComparison, KpiSums, Kpis, PeriodPlan,
    PeriodSelection, Preset, Reduction, SeriesPoint, Trend, aggregate, default_bucket_label, delta,
    format_currency, format_delta, format_percent, local_date, parse_series_csv,
    parse_series_json,
};

const DATE_FORMAT: &[BorrowedFormatItem] = format_description!("[year]-[month]-[day]");

/// Date range analytics for the seller dashboard.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Canonical time zone name (e.g. "Pacific/Auckland") used to work out today's date.
    #[arg(long, env = "ANALYTICS_TIMEZONE", default_value = "UTC", global = true)]
    timezone: String,

    /// Resolve date ranges against this date (YYYY-MM-DD) instead of today.
    #[arg(long, value_parser = parse_date, global = true)]
    now: Option<Date>,

    /// Log debug messages. `RUST_LOG` takes precedence when set.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the dates, granularity and comparison period of a date range.
    Period {
        #[command(flatten)]
        range: RangeArgs,
    },

    /// Bucket a daily series into weeks or months.
    Aggregate {
        /// Path to the series export.
        #[arg(long)]
        input: PathBuf,

        /// Format of the series export. Inferred from the file extension by default.
        #[arg(long, value_enum)]
        format: Option<InputFormat>,

        /// Bucket size. Chosen from the date range by default.
        #[arg(long)]
        granularity: Option<Granularity>,

        #[command(flatten)]
        range: RangeArgs,

        /// Sum this metric instead of averaging it. May be repeated.
        #[arg(long = "sum", value_name = "METRIC")]
        sum: Vec<String>,

        /// Sum every metric instead of averaging.
        #[arg(long)]
        sum_all: bool,
    },

    /// Print the percentage change from PREVIOUS to CURRENT.
    Delta {
        /// The value for the current period.
        #[arg(allow_negative_numbers = true)]
        current: f64,

        /// The value for the previous period.
        #[arg(allow_negative_numbers = true)]
        previous: f64,
    },

    /// Print the dashboard KPIs for two periods' sums.
    Kpis {
        /// Revenue of the current period.
        #[arg(long, allow_negative_numbers = true)]
        revenue: f64,

        /// Number of sales in the current period.
        #[arg(long)]
        sales: f64,

        /// Net margin of the current period.
        #[arg(long, allow_negative_numbers = true)]
        margin: f64,

        /// Revenue of the previous period.
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        prev_revenue: f64,

        /// Number of sales in the previous period.
        #[arg(long, default_value_t = 0.0)]
        prev_sales: f64,

        /// Net margin of the previous period.
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        prev_margin: f64,

        /// Print JSON instead of a table.
        #[arg(long)]
        json: bool,
    },
}

#[derive(clap::Args, Debug)]
struct RangeArgs {
    /// The date range preset.
    #[arg(long, default_value_t = Preset::default_preset())]
    preset: Preset,

    /// Start of a custom range (YYYY-MM-DD).
    #[arg(long, value_parser = parse_date)]
    from: Option<Date>,

    /// End of a custom range (YYYY-MM-DD).
    #[arg(long, value_parser = parse_date)]
    to: Option<Date>,
}

impl RangeArgs {
    fn selection(&self) -> PeriodSelection {
        PeriodSelection {
            preset: self.preset,
            custom_from: self.from,
            custom_to: self.to,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum InputFormat {
    Csv,
    Json,
}

fn main() -> ExitCode {
    let args = Args::parse();

    setup_logging(args.verbose);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!("{error}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), Error> {
    let now = match args.now {
        Some(now) => now,
        None => local_date(&args.timezone, OffsetDateTime::now_utc())?,
    };
    tracing::debug!(%now, timezone = %args.timezone, "Resolving against the current date");

    match args.command {
        Command::Period { range } => {
            let plan = PeriodPlan::new(&range.selection(), now)?;
            print_json(&plan)
        }
        Command::Aggregate {
            input,
            format,
            granularity,
            range,
            sum,
            sum_all,
        } => {
            let granularity = bucket_granularity(&range, granularity, now)?;
            let points = read_series(&input, format)?;

            let default_reduction = if sum_all {
                Reduction::Sum
            } else {
                Reduction::Mean
            };
            let options = sum
                .into_iter()
                .fold(AggregateOptions::with_default(default_reduction), |options, name| {
                    options.reduce(name, Reduction::Sum)
                });

            let aggregation = aggregate(points, granularity, now, &options, default_bucket_label);

            print_json(&aggregation)
        }
        Command::Delta { current, previous } => {
            let result = delta(current, previous);
            print_json(&DeltaOutput {
                result,
                trend: result.trend(),
                display: format_delta(result),
            })
        }
        Command::Kpis {
            revenue,
            sales,
            margin,
            prev_revenue,
            prev_sales,
            prev_margin,
            json,
        } => {
            let comparison = KpiComparison::new(
                KpiSums {
                    revenue,
                    sales_count: sales,
                    net_margin: margin,
                },
                KpiSums {
                    revenue: prev_revenue,
                    sales_count: prev_sales,
                    net_margin: prev_margin,
                },
            );

            if json {
                print_json(&comparison)
            } else {
                print_kpi_table(&comparison);
                Ok(())
            }
        }
    }
}

#[derive(Serialize)]
struct DeltaOutput {
    result: DeltaResult,
    trend: Trend,
    display: String,
}

/// The granularity to bucket with: the one given on the command line, or else
/// the one chosen for the date range. The range is validated either way.
fn bucket_granularity(
    range: &RangeArgs,
    granularity: Option<Granularity>,
    now: Date,
) -> Result<Granularity, Error> {
    let plan = PeriodPlan::new(&range.selection(), now)?;

    Ok(granularity.unwrap_or(plan.granularity))
}

fn parse_date(text: &str) -> Result<Date, String> {
    Date::parse(text, DATE_FORMAT).map_err(|error| format!("expected YYYY-MM-DD: {error}"))
}

fn read_series(path: &Path, format: Option<InputFormat>) -> Result<Vec<SeriesPoint>, Error> {
    let text = fs::read_to_string(path)
        .map_err(|error| Error::ReadSeries(format!("{}: {error}", path.display())))?;

    let format = format.unwrap_or_else(|| {
        match path.extension().and_then(|extension| extension.to_str()) {
            Some(extension) if extension.eq_ignore_ascii_case("json") => InputFormat::Json,
            _ => InputFormat::Csv,
        }
    });
    tracing::debug!(path = %path.display(), ?format, "Reading series");

    match format {
        InputFormat::Csv => parse_series_csv(&text),
        InputFormat::Json => parse_series_json(&text),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), Error> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|error| Error::JsonSerialization(error.to_string()))?;
    println!("{json}");
    Ok(())
}

fn print_kpi_table(comparison: &KpiComparison) {
    let KpiComparison {
        current,
        previous: _,
        deltas,
    } = comparison;
    let Kpis {
        revenue,
        sales_count,
        net_margin,
        average_order_value,
        margin_percent,
    } = current;

    let rows = [
        ("Revenue", format_currency(*revenue), deltas.revenue),
        ("Sales", format!("{sales_count}"), deltas.sales_count),
        (
            "Average order",
            format_currency(*average_order_value),
            deltas.average_order_value,
        ),
        ("Net margin", format_currency(*net_margin), deltas.net_margin),
        ("Margin", format_percent(*margin_percent), deltas.margin_percent),
    ];

    for (name, value, change) in rows {
        println!("{name:<14} {value:>14}  {:>8}", format_delta(change));
    }
}

fn setup_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // Logs go to stderr so the JSON on stdout can be piped.
    let stderr_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(stderr_log.with_filter(filter))
        .init();
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};
    use dashboard_analytics::{Error, Granularity, Preset};
    use time::macros::date;

    use super::{Args, Command, RangeArgs, bucket_granularity};

    fn aggregate_range(args: &[&str]) -> (RangeArgs, Option<Granularity>) {
        let args = Args::try_parse_from(args).unwrap();

        match args.command {
            Command::Aggregate {
                range, granularity, ..
            } => (range, granularity),
            command => panic!("expected the aggregate command, got {command:?}"),
        }
    }

    #[test]
    fn cli_is_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn granularity_defaults_to_the_ranges() {
        let (range, granularity) =
            aggregate_range(&["analytics", "aggregate", "--input", "s.csv", "--preset", "last90d"]);

        assert_eq!(range.preset, Preset::Last90d);
        assert_eq!(
            bucket_granularity(&range, granularity, date!(2025 - 03 - 31)),
            Ok(Granularity::Monthly)
        );
    }

    #[test]
    fn explicit_granularity_overrides_the_ranges() {
        let (range, granularity) = aggregate_range(&[
            "analytics",
            "aggregate",
            "--input",
            "s.csv",
            "--granularity",
            "weekly",
        ]);

        assert_eq!(
            bucket_granularity(&range, granularity, date!(2025 - 03 - 31)),
            Ok(Granularity::Weekly)
        );
    }

    #[test]
    fn explicit_granularity_still_validates_the_range() {
        let (range, granularity) = aggregate_range(&[
            "analytics",
            "aggregate",
            "--input",
            "s.csv",
            "--granularity",
            "weekly",
            "--preset",
            "custom",
        ]);

        assert_eq!(
            bucket_granularity(&range, granularity, date!(2025 - 03 - 31)),
            Err(Error::MissingCustomBounds)
        );
    }
}
