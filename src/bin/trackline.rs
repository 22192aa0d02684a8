//! Encode, decode, inspect and generate encoded polylines from the command line.

use clap::{Parser, Subcommand, ValueEnum};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::f64::consts::PI;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::{fmt, EnvFilter};
use trackline::{
    encode, zigzag_decode, ChunkReader, Coordinate, Decoder, Encoder,
    MalformedPolylineError, Polyline, DEFAULT_PRECISION,
};

/// Meters per degree of latitude (and of longitude at the equator)
const METERS_PER_DEGREE: f64 = 111_195.0;

#[derive(Parser)]
#[command(name = "trackline")]
#[command(about = "Encode, decode and inspect encoded polylines")]
#[command(after_help = "INPUT FORMATS:\n  \
    encode reads either a JSON array of pairs, e.g. [[38.5,-120.2],[40.7,-120.95]],\n  \
    or CSV lines 'lat,lng':\n  \
    - Lines starting with # are comments\n  \
    - Empty lines are skipped\n  \
    - A first data line starting with 'lat', 'lon' or 'lng' is treated as header\n\n\
    Pass --lon-lat when pairs are in GeoJSON [lon, lat] order.\n\n\
LOGGING:\n  \
    Diagnostics go to stderr, filtered by RUST_LOG (e.g. RUST_LOG=debug).")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Encode coordinates from a file or stdin
    Encode {
        /// Input file (default: stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Decimal digits kept (5 for most map services, 6 for some routers)
        #[arg(short, long, default_value_t = DEFAULT_PRECISION)]
        precision: u8,

        /// Pairs are [lon, lat] instead of [lat, lng]
        #[arg(long)]
        lon_lat: bool,
    },

    /// Decode an encoded polyline (argument or stdin)
    Decode {
        /// Encoded polyline (default: read stdin)
        encoded: Option<String>,

        #[arg(short, long, default_value_t = DEFAULT_PRECISION)]
        precision: u8,

        /// Emit pairs as [lon, lat]
        #[arg(long)]
        lon_lat: bool,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },

    /// Show the chunk-by-chunk breakdown of an encoded polyline
    Inspect {
        encoded: String,

        #[arg(short, long, default_value_t = DEFAULT_PRECISION)]
        precision: u8,
    },

    /// Generate a random-walk trip trace as JSON
    Gen {
        /// Number of GPS fixes
        #[arg(short = 'n', long, default_value = "100")]
        points: usize,

        /// RNG seed for reproducible traces
        #[arg(long)]
        seed: Option<u64>,

        #[arg(short, long, default_value_t = DEFAULT_PRECISION)]
        precision: u8,

        #[arg(long, default_value = "48.8566", allow_hyphen_values = true)]
        start_lat: f64,

        #[arg(long, default_value = "2.3522", allow_hyphen_values = true)]
        start_lng: f64,

        /// Mean distance between fixes
        #[arg(long, default_value = "25.0")]
        step_meters: f64,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Csv,
}

/// Trip payload as the data layer exchanges it
#[derive(Debug, Serialize)]
struct GeneratedTrip {
    points: usize,
    length_m: f64,
    precision: u8,
    trace: String,
}

/// One row of the `inspect` breakdown
#[derive(Debug, PartialEq)]
struct ChunkRow<'a> {
    offset: usize,
    bytes: &'a str,
    is_lat: bool,
    zigzag: u32,
    delta: i32,
    /// i64 so the breakdown can still show where a corrupt stream overflows
    value: i64,
}

/// Read a whole file, or stdin when no path is given
fn read_input(path: Option<&PathBuf>) -> Result<String, String> {
    match path {
        Some(p) => fs::read_to_string(p).map_err(|e| format!("Failed to read {}: {e}", p.display())),
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .map_err(|e| format!("Failed to read stdin: {e}"))?;
            Ok(buf)
        }
    }
}

/// Parse a JSON array of pairs or CSV `a,b` lines
fn parse_pairs(text: &str) -> Result<Vec<[f64; 2]>, String> {
    let trimmed = text.trim();
    if trimmed.starts_with('[') {
        return serde_json::from_str(trimmed).map_err(|e| format!("Invalid JSON input: {e}"));
    }

    let mut pairs = Vec::new();
    let mut seen_data = false;
    for (line_num, line) in trimmed.lines().enumerate() {
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let lower = line.to_lowercase();
        if !seen_data && ["lat", "lon", "lng"].iter().any(|h| lower.starts_with(h)) {
            seen_data = true;
            continue;
        }
        seen_data = true;

        let parts: Vec<&str> = line.split(',').collect();
        if parts.len() != 2 {
            return Err(format!("Line {}: expected 'a,b', got '{line}'", line_num + 1));
        }

        let a: f64 = parts[0]
            .trim()
            .parse()
            .map_err(|e| format!("Line {}: invalid number '{}': {e}", line_num + 1, parts[0]))?;
        let b: f64 = parts[1]
            .trim()
            .parse()
            .map_err(|e| format!("Line {}: invalid number '{}': {e}", line_num + 1, parts[1]))?;

        pairs.push([a, b]);
    }

    Ok(pairs)
}

fn to_coordinates(pairs: &[[f64; 2]], lon_lat: bool) -> Vec<Coordinate> {
    pairs
        .iter()
        .map(|&[a, b]| if lon_lat { Coordinate::from_lon_lat(a, b) } else { Coordinate::new(a, b) })
        .collect()
}

fn run_encode(input: Option<&PathBuf>, precision: u8, lon_lat: bool) -> Result<(), String> {
    let text = read_input(input)?;
    let coordinates = to_coordinates(&parse_pairs(&text)?, lon_lat);
    debug!(points = coordinates.len(), precision, "encoding");

    let encoded = encode(&coordinates, precision).map_err(|e| e.to_string())?;
    info!(
        points = coordinates.len(),
        bytes = encoded.len(),
        "encoded {} coordinates",
        coordinates.len()
    );
    println!("{encoded}");
    Ok(())
}

fn run_decode(
    encoded: Option<String>,
    precision: u8,
    lon_lat: bool,
    format: OutputFormat,
) -> Result<(), String> {
    let encoded = match encoded {
        Some(s) => s,
        None => read_input(None)?,
    };
    let encoded = encoded.trim();
    debug!(bytes = encoded.len(), precision, "decoding");

    let polyline = Polyline::decode(encoded, precision).map_err(|e| e.to_string())?;
    info!(
        points = polyline.len(),
        length_m = polyline.length_meters(),
        "decoded {} coordinates",
        polyline.len()
    );

    let pairs: Vec<[f64; 2]> = polyline
        .points()
        .iter()
        .map(|c| if lon_lat { c.to_lon_lat() } else { [c.lat, c.lng] })
        .collect();

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&pairs).map_err(|e| e.to_string())?;
            println!("{json}");
        }
        OutputFormat::Csv => {
            println!("{}", if lon_lat { "lng,lat" } else { "lat,lng" });
            for [a, b] in pairs {
                println!("{a},{b}");
            }
        }
    }
    Ok(())
}

/// Split an encoded polyline into annotated chunks
///
/// Rows read before a fault are returned together with the fault.
fn inspect_rows(encoded: &str) -> (Vec<ChunkRow<'_>>, Option<MalformedPolylineError>) {
    let mut reader = ChunkReader::new(encoded.as_bytes());
    let mut totals = [0i64; 2];
    let mut rows = Vec::new();

    while !reader.is_done() {
        let offset = reader.position();
        let zigzag = match reader.read_chunk() {
            Ok(raw) => raw,
            Err(e) => return (rows, Some(e)),
        };
        let axis = rows.len() % 2;
        let delta = zigzag_decode(zigzag);
        totals[axis] += i64::from(delta);

        rows.push(ChunkRow {
            offset,
            bytes: &encoded[offset..reader.position()],
            is_lat: axis == 0,
            zigzag,
            delta,
            value: totals[axis],
        });
    }

    (rows, None)
}

fn run_inspect(encoded: &str, precision: u8) -> Result<(), String> {
    let factor = 10f64.powi(i32::from(precision));
    let (rows, fault) = inspect_rows(encoded);

    println!(
        "{:>6}  {:<8}  {:<4}  {:>10}  {:>11}  {:>11}  {:>12}",
        "offset", "bytes", "axis", "zigzag", "delta", "value", "degrees"
    );
    for row in &rows {
        println!(
            "{:>6}  {:<8}  {:<4}  {:>10}  {:>11}  {:>11}  {:>12.prec$}",
            row.offset,
            row.bytes,
            if row.is_lat { "lat" } else { "lng" },
            row.zigzag,
            row.delta,
            row.value,
            row.value as f64 / factor,
            prec = usize::from(precision),
        );
    }
    if let Some(e) = fault {
        return Err(e.to_string());
    }

    // Cross-check against the real decoder so inspection reports the same faults
    let points = Decoder::new(encoded, precision)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| e.to_string())?;
    println!();
    println!("{} coordinates, {} bytes", points.len(), encoded.len());
    if !points.is_empty() {
        println!("{:.1} bytes per coordinate", encoded.len() as f64 / points.len() as f64);
    }
    Ok(())
}

/// Random walk with a slowly drifting heading, like a bike or walking trace
fn generate_trace(
    rng: &mut StdRng,
    points: usize,
    start: Coordinate,
    step_meters: f64,
) -> Vec<Coordinate> {
    let mut trace = Vec::with_capacity(points);
    let mut current = start;
    let mut heading: f64 = rng.random_range(0.0..2.0 * PI);

    for _ in 0..points {
        trace.push(current);

        heading += rng.random_range(-0.4..=0.4);
        let step = step_meters * rng.random_range(0.5..=1.5);
        let lng_scale = current.lat.to_radians().cos().max(1e-6);
        current = Coordinate::new(
            current.lat + step * heading.cos() / METERS_PER_DEGREE,
            current.lng + step * heading.sin() / (METERS_PER_DEGREE * lng_scale),
        );
    }

    trace
}

fn generate_trip(
    rng: &mut StdRng,
    points: usize,
    start: Coordinate,
    step_meters: f64,
    precision: u8,
) -> Result<GeneratedTrip, String> {
    let mut enc = Encoder::with_capacity(precision, points);
    enc.extend(generate_trace(rng, points, start, step_meters))
        .map_err(|e| e.to_string())?;

    // Measure what decodes back, not the unrounded walk
    let length_m = Polyline::decode(enc.as_str(), precision)
        .map_err(|e| e.to_string())?
        .length_meters()
        .round();

    Ok(GeneratedTrip {
        points: enc.count(),
        length_m,
        precision,
        trace: enc.into_string(),
    })
}

fn run_gen(
    points: usize,
    seed: Option<u64>,
    start: Coordinate,
    step_meters: f64,
    precision: u8,
) -> Result<(), String> {
    let seed = seed.unwrap_or_else(|| rand::rng().random());
    debug!(seed, precision, "generating trace");
    let mut rng = StdRng::seed_from_u64(seed);

    let trip = generate_trip(&mut rng, points, start, step_meters, precision)?;
    info!(seed, bytes = trip.trace.len(), "generated {} fixes", trip.points);

    let json = serde_json::to_string_pretty(&trip).map_err(|e| e.to_string())?;
    println!("{json}");
    Ok(())
}

fn main() {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let result = match args.command {
        Command::Encode {
            input,
            precision,
            lon_lat,
        } => run_encode(input.as_ref(), precision, lon_lat),
        Command::Decode {
            encoded,
            precision,
            lon_lat,
            format,
        } => run_decode(encoded, precision, lon_lat, format),
        Command::Inspect { encoded, precision } => run_inspect(&encoded, precision),
        Command::Gen {
            points,
            seed,
            precision,
            start_lat,
            start_lng,
            step_meters,
        } => run_gen(
            points,
            seed,
            Coordinate::new(start_lat, start_lng),
            step_meters,
            precision,
        ),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trackline::decode;

    #[test]
    fn test_parse_json_pairs() {
        let pairs = parse_pairs("[[38.5, -120.2], [40.7, -120.95]]").unwrap();
        assert_eq!(pairs, vec![[38.5, -120.2], [40.7, -120.95]]);
    }

    #[test]
    fn test_parse_csv_pairs() {
        let text = "lat,lng\n# origin\n38.5,-120.2\n\n 40.7 , -120.95 \n";
        let pairs = parse_pairs(text).unwrap();
        assert_eq!(pairs, vec![[38.5, -120.2], [40.7, -120.95]]);
    }

    #[test]
    fn test_parse_csv_header_after_comments() {
        let text = "# exported trace\n\nlat,lng\n38.5,-120.2\n";
        assert_eq!(parse_pairs(text).unwrap(), vec![[38.5, -120.2]]);

        // Only the first data line may be a header
        let text = "38.5,-120.2\nlat,lng\n";
        assert!(parse_pairs(text).unwrap_err().contains("Line 2"));
    }

    #[test]
    fn test_parse_csv_errors() {
        assert!(parse_pairs("38.5").unwrap_err().contains("Line 1"));
        assert!(parse_pairs("38.5,abc").unwrap_err().contains("invalid number"));
        assert!(parse_pairs("[[1.0]]").is_err());
    }

    #[test]
    fn test_lon_lat_order() {
        let coords = to_coordinates(&[[2.3522, 48.8566]], true);
        assert_eq!(coords, vec![Coordinate::new(48.8566, 2.3522)]);
        let coords = to_coordinates(&[[48.8566, 2.3522]], false);
        assert_eq!(coords, vec![Coordinate::new(48.8566, 2.3522)]);
    }

    #[test]
    fn test_generated_trace_is_seeded_and_bounded() {
        let start = Coordinate::new(48.8566, 2.3522);
        let a = generate_trace(&mut StdRng::seed_from_u64(7), 50, start, 25.0);
        let b = generate_trace(&mut StdRng::seed_from_u64(7), 50, start, 25.0);
        assert_eq!(a, b);
        assert_eq!(a.len(), 50);
        assert_eq!(a[0], start);
        for pair in a.windows(2) {
            let d = pair[0].distance_meters(&pair[1]);
            assert!(d <= 25.0 * 1.5 + 0.5, "step {d} too long");
        }
    }

    #[test]
    fn test_inspect_rows_canonical() {
        let (rows, fault) = inspect_rows("_p~iF~ps|U_ulLnnqC_mqNvxq`@");
        assert_eq!(fault, None);
        assert_eq!(rows.len(), 6);
        assert_eq!(
            rows[0],
            ChunkRow {
                offset: 0,
                bytes: "_p~iF",
                is_lat: true,
                zigzag: 7_700_000,
                delta: 3_850_000,
                value: 3_850_000,
            }
        );
        assert_eq!(rows[1].bytes, "~ps|U");
        assert!(!rows[1].is_lat);
        assert_eq!(rows[1].delta, -12_020_000);
        assert_eq!(rows[1].value, -12_020_000);

        // Values accumulate per axis
        assert_eq!(rows[2].delta, 220_000);
        assert_eq!(rows[2].value, 4_070_000);
        assert_eq!(rows[5].value, -12_645_300);
        assert_eq!(rows.last().map(|r| r.offset + r.bytes.len()), Some(27));
    }

    #[test]
    fn test_inspect_rows_truncated() {
        let (rows, fault) = inspect_rows("_p~iF~ps|U_ul");
        assert_eq!(rows.len(), 2);
        assert_eq!(fault, Some(MalformedPolylineError::TruncatedChunk { offset: 10 }));

        // A dangling latitude is well-formed at the chunk level
        let (rows, fault) = inspect_rows("_p~iF");
        assert_eq!(rows.len(), 1);
        assert_eq!(fault, None);
        assert!(run_inspect("_p~iF", 5).unwrap_err().contains("no longitude"));
    }

    #[test]
    fn test_generated_trip_honors_precision() {
        let start = Coordinate::new(48.8566, 2.3522);
        for precision in [5, 6] {
            let trip =
                generate_trip(&mut StdRng::seed_from_u64(11), 20, start, 25.0, precision).unwrap();
            assert_eq!(trip.points, 20);
            assert_eq!(trip.precision, precision);

            let decoded = decode(&trip.trace, precision).unwrap();
            assert_eq!(decoded.len(), 20);
            assert_eq!(decoded[0], start);

            let json = serde_json::to_value(&trip).unwrap();
            assert_eq!(json["trace"], trip.trace.as_str());
        }

        let p5 = generate_trip(&mut StdRng::seed_from_u64(11), 20, start, 25.0, 5).unwrap();
        let p6 = generate_trip(&mut StdRng::seed_from_u64(11), 20, start, 25.0, 6).unwrap();
        assert!(p6.trace.len() > p5.trace.len());
    }
}
