//! Ray / Earth Ellipsoid Intersection Tool
//!
//! Prints the nearest intersection point of a ray with the reference ellipsoid,
//! one component per line (x, y, z in km). Nothing is printed when the ray misses.
//!
//! Usage:
//!   cargo run --bin ray_ellipsoid_intersection -- d_l_x d_l_y d_l_z c_l_x c_l_y c_l_z
//!
//! Without `--model` the built-in Earth ellipsoid is used and no files are read.

use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::{ArgAction, CommandFactory, Parser};
use ellipsoid_intersect::constants::{GEODETIC_ITERATIONS, RAD2DEG};
use ellipsoid_intersect::{solve, Cartesian3, EllipsoidModel, Geodetic, IntersectionResult};
use env_logger::Env;
use log::LevelFilter;

/// Type alias for the error type used throughout this module
type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Ray / reference ellipsoid intersection
#[derive(Parser, Debug)]
#[command(
    name = "ray_ellipsoid_intersection",
    version,
    about = "Finds the nearest intersection of a ray with the Earth reference ellipsoid",
    long_about = None,
    allow_negative_numbers = true
)]
struct Args {
    /// x-component of origin-referenced ray direction
    d_l_x: f64,
    /// y-component of origin-referenced ray direction
    d_l_y: f64,
    /// z-component of origin-referenced ray direction
    d_l_z: f64,
    /// x-component offset of ray origin (km)
    c_l_x: f64,
    /// y-component offset of ray origin (km)
    c_l_y: f64,
    /// z-component offset of ray origin (km)
    c_l_z: f64,

    /// Print latitude (deg), longitude (deg) and height (km) instead of x, y, z
    #[arg(long, action = ArgAction::SetTrue)]
    geodetic: bool,

    /// JSON file with an alternative ellipsoid model (default: built-in Earth, no file read)
    #[arg(long, value_name = "FILE")]
    model: Option<PathBuf>,

    /// Log solver details to stderr
    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,
}

/// Initialize the logger from RUST_LOG (default warn); `verbose` forces debug
fn init_logger(verbose: bool) {
    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or("warn"));
    if verbose {
        builder.filter_level(LevelFilter::Debug);
    }
    builder.init();
}

fn print_point(point: Cartesian3, model: &EllipsoidModel, geodetic: bool) {
    if geodetic {
        let g = Geodetic::from_cartesian(point, model, GEODETIC_ITERATIONS);
        println!("{:?}", g.lat * RAD2DEG);
        println!("{:?}", g.lon * RAD2DEG);
        println!("{:?}", g.h);
    } else {
        println!("{:?}", point.x);
        println!("{:?}", point.y);
        println!("{:?}", point.z);
    }
}

fn run(args: Args) -> Result<()> {
    let model = match &args.model {
        Some(path) => EllipsoidModel::from_json_file(path)?,
        None => EllipsoidModel::earth(),
    };
    log::debug!("Using {:?}", model);

    let direction = Cartesian3::new(args.d_l_x, args.d_l_y, args.d_l_z);
    let origin = Cartesian3::new(args.c_l_x, args.c_l_y, args.c_l_z);

    match solve(direction, origin, &model)? {
        IntersectionResult::Point(point) => print_point(point, &model, args.geodetic),
        IntersectionResult::NoIntersection => log::info!("No intersection"),
    }
    Ok(())
}

fn main() {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.exit()
        }
        Err(err) => {
            // Wrong argument count or a non-numeric value: usage only, no computation
            eprintln!("{}", err.kind().as_str().unwrap_or("invalid arguments"));
            println!("{}", Args::command().render_usage());
            return;
        }
    };

    init_logger(args.verbose);

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
