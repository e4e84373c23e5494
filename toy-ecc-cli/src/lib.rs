pub mod config;

use anyhow::{ensure, Context};
use log::info;
use structopt::StructOpt;
use toy_ecc::exchange::Keypair;
use toy_ecc::order::point_order;
use toy_ecc::{CurveParameters, EllipticCurve, Point};

use std::fmt::Write;
use std::fs::File;
use std::path::PathBuf;

#[derive(StructOpt, Debug)]
#[structopt(about = "brute-force arithmetic on tiny elliptic curves")]
pub struct Opt {
    #[structopt(short, long, allow_hyphen_values = true, help = "coefficient a (overrides CURVE_A)")]
    pub a: Option<i64>,
    #[structopt(short, long, allow_hyphen_values = true, help = "coefficient b (overrides CURVE_B)")]
    pub b: Option<i64>,
    #[structopt(short, long, help = "field prime (overrides CURVE_PRIME)")]
    pub prime: Option<u64>,
    #[structopt(subcommand)]
    pub command: Command,
}

#[derive(StructOpt, Debug)]
pub enum Command {
    /// Prints the evaluation table of the curve equation
    Report,
    /// Lists every enumerated point
    Points,
    /// Adds two affine points given as `x,y`
    Add {
        #[structopt(parse(try_from_str = parse_point))]
        lhs: (i64, i64),
        #[structopt(parse(try_from_str = parse_point))]
        rhs: (i64, i64),
    },
    /// Runs the generator test and computes the order of a point
    Generator {
        #[structopt(parse(try_from_str = parse_point))]
        point: (i64, i64),
    },
    /// Writes the point set as JSON
    Export {
        #[structopt(long, help = "output file, stdout when omitted")]
        out: Option<PathBuf>,
    },
    /// Derives both public keys and the shared point of a toy key agreement
    Exchange {
        #[structopt(long, parse(try_from_str = parse_point), help = "base point as x,y")]
        generator: (i64, i64),
        #[structopt(long, help = "first private key")]
        alice: u64,
        #[structopt(long, help = "second private key")]
        bob: u64,
    },
}

pub fn parse_point(input: &str) -> Result<(i64, i64), String> {
    let (x, y) = input
        .split_once(',')
        .ok_or_else(|| format!("expected x,y but got {:?}", input))?;
    let x = x.trim().parse().map_err(|e| format!("invalid x: {}", e))?;
    let y = y.trim().parse().map_err(|e| format!("invalid y: {}", e))?;
    Ok((x, y))
}

/// Command line flags take precedence over the loaded settings.
pub fn resolve_parameters(
    opt: &Opt,
    settings: &config::Settings,
) -> anyhow::Result<CurveParameters> {
    let a = opt.a.unwrap_or(settings.a);
    let b = opt.b.unwrap_or(settings.b);
    let prime = opt.prime.unwrap_or(settings.prime);
    CurveParameters::new(a, b, prime)
        .with_context(|| format!("invalid curve a = {}, b = {}, prime = {}", a, b, prime))
}

pub fn run(opt: Opt, settings: config::Settings) -> anyhow::Result<String> {
    let params = resolve_parameters(&opt, &settings)?;
    info!("using curve {}", params);
    let curve = EllipticCurve::from(params);
    let law = curve.group_law();
    let mut out = String::new();

    match opt.command {
        Command::Report => out.push_str(&curve.evaluation_table_report()),
        Command::Points => {
            for point in curve.curve_points() {
                writeln!(out, "{}", point)?;
            }
            writeln!(out, "{} points", curve.curve_points().len())?;
        }
        Command::Add { lhs, rhs } => {
            let lhs = law.point(lhs.0, lhs.1);
            let rhs = law.point(rhs.0, rhs.1);
            let sum = law
                .checked_add(&lhs, &rhs)
                .with_context(|| format!("failed to add {} and {}", lhs, rhs))?;
            writeln!(out, "{} + {} = {}", lhs, rhs, sum)?;
        }
        Command::Generator { point } => {
            let point = law.point(point.0, point.1);
            let is_generator = curve.is_generator(&point)?;
            let order = point_order(&law, &point)?;
            writeln!(out, "generator: {}", is_generator)?;
            writeln!(out, "order: {}", order)?;
        }
        Command::Export { out: path } => {
            let export = curve.export();
            match path {
                Some(path) => {
                    let file = File::create(&path)
                        .with_context(|| format!("failed to create {}", path.display()))?;
                    serde_json::to_writer_pretty(file, &export)?;
                    writeln!(out, "wrote {} points to {}", export.points.len(), path.display())?;
                }
                None => out.push_str(&serde_json::to_string_pretty(&export)?),
            }
        }
        Command::Exchange {
            generator,
            alice,
            bob,
        } => {
            let generator = law.point(generator.0, generator.1);
            ensure!(curve.contains(&generator), "{} is not a listed curve point", generator);
            let alice = Keypair::new(&law, &generator, alice)?;
            let bob = Keypair::new(&law, &generator, bob)?;
            let shared = alice.shared_secret(&law, bob.pubkey())?;
            ensure!(
                shared == bob.shared_secret(&law, alice.pubkey())?,
                "key agreement mismatch"
            );
            writeln!(out, "alice public: {}", alice.pubkey())?;
            writeln!(out, "bob public: {}", bob.pubkey())?;
            writeln!(out, "shared: {}", shared)?;
        }
    }
    Ok(out)
}
