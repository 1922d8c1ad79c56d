use std::str::FromStr;

use num_bigint::BigInt;
use num_traits::Zero;
use secret_recovery::{
    recovery::{self, decoder},
    testcase::{Keys, PointRecord, TestCaseRecord},
};

// This binary generates a test case: a random polynomial of degree k - 1 is evaluated
// at x = 1..=n and every value is written in its own base.
// The JSON test case is printed on stdout, the secret on stderr.
// Run via
// ```
// cargo run --bin new_testcase -- n=<n> k=<k> [base=<base>] [secret=<decimal secret>]
// ```
fn main() -> Result<(), anyhow::Error> {
    let args = std::env::args().skip(1).collect::<Vec<String>>();
    let n = parse_argument::<usize>(&args, "n")?
        .ok_or_else(|| anyhow::anyhow!("n argument is required, e.g., n=10"))?;
    let k = parse_argument::<usize>(&args, "k")?
        .ok_or_else(|| anyhow::anyhow!("k argument is required, e.g., k=7"))?;
    if k == 0 || k > n {
        return Err(anyhow::anyhow!("k must be between 1 and n, got k={k} n={n}"));
    }
    let base = parse_argument::<u32>(&args, "base")?;
    let secret = match find_argument(&args, "secret") {
        Some(raw) => recovery::decode(raw, 10)?,
        None => random_coefficient(),
    };

    let coefficients = std::iter::once(secret.clone())
        .chain((1..k).map(|_| random_coefficient()))
        .collect::<Vec<BigInt>>();

    let mut points = Vec::with_capacity(n);
    for x in 1..=n {
        let x = i64::try_from(x)?;
        let base = base.unwrap_or_else(|| rand::random_range(decoder::MIN_BASE..=decoder::MAX_BASE));
        let y = evaluate(&coefficients, x);
        points.push(PointRecord {
            x,
            base,
            value: recovery::encode(&y, base)?,
        });
    }

    let record = TestCaseRecord {
        keys: Keys { n, k },
        points,
    };
    println!("{}", serde_json::to_string_pretty(&record)?);
    eprintln!("Generated test case with secret: {secret}");

    Ok(())
}

fn find_argument<'a>(args: &'a [String], name: &str) -> Option<&'a str> {
    args.iter()
        .find_map(|arg| arg.strip_prefix(name)?.strip_prefix('='))
}

fn parse_argument<T>(args: &[String], name: &str) -> Result<Option<T>, anyhow::Error>
where
    T: FromStr,
    <T as FromStr>::Err: std::error::Error + Send + Sync + 'static,
{
    find_argument(args, name)
        .map(|v| {
            v.trim()
                .parse::<T>()
                .map_err(|e| anyhow::anyhow!("[{name}]: {e}"))
        })
        .transpose()
}

fn random_coefficient() -> BigInt {
    BigInt::from(rand::random::<u128>()) * rand::random::<u64>()
}

fn evaluate(coefficients: &[BigInt], x: i64) -> BigInt {
    let x = BigInt::from(x);
    coefficients
        .iter()
        .rev()
        .fold(BigInt::zero(), |acc, c| acc * &x + c)
}
