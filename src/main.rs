use dotenvy::dotenv;
use secret_recovery::{
    Config,
    testcase::{Report, source::FileSystemInputSource},
};
use tracing::{error, info, level_filters::LevelFilter};
use tracing_subscriber::{Layer, layer::SubscriberExt, util::SubscriberInitExt};

// Recovers the secret of every configured test case and prints one line per test case.
// Run via
// ```
// cargo run -- [input1.json input2.json ...]
// ```
fn main() -> Result<(), anyhow::Error> {
    if let Err(err) = dotenv()
        && !err.not_found()
    {
        return Err(anyhow::anyhow!("Error while loading .env file: {err}"));
    }

    let mut config = match Config::parse_environment() {
        Ok(c) => c,
        Err(e) => {
            return Err(anyhow::anyhow!(
                "Failed to parse environment variables for configuration: {e}"
            ));
        }
    };
    let args = std::env::args().skip(1).collect::<Vec<String>>();
    if !args.is_empty() {
        config = config.with_input_files(args)?;
    }

    // Logs go to stderr, stdout only carries the secrets
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_filter(Into::<LevelFilter>::into(config.log_level)),
        )
        .init();

    info!(
        "Processing {} test case(s) from {}",
        config.input_files.len(),
        config.input_dir.display()
    );

    let source = FileSystemInputSource::new(&config.input_dir);
    let mut failures = 0;
    for (i, name) in config.input_files.iter().enumerate() {
        let report = Report::run(&source, i + 1, name);
        if let Err(e) = &report.outcome {
            if report.is_failure() {
                failures += 1;
                error!("Test case {name} failed: {e}");
            } else {
                info!("Test case {name} skipped: {e}");
            }
        }
        println!("{report}");
    }

    if failures > 0 {
        return Err(anyhow::anyhow!(
            "{failures} test case(s) could not be recovered"
        ));
    }

    Ok(())
}
