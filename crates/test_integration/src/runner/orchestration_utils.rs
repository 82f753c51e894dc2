use color_eyre::Result;
use color_eyre::eyre::eyre;
use colored::*;
use std::future::Future;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

#[macro_export]
macro_rules! run_test {
    ($call:expr) => {
        $crate::runner::orchestration_utils::run_test_impl(stringify!($call), $call)
    };
}

/// Runs every listed test against `$context`, even after a failure, then prints a summary and
/// fails if any test did.
#[macro_export]
macro_rules! execute_suite {
    ($context:expr, [ $($test_fn:ident),* $(,)? ]) => {{
        let mut report = $crate::runner::orchestration_utils::SuiteReport::new(
            $context.backend.to_string(),
            $context.movie_count,
        );
        $(
            let (name, result) = run_test!($test_fn($context)).await;
            report.record(name, result);
        )*
        report.finish()
    }};
}

/// Pass/fail bookkeeping for one suite run.
pub struct SuiteReport {
    backend: String,
    movie_count: usize,
    passed: usize,
    failed: Vec<String>,
    started: Instant,
}

impl SuiteReport {
    pub fn new(backend: String, movie_count: usize) -> Self {
        println!();
        println!(
            "{} {} store, {} seeded movies",
            " SUITE ".on_blue().black().bold(),
            backend.blue().bold(),
            movie_count
        );
        Self {
            backend,
            movie_count,
            passed: 0,
            failed: Vec::new(),
            started: Instant::now(),
        }
    }

    pub fn record(&mut self, name: String, result: Result<()>) {
        match result {
            Ok(()) => self.passed += 1,
            Err(_) => self.failed.push(name),
        }
    }

    pub fn finish(self) -> Result<()> {
        let total = self.passed + self.failed.len();
        println!("{}", "─".repeat(60).truecolor(80, 80, 80));
        println!(
            "{} {}/{} tests passed against the {} store ({} movies) in {:.2?}.",
            " SUMMARY ".on_purple().black().bold(),
            self.passed,
            total,
            self.backend,
            self.movie_count,
            self.started.elapsed()
        );
        for name in &self.failed {
            println!("  {} {}", "✗".red().bold(), name.red());
        }
        println!("{}", "─".repeat(60).truecolor(80, 80, 80));
        println!();

        if self.failed.is_empty() {
            Ok(())
        } else {
            Err(eyre!(
                "{} of {} tests failed against the {} store: {}",
                self.failed.len(),
                total,
                self.backend,
                self.failed.join(", ")
            ))
        }
    }
}

/// Runs one test, printing its outcome. Returns the short test name with the result.
pub async fn run_test_impl<Fut>(raw_name: &str, test: Fut) -> (String, Result<()>)
where
    Fut: Future<Output = Result<()>>,
{
    let name = short_name(raw_name).to_owned();
    println!("{}", "─".repeat(60).truecolor(80, 80, 80));
    println!("{} {}", " RUNNING ".on_cyan().black().bold(), name.cyan().bold());

    let start_time = Instant::now();
    let result = test.await;
    print_outcome(&name, &result, start_time.elapsed());

    (name, result)
}

/// `tests::test_movies::test_year_window(&context)` → `test_year_window`.
fn short_name(raw_name: &str) -> &str {
    let name_no_args = raw_name.split('(').next().unwrap_or(raw_name);
    name_no_args
        .rsplit("::")
        .next()
        .unwrap_or(name_no_args)
        .trim()
}

fn print_outcome(name: &str, result: &Result<()>, elapsed: Duration) {
    match result {
        Ok(()) => println!(
            "{} {} ({:.2?})",
            " PASSED ".on_green().black().bold(),
            name.green(),
            elapsed
        ),
        Err(e) => {
            println!(
                "{} {} ({:.2?})",
                " FAILED ".on_red().black().bold(),
                name.red(),
                elapsed
            );
            println!("\n{e:?}");
        }
    }
}

/// Installs the subscriber and `color_eyre` once per test binary; later calls are no-ops.
pub fn setup_tracing_and_panic_handling() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        "info,api=debug,common_services=debug,sqlx=warn,tower_http=warn,hyper=error,reqwest=error"
            .into()
    });

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .compact()
        .with_target(false)
        .try_init();
    let _ = color_eyre::install();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_names_drop_paths_and_arguments() {
        assert_eq!(
            short_name("crate::tests::test_movies::test_year_window(&context)"),
            "test_year_window"
        );
        assert_eq!(short_name("test_root_status(ctx)"), "test_root_status");
    }

    #[test]
    fn any_failure_fails_the_suite() {
        let mut report = SuiteReport::new("memory".to_owned(), 4);
        report.record("passes".to_owned(), Ok(()));
        report.record("breaks".to_owned(), Err(eyre!("boom")));

        let error = report.finish().unwrap_err();
        assert!(error.to_string().contains("1 of 2 tests failed"));
        assert!(error.to_string().contains("breaks"));
    }
}
