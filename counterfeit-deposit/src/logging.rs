use std::time::Duration;

use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::{fmt, EnvFilter};

/// Install a stderr subscriber. `RUST_LOG` wins over `level` when set.
pub fn init_logging(level: Level) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_span_events(FmtSpan::NONE)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    // A subscriber may already be installed (tests, embedding callers).
    let _ = tracing::subscriber::set_global_default(subscriber);
}

/// `COUNTERFEIT_PROFILE=1|true` turns on phase timing output.
pub fn profile_enabled() -> bool {
    profile_flag(std::env::var("COUNTERFEIT_PROFILE").ok().as_deref())
}

fn profile_flag(value: Option<&str>) -> bool {
    value
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

pub fn profile_line(phase: &str, elapsed: Duration) -> String {
    format!("[profile] {phase}: {:.3}s", elapsed.as_secs_f64())
}

/// Phase timings go straight to stderr, independent of the log filter.
pub fn report_profile(enabled: bool, phase: &str, elapsed: Duration) -> Option<String> {
    if !enabled {
        return None;
    }
    let line = profile_line(phase, elapsed);
    eprintln!("{line}");
    Some(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_flag() {
        assert!(profile_flag(Some("1")));
        assert!(profile_flag(Some("TRUE")));
        assert!(profile_flag(Some("true")));
        assert!(!profile_flag(Some("0")));
        assert!(!profile_flag(Some("yes")));
        assert!(!profile_flag(None));
    }

    #[test]
    fn test_report_profile() {
        let elapsed = Duration::from_millis(1250);
        assert_eq!(
            report_profile(true, "sweep", elapsed).as_deref(),
            Some("[profile] sweep: 1.250s")
        );
        assert_eq!(report_profile(false, "sweep", elapsed), None);
    }
}
