//! Latency check with a per-channel cooldown.

use std::time::Duration;

use ledgerbot_core::cooldown::{Clock, Cooldown};

use crate::reply::Reply;

/// Answers a ping, or tells the channel how long to wait.
///
/// Closed windows of other channels are dropped first.
pub fn run<C: Clock>(cooldown: &Cooldown<C>, channel_id: u64, latency: Option<Duration>) -> Reply {
    cooldown.prune();
    match cooldown.try_acquire(channel_id) {
        Ok(()) => Reply::Text(format!("Ping! **{}**ms", format_latency(latency))),
        Err(rejection) => Reply::Text(format!(
            "**Try after {} second ",
            format_retry_after(rejection.retry_after)
        )),
    }
}

fn format_latency(latency: Option<Duration>) -> String {
    latency.map_or_else(
        || "N/A".to_string(),
        |d| format!("{:.1}", d.as_secs_f64() * 1000.0),
    )
}

/// Seconds rounded to two decimals, keeping at least one decimal digit.
fn format_retry_after(retry_after: Duration) -> String {
    let text = format!("{:.2}", retry_after.as_secs_f64());
    match text.strip_suffix('0') {
        Some(short) if !short.ends_with('.') => short.to_string(),
        _ => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledgerbot_core::cooldown::ManualClock;
    use rstest::rstest;

    #[test]
    fn test_ping_then_cooldown() {
        let clock = ManualClock::new();
        let cooldown = Cooldown::with_clock(Duration::from_secs(10), clock.clone());

        let first = run(&cooldown, 1, Some(Duration::from_micros(42_340)));
        assert_eq!(first, Reply::text("Ping! **42.3**ms"));

        clock.advance(Duration::from_millis(3_250));
        let second = run(&cooldown, 1, Some(Duration::from_millis(40)));
        assert_eq!(second, Reply::text("**Try after 6.75 second "));
    }

    #[test]
    fn test_unknown_latency() {
        let cooldown = Cooldown::with_clock(Duration::from_secs(10), ManualClock::new());
        assert_eq!(run(&cooldown, 1, None), Reply::text("Ping! **N/A**ms"));
    }

    #[rstest]
    #[case(6_750, "6.75")]
    #[case(7_500, "7.5")]
    #[case(9_000, "9.0")]
    #[case(10, "0.01")]
    fn test_retry_after_format(#[case] millis: u64, #[case] expected: &str) {
        assert_eq!(format_retry_after(Duration::from_millis(millis)), expected);
    }

    #[test]
    fn test_closed_windows_are_dropped() {
        let clock = ManualClock::new();
        let cooldown = Cooldown::with_clock(Duration::from_secs(10), clock.clone());

        run(&cooldown, 1, None);
        run(&cooldown, 2, None);
        assert_eq!(cooldown.tracked_channels(), 2);

        clock.advance(Duration::from_secs(10));
        run(&cooldown, 3, None);

        assert_eq!(cooldown.tracked_channels(), 1);
    }
}
