use chrono::Utc;
use duecycle::BillingCycle;

fn main() -> Result<(), duecycle::BillingCycleError> {
    let now = Utc::now();
    let cycle = BillingCycle::new(now - chrono::TimeDelta::days(40), 1, "quarter")?;

    println!("schedule: {cycle}");
    println!("cycles completed: {}", cycle.cycles_since_anchor(now));
    println!("next due: {}", cycle.next_due_at(now));

    for due in cycle.next_due_dates(4, now) {
        println!("upcoming: {due}");
    }

    if let Some(period) = cycle.current_period(now) {
        println!("current period: {period} ({} days)", period.duration_days());
        println!(
            "progress: {:.1}% elapsed, {:.1}% remaining",
            cycle.percent_elapsed(now).unwrap_or(0.0),
            cycle.percent_remaining(now).unwrap_or(0.0)
        );
    }

    Ok(())
}
