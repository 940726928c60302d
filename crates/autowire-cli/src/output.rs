use autowire_graphql::{WiringOutcome, WiringReport};
use colored::Colorize;

pub fn print_success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

pub fn print_warning(msg: &str) {
    eprintln!("{} {}", "!".yellow(), msg);
}

pub fn print_error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

pub fn print_json(value: &serde_json::Value) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// One line per wiring decision, grouped by type in walk order.
pub fn print_report(report: &WiringReport) {
    let mut current: Option<&str> = None;
    for event in report.events() {
        if current != Some(event.type_name.as_str()) {
            println!("{}", event.type_name.cyan().bold());
            current = Some(event.type_name.as_str());
        }
        let target = event.field.as_deref().unwrap_or("(type)");
        let component = event.component.as_deref().unwrap_or("-");
        let outcome = match &event.outcome {
            WiringOutcome::Bound => "bound".green(),
            WiringOutcome::Delegated => "delegated".green(),
            WiringOutcome::NotFound => "not found".yellow(),
            WiringOutcome::Failed(reason) => format!("failed: {reason}").as_str().red(),
            WiringOutcome::Skipped => "skipped".dimmed(),
        };
        println!("  {target:<24} {component:<36} {outcome}");
    }
}
