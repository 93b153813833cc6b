//! dashboard-runner: headless driver for the Beef Ops ROI dashboard.
//!
//! Usage:
//!   dashboard-runner
//!   dashboard-runner --set price_per_kg=450 --set waste_cut_pp=2 --json
//!   dashboard-runner --data-dir ./data --ipc-mode

use anyhow::{Context, Result};
use beefops_core::{
    command::DashboardCommand,
    config::DashboardConfig,
    engine::Dashboard,
    event::DashboardEvent,
    format::format_mxn,
    kpi::KpiCard,
    snapshot::DashboardSnapshot,
};
use std::env;
use std::io::{self, BufRead, Write};

#[derive(serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum IpcCommand {
    GetState,
    Command { command: DashboardCommand },
    Quit,
}

#[derive(serde::Serialize)]
struct IpcReply<'a> {
    events:   &'a [DashboardEvent],
    snapshot: DashboardSnapshot,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let ipc_mode = args.iter().any(|a| a == "--ipc-mode");
    let json = args.iter().any(|a| a == "--json");
    let data_dir = args
        .windows(2)
        .find(|w| w[0] == "--data-dir")
        .map(|w| w[1].as_str());

    let config = match data_dir {
        Some(dir) => DashboardConfig::load(dir)
            .with_context(|| format!("loading dataset from {dir}"))?,
        None => DashboardConfig::default(),
    };
    let mut dashboard = Dashboard::new(config);

    for assignment in set_args(&args) {
        let command = parse_assignment(assignment)?;
        dashboard.apply(command)?;
    }

    if ipc_mode {
        run_ipc_loop(&mut dashboard)?;
    } else if json {
        println!("{}", serde_json::to_string_pretty(&dashboard.snapshot())?);
    } else {
        print_dashboard(&dashboard.snapshot());
    }

    Ok(())
}

fn run_ipc_loop(dashboard: &mut Dashboard) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();

    loop {
        buffer.clear();
        let bytes_read = handle.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }
        if buffer.trim().is_empty() {
            continue;
        }

        let cmd: IpcCommand = match serde_json::from_str(&buffer) {
            Ok(c) => c,
            Err(e) => {
                write_error(&mut stdout, &e.to_string())?;
                continue;
            }
        };

        match cmd {
            IpcCommand::Quit => break,
            IpcCommand::GetState => {
                let reply = IpcReply { events: &[], snapshot: dashboard.snapshot() };
                writeln!(stdout, "{}", serde_json::to_string(&reply)?)?;
            }
            IpcCommand::Command { command } => match dashboard.apply(command) {
                Ok(events) => {
                    let reply = IpcReply { events: &events, snapshot: dashboard.snapshot() };
                    writeln!(stdout, "{}", serde_json::to_string(&reply)?)?;
                }
                Err(e) => {
                    log::warn!("Command rejected: {e}");
                    write_error(&mut stdout, &e.to_string())?;
                }
            },
        }
        stdout.flush()?;
    }
    Ok(())
}

fn write_error(out: &mut impl Write, message: &str) -> Result<()> {
    let err_json = serde_json::json!({ "error": message });
    writeln!(out, "{err_json}")?;
    out.flush()?;
    Ok(())
}

fn set_args(args: &[String]) -> impl Iterator<Item = &str> {
    args.windows(2)
        .filter(|w| w[0] == "--set")
        .map(|w| w[1].as_str())
}

/// Parse `name=value` into a SetAssumption command.
fn parse_assignment(assignment: &str) -> Result<DashboardCommand> {
    let (name, value) = assignment
        .split_once('=')
        .with_context(|| format!("--set expects name=value, got '{assignment}'"))?;
    let parameter = name.trim().parse()?;
    let value: f64 = value
        .trim()
        .parse()
        .with_context(|| format!("'{value}' is not a number"))?;
    Ok(DashboardCommand::SetAssumption { parameter, value })
}

fn print_dashboard(snapshot: &DashboardSnapshot) {
    println!("Beef Ops ROI Dashboard");
    println!("  generated: {}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S"));
    println!();

    println!("=== ASSUMPTIONS ===");
    for a in &snapshot.assumptions {
        println!("  {:<26} {}", a.label, a.display);
    }
    println!();

    println!("=== MACRO ROI ===");
    print_cards(&snapshot.macro_cards);
    println!();

    println!("=== CAMPAIGN ===");
    println!("  {:<8} {:>9} {:>7} {:>13} {:>10} {:>8}",
        "week", "whatsapp", "email", "interactions", "purchases", "conv %");
    for r in &snapshot.campaign.rows {
        println!(
            "  {:<8} {:>9} {:>7} {:>13} {:>10} {:>8.1}",
            r.label, r.whatsapp, r.email, r.interactions, r.purchases, r.conversion_pct
        );
    }
    print_cards(&snapshot.campaign_cards);
    println!();

    println!("=== MONTHLY UPSELL ===");
    for view in &snapshot.channels {
        print_cards(std::slice::from_ref(&view.card));
        println!(
            "    base total: {}",
            format_mxn(view.projection.summary.base_total)
        );
    }
    println!();
    println!("{}", snapshot.footer);
}

fn print_cards(cards: &[KpiCard]) {
    for card in cards {
        match &card.delta {
            Some(delta) => {
                let arrow = if card.good { "+" } else { "-" };
                println!("  {:<44} {:>20}  [{arrow}] {delta}", card.title, card.value);
            }
            None => println!("  {:<44} {:>20}", card.title, card.value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use beefops_core::assumptions::Parameter;

    #[test]
    fn parses_name_value_assignment() {
        let cmd = parse_assignment("price_per_kg=450").unwrap();
        assert_eq!(
            cmd,
            DashboardCommand::SetAssumption { parameter: Parameter::PricePerKg, value: 450.0 }
        );
    }

    #[test]
    fn rejects_malformed_assignments() {
        assert!(parse_assignment("price_per_kg").is_err());
        assert!(parse_assignment("bogus=1").is_err());
        assert!(parse_assignment("price_per_kg=abc").is_err());
    }

    #[test]
    fn collects_repeated_set_flags() {
        let args: Vec<String> = ["runner", "--set", "a=1", "--json", "--set", "b=2"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let sets: Vec<&str> = set_args(&args).collect();
        assert_eq!(sets, vec!["a=1", "b=2"]);
    }
}
