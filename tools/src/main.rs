//! forge-runner: headless runner for Future Forge.
//!
//! Usage:
//!   forge-runner --seed 12345 --turns 36 --contribution 5000
//!   forge-runner --seed 12345 --data-dir ./data --pace-ms 800
//!   forge-runner --ipc-mode

use anyhow::Result;
use forge_core::{
    config::ForgeConfig, engine::TurnResult, event::ForgeEvent, format::format_inr,
    ForgeEngine,
};
use std::env;
use std::io::{self, BufRead, Write};
use std::path::Path;
use std::thread;
use std::time::Duration;

#[derive(serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum IpcCommand {
    GetState,
    Advance,
    UseToken,
    SetAllocation { equity: u32, corporate: u32, govt: u32 },
    ApplyPreset { name: String },
    SetContribution { amount: f64 },
    ClaimInflationBonus { score: u32 },
    Projection { contribution: f64, months: u32 },
    RetirementAge { contribution: f64 },
    Quit,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let seed = parse_arg(&args, "--seed", 42u64);
    let turns = parse_arg(&args, "--turns", 36u32);
    let contribution = parse_arg(&args, "--contribution", 5_000.0f64);
    let pace_ms = parse_arg(&args, "--pace-ms", 0u64);
    let ipc_mode = args.iter().any(|a| a == "--ipc-mode");
    let data_dir = args
        .windows(2)
        .find(|w| w[0] == "--data-dir")
        .map(|w| w[1].as_str())
        .unwrap_or("./data");

    let config = if Path::new(data_dir).exists() {
        ForgeConfig::load(data_dir)?
    } else {
        log::warn!("data dir {data_dir} not found, using built-in config");
        ForgeConfig::default()
    };

    let session_id = format!("session-{seed}");
    let mut engine = ForgeEngine::new(session_id, seed, config)?;

    if ipc_mode {
        return run_ipc_loop(&mut engine);
    }

    println!("Future Forge — forge-runner");
    println!("  seed:          {seed}");
    println!("  turns:         {turns}");
    println!("  contribution:  {}", format_inr(contribution));
    println!("  data_dir:      {data_dir}");
    println!();

    engine.set_monthly_contribution(contribution)?;
    let pause = Duration::from_millis(pace_ms);
    for _ in 0..turns {
        let result = play_turn(&mut engine, pause)?;
        print_turn(&result);
    }
    print_summary(&engine);
    Ok(())
}

/// One turn with the UI's two pauses around the mutation.
fn play_turn(engine: &mut ForgeEngine, pause: Duration) -> Result<TurnResult> {
    engine.begin_turn()?;
    thread::sleep(pause);
    let mut result = engine.resolve_turn()?;
    thread::sleep(pause / 2);
    result.snapshot = engine.finish_turn()?;
    Ok(result)
}

fn run_ipc_loop(engine: &mut ForgeEngine) -> Result<()> {
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
                writeln!(stdout, "{}", serde_json::json!({ "error": e.to_string() }))?;
                stdout.flush()?;
                continue;
            }
        };

        if matches!(cmd, IpcCommand::Quit) {
            break;
        }

        let response = match handle_command(engine, cmd) {
            Ok(value) => value,
            Err(e) => serde_json::json!({ "error": e.to_string() }),
        };
        writeln!(stdout, "{response}")?;
        stdout.flush()?;
    }
    Ok(())
}

fn handle_command(engine: &mut ForgeEngine, cmd: IpcCommand) -> Result<serde_json::Value> {
    let value = match cmd {
        IpcCommand::GetState => serde_json::to_value(engine.view())?,
        IpcCommand::Advance => {
            let result = engine.advance_turn()?;
            serde_json::json!({ "snapshot": result.snapshot, "events": result.events })
        }
        IpcCommand::UseToken => serde_json::to_value(engine.use_protection_token()?)?,
        IpcCommand::SetAllocation { equity, corporate, govt } => {
            serde_json::to_value(engine.set_allocation(equity, corporate, govt)?)?
        }
        IpcCommand::ApplyPreset { name } => serde_json::to_value(engine.apply_preset(&name)?)?,
        IpcCommand::SetContribution { amount } => {
            serde_json::to_value(engine.set_monthly_contribution(amount)?)?
        }
        IpcCommand::ClaimInflationBonus { score } => {
            serde_json::to_value(engine.claim_inflation_bonus(score)?)?
        }
        IpcCommand::Projection { contribution, months } => {
            serde_json::json!({ "corpus": engine.projection(contribution, months)? })
        }
        IpcCommand::RetirementAge { contribution } => {
            serde_json::json!({ "age": engine.retirement_age(contribution)? })
        }
        IpcCommand::Quit => serde_json::Value::Null,
    };
    Ok(value)
}

fn print_turn(result: &TurnResult) {
    let s = &result.snapshot;
    println!(
        "  month {:>3} | corpus {:>10} | resilience {:>5.1} vs shadow {:>5.1} | streak {}",
        s.month,
        format_inr(s.total_corpus),
        s.resilience,
        s.shadow_resilience,
        s.streak_count
    );
    for event in &result.events {
        match event {
            ForgeEvent::StreakBonus { streak, .. } => {
                println!("            🔥 {streak}-month streak!");
            }
            ForgeEvent::StageTransition { headline, .. } => {
                println!("            {headline}");
            }
            ForgeEvent::LifeShockResolved { outcome, .. } => {
                println!(
                    "            {} {}: you -{:.1}, shadow -{:.1} (corpus absorbed {:.0}%)",
                    outcome.shock.icon,
                    outcome.shock.label,
                    outcome.future_damage,
                    outcome.shadow_damage,
                    outcome.corpus_protection * 100.0
                );
            }
            _ => {}
        }
    }
}

fn print_summary(engine: &ForgeEngine) {
    let view = engine.view();
    let d = &view.dashboard;

    println!();
    println!("=== SESSION SUMMARY ===");
    println!("  session:          {}", view.session_id);
    println!("  months played:    {}", view.month);
    println!("  stage:            {}", view.evolution_stage.label());
    println!("  corpus:           {}", format_inr(view.total_corpus));
    println!("  total saved:      {}", format_inr(view.total_saved));
    println!("  resilience:       {:.1} (shadow {:.1})", view.resilience, view.shadow_resilience);
    println!("  divergence:       {}", view.divergence_score);
    println!("  streak / tokens:  {} / {}", view.streak_count, view.protection_tokens);
    println!("  freedom days:     {}", view.freedom_days_remaining);
    println!("  guild:            {:.1}%", view.guild_percent());

    println!();
    println!("=== NPS DASHBOARD ===");
    println!("  tier I:           {}", format_inr(d.tier1));
    println!("  tier II:          {}", format_inr(d.tier2));
    println!("  at retirement:    {}", format_inr(d.projected_at_retirement));
    println!("  retirement age:   {}", view.projected_retirement_age);
    println!("  tax saved:        {}", format_inr(d.tax_saved));
    println!("  expected return:  {:.1}%", d.expected_return * 100.0);
    println!("  journal entries:  {}", engine.journal().len());
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}
