use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info};
use std::path::PathBuf;

use hiring_sim::assets::AssetCatalog;
use hiring_sim::ml::{PeopleLine, WeightedModel};
use hiring_sim::office::{
    AutoPlayer, Decision, EventBus, GameEvent, OfficeConfig, OfficeGame, PersonColor, RecordSource,
    Viewport, DEFAULT_RECORD_COUNT,
};

#[derive(Parser)]
#[command(name = "hiring_sim")]
#[command(about = "Office hiring game with optional UI")]
struct Cli {
    /// Run with the Bevy game engine UI
    #[arg(long)]
    ui: bool,

    /// Seed used to generate candidate records
    #[arg(long, default_value = "7")]
    seed: u64,

    /// JSON file with candidate records (generated when omitted)
    #[arg(long)]
    records: Option<PathBuf>,

    /// JSON file overriding the office layout or stages
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory the asset manifest is resolved against
    #[arg(long)]
    assets: Option<PathBuf>,

    /// Time delta per tick in milliseconds
    #[arg(long, default_value = "100")]
    delta_ms: u64,

    /// Maximum number of ticks in headless mode
    #[arg(long, default_value = "5000")]
    max_ticks: u32,

    /// CV score the scripted player hires at
    #[arg(long, default_value = "20")]
    accept_threshold: u32,

    /// People the trained model screens in the ML lab
    #[arg(long, default_value = "12")]
    ml_evaluations: usize,
}

fn main() {
    let cli = Cli::parse();

    if cli.ui {
        #[cfg(feature = "ui")]
        {
            if let Err(e) = run_with_ui(&cli) {
                eprintln!("Error: {:#}", e);
                std::process::exit(1);
            }
        }
        #[cfg(not(feature = "ui"))]
        {
            eprintln!("Error: UI feature is not enabled. Rebuild with --features ui");
            std::process::exit(1);
        }
    } else {
        env_logger::Builder::from_env(
            env_logger::Env::default().default_filter_or("warn,hiring_sim=info"),
        )
        .init();

        if let Err(e) = run_headless(&cli) {
            error!("{:#}", e);
            std::process::exit(1);
        }
    }
}

fn load_game(cli: &Cli) -> Result<OfficeGame> {
    let config = match &cli.config {
        Some(path) => OfficeConfig::load(path)?,
        None => OfficeConfig::default(),
    };
    let records = match &cli.records {
        Some(path) => RecordSource::load(path)?,
        None => RecordSource::generate(DEFAULT_RECORD_COUNT, cli.seed),
    };
    Ok(OfficeGame::new(config, records))
}

/// Play the office with the scripted player, then screen people with a model
/// trained on the hires (no graphics)
fn run_headless(cli: &Cli) -> Result<()> {
    println!("Running office hiring game in headless mode...");
    println!("Seed: {}, Delta: {}ms", cli.seed, cli.delta_ms);
    println!();

    let mut catalog = AssetCatalog::with_default_manifest();
    catalog
        .load(cli.assets.as_deref())
        .context("Failed to load assets")?;

    let mut game = load_game(cli)?;
    let player = AutoPlayer::new(cli.accept_threshold);

    println!("Initial state:");
    println!("{}", game.summary());
    println!();

    let mut ticks = 0;
    let mut last_stage = game.office().current_stage();
    while !game.is_finished() && ticks < cli.max_ticks {
        player.act(&mut game)?;
        game.tick(cli.delta_ms)?;
        ticks += 1;

        if game.office().current_stage() != last_stage {
            last_stage = game.office().current_stage();
            println!("--- After tick {} ---", ticks);
            println!("{}", game.summary());
            println!();
        }
    }

    println!("=== Office Final State ===");
    println!("{}", game.summary());
    println!(
        "Stages completed: {}, decisions taken: {}",
        game.completed_stages().len(),
        game.office().decisions().len()
    );
    if !game.is_finished() {
        println!("Stopped after {} ticks before the office was finished", ticks);
    }
    println!();

    run_ml_lab(cli, &game)?;
    game.shutdown();
    Ok(())
}

fn run_ml_lab(cli: &Cli, game: &OfficeGame) -> Result<()> {
    let office_records = game.office().records();
    let model = WeightedModel::train(office_records, &game.hiring_history());
    info!(
        "Trained model: weights {:?}, threshold {:.2}, colour bias {:.2}",
        model.weights, model.threshold, model.color_bias
    );

    let lab_records = RecordSource::generate(DEFAULT_RECORD_COUNT, cli.seed.wrapping_add(1));
    let mut line = PeopleLine::new(Viewport::default(), lab_records)
        .context("Failed to fill the ML lab line")?;
    let mut bus = EventBus::recording();

    for _ in 0..cli.ml_evaluations {
        let tween = line.scroll_tween();
        line.evaluate_first_person(&model, &mut bus)?;
        line.apply_scroll(&tween);
    }

    let mut accepted = [0usize; 2];
    let mut seen = [0usize; 2];
    for event in bus.history() {
        if let GameEvent::DatasetViewNewCv { status, data } = event {
            let slot = match data.color {
                PersonColor::Blue => 0,
                PersonColor::Yellow => 1,
            };
            seen[slot] += 1;
            if *status == Decision::Accepted {
                accepted[slot] += 1;
            }
        }
    }

    println!("=== ML Lab ===");
    println!(
        "Screened {} people | Blue accepted: {}/{} | Yellow accepted: {}/{}",
        line.evaluated().len(),
        accepted[0],
        seen[0],
        accepted[1],
        seen[1]
    );
    Ok(())
}

#[cfg(feature = "ui")]
fn run_with_ui(cli: &Cli) -> Result<()> {
    use bevy::log::LogPlugin;
    use bevy::prelude::*;

    let game = load_game(cli)?;

    println!("Starting Office Hiring UI...");
    println!();
    println!("Controls:");
    println!("  Enter   - Acknowledge instructions / retry");
    println!("  Space   - Call the next person into the spotlight");
    println!("  C       - Read the CV of the person in the spotlight");
    println!("  A / R   - Accept / reject");
    println!("  B       - Send the person back to the line");
    println!("  ESC     - Exit");
    println!();

    App::new()
        .add_plugins(
            DefaultPlugins
                .set(LogPlugin {
                    filter: "warn,hiring_sim=debug".to_string(),
                    level: bevy::log::Level::DEBUG,
                    ..default()
                })
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Office Hiring Game".into(),
                        resolution: (1280, 720).into(),
                        ..default()
                    }),
                    ..default()
                }),
        )
        .insert_resource(hiring_sim::ui::OfficeGameResource(game))
        .add_plugins(hiring_sim::ui::HiringSimUIPlugin)
        .run();
    Ok(())
}
