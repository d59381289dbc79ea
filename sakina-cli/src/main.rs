//! Sakina CLI — audition ambient channels and mood soundscapes from a terminal.

use sakina_engine::{AmbienceEngine, Channel, EngineConfig};
use std::error::Error;
use std::time::Duration;

#[derive(Debug, Default)]
struct Args {
    list_devices: bool,
    device_name: Option<String>,
    sample_rate: Option<u32>,
    duration_sec: Option<u64>,
    mood: Option<String>,
    crackle: bool,
    // ambient channel volumes, percent 0..=100
    rain: Option<u8>,
    forest: Option<u8>,
    ocean: Option<u8>,
    fire: Option<u8>,
}

fn parse_args() -> Args {
    let mut a = Args::default();
    for s in std::env::args().skip(1) {
        if s == "--list-devices" { a.list_devices = true; continue; }
        if s == "--crackle"      { a.crackle = true;      continue; }
        if let Some(rest) = s.strip_prefix("--device=")      { a.device_name  = Some(rest.to_string()); continue; }
        if let Some(rest) = s.strip_prefix("--sample-rate=") { a.sample_rate  = rest.parse().ok();      continue; }
        if let Some(rest) = s.strip_prefix("--duration=")    { a.duration_sec = rest.parse().ok();      continue; }
        if let Some(rest) = s.strip_prefix("--mood=")        { a.mood         = Some(rest.to_string()); continue; }
        if let Some(rest) = s.strip_prefix("--rain=")        { a.rain         = rest.parse().ok();      continue; }
        if let Some(rest) = s.strip_prefix("--forest=")      { a.forest       = rest.parse().ok();      continue; }
        if let Some(rest) = s.strip_prefix("--ocean=")       { a.ocean        = rest.parse().ok();      continue; }
        if let Some(rest) = s.strip_prefix("--fire=")        { a.fire         = rest.parse().ok();      continue; }
        eprintln!("[warn] unknown arg: {s}");
    }
    a
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = parse_args();

    if args.list_devices {
        println!("Available output devices:");
        for name in sakina_engine::graph::list_output_devices()? {
            println!("- {name}");
        }
        return Ok(());
    }

    println!("sakina-cli — procedural ambience player\n");

    let mut engine = AmbienceEngine::new(EngineConfig {
        device_name: args.device_name.clone(),
        sample_rate: args.sample_rate,
        headless: false,
    });

    let channels = [
        (Channel::Rain, args.rain),
        (Channel::Forest, args.forest),
        (Channel::Ocean, args.ocean),
        (Channel::Fire, args.fire),
    ];
    let mut any_channel = false;
    for (ch, level) in channels {
        if let Some(percent) = level {
            engine.request_channel_volume(ch.name(), percent);
            println!("Channel {}: {}%", ch.name(), percent.min(100));
            any_channel = true;
        }
    }

    // The soundscape starts when a mood is requested, or by default when no
    // ambient channel was asked for either.
    if args.mood.is_some() || !any_channel {
        let active = engine.request_toggle();
        if let Some(signal) = &args.mood {
            engine.request_mood(signal);
        }
        println!(
            "Soundscape: {} ({})",
            engine.current_mood().name(),
            if active { "playing" } else { "paused" }
        );
    }

    if args.crackle {
        engine.request_crackle();
        println!("Crackle effect layered in");
    }

    println!("Sample rate: {} Hz", engine.runtime().sample_rate());
    if let Some(d) = args.duration_sec {
        println!("Auto-stop after {d} seconds");
        std::thread::sleep(Duration::from_secs(d));
        return Ok(());
    }

    println!("Press Ctrl+C to stop…");
    loop {
        std::thread::sleep(Duration::from_millis(500));
    }
}
