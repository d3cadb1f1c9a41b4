// Mindful Mosaic — CLI entry point.
//
// Generates a mosaic from questionnaire values and writes it to PNG.
// The pipeline: sentiment classification → palette blending → seed
// derivation → tessellation → shading → PNG output.
//
// Usage:
//   cargo run -p mosaic_gen -- [output.png] [--calm N] [--energy N] [--mood N]
//     [--social N] [--control N] [--emotion NAME] [--reflection TEXT]
//     [--size PX] [--input FILE.json] [--palette-table FILE.json] [--share URL]
//
// Emotions: Joy, Anxiety, Anger, Sadness, Hope, Serenity
//
// `--input` reads a full QuestionnaireInput as JSON and overrides the
// individual flags.

use mosaic_gen::config::PaletteTable;
use mosaic_gen::pipeline::{self, RenderOptions};
use mosaic_gen::sentiment::{CachedClassifier, LexiconClassifier};
use mosaic_gen::share;
use mosaic_gen::types::{EmotionKind, QuestionnaireInput};
use std::path::Path;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();

    let output_path = args
        .get(1)
        .filter(|s| !s.starts_with("--"))
        .map(|s| s.as_str())
        .unwrap_or("emotion-mosaic.png");

    // Build the input: either a JSON file or the individual flags.
    let input = if let Some(path) = parse_flag::<String>(&args, "--input") {
        match read_input_json(Path::new(&path)) {
            Ok(input) => input,
            Err(e) => {
                eprintln!("failed to read {path}: {e}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        let emotion_name: String =
            parse_flag(&args, "--emotion").unwrap_or_else(|| "Hope".to_string());
        let emotion = match emotion_name.parse::<EmotionKind>() {
            Ok(emotion) => emotion,
            Err(e) => {
                eprintln!("{e}");
                return ExitCode::FAILURE;
            }
        };
        QuestionnaireInput {
            calm: parse_flag(&args, "--calm").unwrap_or(5),
            energy: parse_flag(&args, "--energy").unwrap_or(5),
            mood: parse_flag(&args, "--mood").unwrap_or(5),
            social: parse_flag(&args, "--social").unwrap_or(5),
            control: parse_flag(&args, "--control").unwrap_or(5),
            emotion,
            reflection: parse_flag(&args, "--reflection")
                .unwrap_or_else(|| "A quiet day of steady, ordinary moments.".to_string()),
        }
    };

    let size: u32 = parse_flag(&args, "--size").unwrap_or(pipeline::DEFAULT_CANVAS_SIZE);

    let table = if let Some(path) = parse_flag::<String>(&args, "--palette-table") {
        match PaletteTable::load(Path::new(&path)) {
            Ok(table) => table,
            Err(e) => {
                eprintln!("{e}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        PaletteTable::builtin()
    };

    println!("=== Mindful Mosaic ===");
    println!("Output: {output_path}");
    println!(
        "Sliders: calm {} / energy {} / mood {} / social {} / control {}",
        input.calm, input.energy, input.mood, input.social, input.control
    );
    println!("Emotion: {}", input.emotion);
    println!();

    println!("[1/3] Classifying sentiment...");
    let mut classifier = CachedClassifier::new(LexiconClassifier);
    let generation = pipeline::generate(input, &mut classifier, &table);
    println!("  {}", generation.insight);
    println!("  Seed: {}", generation.state.seed);

    println!("[2/3] Rendering {size}x{size} mosaic...");
    let canvas = pipeline::render(&generation.state, RenderOptions { size });

    println!("[3/3] Writing PNG...");
    if let Err(e) = canvas.write_png(Path::new(output_path)) {
        eprintln!("failed to write {output_path}: {e}");
        return ExitCode::FAILURE;
    }
    println!("  Wrote {output_path}");

    if let Some(app_url) = parse_flag::<String>(&args, "--share") {
        println!();
        println!("Share links:");
        println!("  {}", share::twitter_share_url(&app_url));
        println!("  {}", share::facebook_share_url(&app_url));
    }

    ExitCode::SUCCESS
}

/// Read a `QuestionnaireInput` from a JSON file.
fn read_input_json(path: &Path) -> Result<QuestionnaireInput, Box<dyn std::error::Error>> {
    let json = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&json)?)
}

/// Parse `--flag value` from the argument list.
fn parse_flag<T: std::str::FromStr>(args: &[String], flag: &str) -> Option<T> {
    let idx = args.iter().position(|a| a == flag)?;
    args.get(idx + 1)?.parse().ok()
}
