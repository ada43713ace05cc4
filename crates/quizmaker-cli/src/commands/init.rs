//! The `quizmaker init` command.

use std::path::Path;

use anyhow::Result;

use quizmaker_core::config::SAMPLE_CONFIG;
use quizmaker_core::draft::EXAMPLE_DRAFT;
use quizmaker_core::QuizmakerConfig;

use super::open_app;

pub fn execute(config: &QuizmakerConfig) -> Result<()> {
    if Path::new("quizmaker.toml").exists() {
        println!("quizmaker.toml already exists, skipping.");
    } else {
        std::fs::write("quizmaker.toml", SAMPLE_CONFIG)?;
        println!("Created quizmaker.toml");
    }

    std::fs::create_dir_all("drafts")?;
    let example_path = Path::new("drafts/example.toml");
    if example_path.exists() {
        println!("drafts/example.toml already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_DRAFT)?;
        println!("Created drafts/example.toml");
    }

    let app = open_app(config)?;
    println!(
        "{} quiz(zes) stored in {}",
        app.repository().len(),
        config.storage_path().display()
    );

    println!("\nNext steps:");
    println!("  1. Edit drafts/example.toml");
    println!("  2. Run: quizmaker create --draft drafts/example.toml");
    println!("  3. Run: quizmaker list, then quizmaker take --id <ID>");

    Ok(())
}
