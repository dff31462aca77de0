use std::fs;

use anyhow::Context;
use clap::Parser;
use survey_builder::{
    ConsoleExporter, FileExporter, MemoryExporter, SurveyDocumentStore, SurveyExporter,
    SurveySnapshot,
};
use survey_builder_ratatui::SurveyEditor;
use tracing::info;

mod config;
mod logging;

use config::Config;

fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    let log_dir = config.log_dir();
    let _guard = logging::init(&log_dir)
        .with_context(|| format!("failed to set up logging in {}", log_dir.display()))?;
    info!(?config, "starting survey builder");

    let mut store = SurveyDocumentStore::new();
    if let Some(path) = &config.open {
        let json = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let snapshot = SurveySnapshot::from_json(&json)
            .with_context(|| format!("failed to open {}", path.display()))?;
        store.load(snapshot);
    }

    let editor = SurveyEditor::new();
    if config.console {
        // The form owns stdout while it runs; print once it has closed.
        let submitted = editor.run(&mut store, &mut MemoryExporter::new())?;
        let mut console = ConsoleExporter::stdout();
        for snapshot in &submitted {
            console.export(snapshot)?;
        }
    } else {
        let mut exporter = FileExporter::new(&config.output_dir);
        let submitted = editor.run(&mut store, &mut exporter)?;
        if !submitted.is_empty() {
            println!(
                "Survey Form Downloaded! ({} written to {})",
                submitted.len(),
                exporter.path().display()
            );
        }
    }

    Ok(())
}
