//! CLI command handler

use std::time::Instant;

use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use crate::core::client::OneSkyClient;
use crate::core::config::PullConfig;
use crate::core::errors::Result;
use crate::core::models::ExportTarget;
use crate::core::signer::Signature;
use crate::core::writer;

/// Handle the pull command
pub async fn handle_pull(config: PullConfig) -> anyhow::Result<()> {
    let start_time = Instant::now();

    info!("Pulling translations for project {}", config.project_id);
    info!("Languages root: {}", config.languages_root.display());

    // One signature for the whole run; a run is expected to finish inside
    // the service's signature validity window.
    let signature = Signature::now(&config.api_key, &config.api_secret);
    let client = OneSkyClient::new(&config.api_base, signature);

    let written = run_pull(&client, &config).await?;

    let duration = start_time.elapsed();
    info!("Completed: {} files written in {:?}", written, duration);

    println!("\n✅ Pull completed!");
    println!("   Files written: {}", written);
    println!("   Time: {:?}", duration);

    Ok(())
}

/// List the project's languages, then export and write every
/// language × file pair. The first failure aborts the remaining pairs.
/// Returns the number of files written.
pub async fn run_pull(client: &OneSkyClient, config: &PullConfig) -> Result<usize> {
    let languages = client.list_languages(&config.project_id).await?;
    info!("Project has {} languages", languages.len());

    let pb = ProgressBar::new((languages.len() * config.files.len()) as u64);
    pb.set_style(ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}")
        .unwrap()
        .progress_chars("=>-"));

    let mut written = 0;
    for language in &languages {
        for file_name in &config.files {
            let target = ExportTarget::new(file_name, language, &config.languages_root);
            pb.set_message(format!("{}/{}", language.code, file_name));

            let bytes = client.export_file(&config.project_id, &target).await?;
            writer::write(&bytes, &target.destination)?;

            written += 1;
            pb.inc(1);
        }
    }

    pb.finish_with_message("Completed");

    Ok(written)
}
