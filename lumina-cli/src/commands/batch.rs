//! Batch pagination command implementation

use super::read_text_file;
use anyhow::{bail, Result};
use indicatif::{ProgressBar, ProgressStyle};
use lumina_core::reader::{paginate, parse};
use lumina_core::storefront::UploadKind;
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Paginate every `.txt` and `.md` file in a directory
pub fn batch(input_dir: &str, budget: i64, jobs: usize) -> Result<()> {
    let input_path = Path::new(input_dir);

    // Find all text books
    let mut files: Vec<PathBuf> = fs::read_dir(input_path)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| {
            p.file_name()
                .and_then(|n| n.to_str())
                .and_then(UploadKind::from_filename)
                .map(|kind| kind != UploadKind::Epub)
                .unwrap_or(false)
        })
        .collect();
    files.sort();

    if files.is_empty() {
        println!("No text books found in {}", input_dir);
        return Ok(());
    }

    println!("Found {} files to paginate", files.len());

    let progress = ProgressBar::new(files.len() as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos:>7}/{len:7} {msg}")?
            .progress_chars("##-"),
    );

    let error_count = AtomicUsize::new(0);
    let results = Mutex::new(Vec::with_capacity(files.len()));

    let pool = rayon::ThreadPoolBuilder::new().num_threads(jobs).build()?;

    // Process files in parallel
    pool.install(|| {
        files.par_iter().for_each(|file_path| {
            match count_pages(file_path, budget) {
                Ok(pages) => {
                    if let Ok(mut results) = results.lock() {
                        results.push((file_path.clone(), pages));
                    }
                }
                Err(e) => {
                    error_count.fetch_add(1, Ordering::Relaxed);
                    tracing::error!("Failed to paginate {:?}: {}", file_path, e);
                }
            }
            progress.inc(1);
        });
    });

    progress.finish();

    let mut results = results.into_inner().unwrap_or_default();
    results.sort();
    let errors = error_count.load(Ordering::Relaxed);

    println!("\nBatch pagination complete:");
    for (path, pages) in &results {
        let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("?");
        println!("  {:<32} {:>6} pages", name, pages);
    }
    println!("  Success: {}", results.len());
    println!("  Errors:  {}", errors);

    if errors > 0 {
        bail!("Batch pagination completed with {} errors", errors);
    }

    Ok(())
}

fn count_pages(path: &Path, budget: i64) -> Result<usize> {
    let file = read_text_file(&path.to_string_lossy())?;
    let pages = paginate(&parse(&file.text), budget)?;
    tracing::info!("Paginated {:?} into {} pages", path, pages.len());
    Ok(pages.len())
}
