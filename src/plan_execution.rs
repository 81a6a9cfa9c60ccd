use std::path::Path;
use std::sync::mpsc::channel;

use anyhow::{anyhow, Result};
use notify::{Config, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tracing::{debug, error, info};

use crate::config::DashboardPlan;
use crate::pipeline::{self, DashboardData};

fn plan_title(plan: &DashboardPlan) -> String {
    plan.meta
        .as_ref()
        .and_then(|meta| meta.name.clone())
        .unwrap_or_else(|| "E-Commerce Dashboard".to_string())
}

fn data_dir(plan: &DashboardPlan, plan_file_path: &Path) -> Result<std::path::PathBuf> {
    let parent_dir = plan_file_path
        .parent()
        .ok_or_else(|| anyhow!("Plan file has no parent directory"))?;
    Ok(parent_dir.join(&plan.data.dir))
}

/// Renders each configured export profile from the built tables.
fn render_exports(data: &DashboardData, plan: &DashboardPlan, plan_file_path: &Path) -> Result<()> {
    let title = plan_title(plan);
    let parent_dir = plan_file_path
        .parent()
        .ok_or_else(|| anyhow!("Plan file has no parent directory"))?;

    for profile in &plan.export.profiles {
        info!(
            "Exporting file: {} using exporter {:?}",
            profile.filename, profile.exporter
        );
        let output_path = parent_dir.join(&profile.filename);
        match crate::export::render(data, profile, &title) {
            Ok(output) => {
                if let Err(e) =
                    crate::common::write_string_to_file(&output_path.display().to_string(), &output)
                {
                    error!("Failed to write to file {}: {}", profile.filename, e);
                }
            }
            Err(e) => {
                error!("Failed to export file {}: {}", profile.filename, e);
            }
        }
    }
    Ok(())
}

/// Executes a single plan: build the tables, then render exports.
fn run_plan(plan: &DashboardPlan, plan_file_path: &Path) -> Result<()> {
    let dir = data_dir(plan, plan_file_path)?;
    let data = pipeline::build_dashboard_data(&dir, &plan.data)?;

    info!(
        "Tables built: OrdersMain {} rows, FullItems {} rows, {} customer entries",
        data.orders_main.len(),
        data.full_items.len(),
        data.customers.len()
    );

    render_exports(&data, plan, plan_file_path)?;
    Ok(())
}

/// Main function to execute a plan, with optional data-file watching.
pub fn execute_plan(plan: String, watch: bool) -> Result<()> {
    info!("Executing plan {}", plan);

    let plan_file_path = std::path::Path::new(&plan);
    let plan: DashboardPlan = DashboardPlan::from_file(plan_file_path)?;

    debug!("Executing plan: {:?}", plan);
    run_plan(&plan, plan_file_path)?;

    if watch {
        watch_for_changes(plan, plan_file_path)?;
    }

    Ok(())
}

/// Watches the six data files and re-runs the pipeline when any of them
/// change. This is the only recomputation path; without a change the built
/// tables stand for the session.
fn watch_for_changes(plan: DashboardPlan, plan_file_path: &Path) -> Result<()> {
    info!("Watching for changes");
    let dir = data_dir(&plan, plan_file_path)?;
    let files = [
        &plan.data.customers,
        &plan.data.orders,
        &plan.data.order_items,
        &plan.data.payments,
        &plan.data.products,
        &plan.data.category_translation,
    ];

    let (tx, rx) = channel();
    let mut watcher = RecommendedWatcher::new(tx, Config::default())?;
    for file in files {
        let path = dir.join(file);
        watcher.watch(&path, RecursiveMode::NonRecursive)?;
    }

    loop {
        match rx.recv() {
            Ok(event) => {
                if let Ok(event) = event {
                    if let EventKind::Modify(_) = event.kind {
                        debug!("File modified {:?}", event.paths);
                        info!("Change detected, re-running pipeline");
                        run_plan(&plan, plan_file_path)?;
                    }
                }
            }
            Err(e) => error!("Watch error: {:?}", e),
        }
    }
}
