use crate::{HandoutUpdate, Stage};
use pdf_handout::{
    LayoutConfig, Progress, ProgressReporter, SlideImage, compute_layout, index_prompt, load_pdf,
    load_slide_dir, merge_and_write, plan_for_slides, probe_geometry, render_to_file,
};
use pdf_index::{IndexOptions, build_index};
use std::path::PathBuf;
use tokio::sync::mpsc;

fn send_error(update_tx: &mpsc::UnboundedSender<HandoutUpdate>, stage: Stage, message: String) {
    log::error!("{} failed: {}", stage, message);
    let _ = update_tx.send(HandoutUpdate::Error { stage, message });
}

fn send_progress(
    update_tx: &mpsc::UnboundedSender<HandoutUpdate>,
    stage: Stage,
    current: usize,
    total: usize,
    message: impl Into<String>,
) {
    let _ = update_tx.send(HandoutUpdate::Progress {
        stage,
        current,
        total,
        message: message.into(),
    });
}

/// Forward library progress events as updates until the reporter side is
/// dropped.
fn forward_progress(
    stage: Stage,
    update_tx: &mpsc::UnboundedSender<HandoutUpdate>,
) -> (ProgressReporter, tokio::task::JoinHandle<()>) {
    let (tx, mut rx) = mpsc::unbounded_channel::<Progress>();
    let update_tx = update_tx.clone();
    let handle = tokio::spawn(async move {
        while let Some(Progress {
            current,
            total,
            message,
        }) = rx.recv().await
        {
            send_progress(&update_tx, stage, current, total, message);
        }
    });
    (ProgressReporter::new(tx), handle)
}

pub async fn handle_load_slides(dir: PathBuf, update_tx: &mpsc::UnboundedSender<HandoutUpdate>) {
    match load_slide_dir(&dir).await {
        Ok(slides) => {
            let _ = update_tx.send(HandoutUpdate::SlidesLoaded { slides });
        }
        Err(e) => send_error(
            update_tx,
            Stage::Load,
            format!("Failed to load slides from {}: {e}", dir.display()),
        ),
    }
}

pub async fn handle_load_config(path: PathBuf, update_tx: &mpsc::UnboundedSender<HandoutUpdate>) {
    match LayoutConfig::load(&path).await {
        Ok(config) => {
            let _ = update_tx.send(HandoutUpdate::ConfigLoaded { config });
        }
        Err(e) => send_error(update_tx, Stage::Load, format!("Failed to load config: {e}")),
    }
}

pub fn handle_calculate_layout(
    item_count: usize,
    aspect_ratio: f32,
    config: &LayoutConfig,
    update_tx: &mpsc::UnboundedSender<HandoutUpdate>,
) {
    let plan = compute_layout(item_count, aspect_ratio, config);
    let _ = update_tx.send(HandoutUpdate::LayoutCalculated { plan });
}

pub fn handle_index_prompt(
    item_count: usize,
    aspect_ratio: f32,
    config: &LayoutConfig,
    update_tx: &mpsc::UnboundedSender<HandoutUpdate>,
) {
    let plan = compute_layout(item_count, aspect_ratio, config);
    match index_prompt(&plan) {
        Some(prompt) => {
            let _ = update_tx.send(HandoutUpdate::IndexPromptReady { prompt });
        }
        None => send_error(
            update_tx,
            Stage::Layout,
            "No slides to write an index for".to_string(),
        ),
    }
}

pub async fn handle_render(
    slides: Vec<SlideImage>,
    config: LayoutConfig,
    output_path: PathBuf,
    update_tx: &mpsc::UnboundedSender<HandoutUpdate>,
) {
    if let Err(e) = config.validate() {
        send_error(update_tx, Stage::Render, e.to_string());
        return;
    }

    let plan = plan_for_slides(&slides, &config);
    let (reporter, forwarder) = forward_progress(Stage::Render, update_tx);
    let result = render_to_file(&slides, &plan, &config, &output_path, reporter).await;

    // Every progress event is delivered before the outcome
    let _ = forwarder.await;

    match result {
        Ok(report) => {
            let _ = update_tx.send(HandoutUpdate::RenderComplete {
                path: output_path,
                report,
            });
        }
        Err(e) => send_error(
            update_tx,
            Stage::Render,
            format!("Failed to render {}: {e}", output_path.display()),
        ),
    }
}

/// Probe the content document, build a matching index and write index
/// followed by content.
pub async fn handle_build_indexed(
    markup: String,
    content_path: PathBuf,
    output_path: PathBuf,
    font_path: Option<PathBuf>,
    update_tx: &mpsc::UnboundedSender<HandoutUpdate>,
) {
    const STEPS: usize = 3;

    send_progress(update_tx, Stage::Index, 0, STEPS, "Reading content geometry");
    let content = match load_pdf(&content_path).await {
        Ok(doc) => doc,
        Err(e) => {
            send_error(
                update_tx,
                Stage::Merge,
                format!("Cannot open content document {}: {e}", content_path.display()),
            );
            return;
        }
    };
    let geometry = match probe_geometry(&content) {
        Ok(geometry) => geometry,
        Err(e) => {
            send_error(update_tx, Stage::Index, e.to_string());
            return;
        }
    };

    send_progress(
        update_tx,
        Stage::Index,
        1,
        STEPS,
        format!(
            "Building index on {:.0}x{:.0}mm pages",
            geometry.width_mm, geometry.height_mm
        ),
    );
    let options = IndexOptions {
        font_path,
        ..IndexOptions::with_geometry(geometry)
    };
    let index = match tokio::task::spawn_blocking(move || build_index(&markup, &options)).await {
        Ok(Ok(doc)) => doc,
        Ok(Err(e)) => {
            send_error(update_tx, Stage::Index, format!("Failed to build index: {e}"));
            return;
        }
        Err(e) => {
            send_error(update_tx, Stage::Index, format!("Index task failed: {e}"));
            return;
        }
    };
    let index_pages = index.get_pages().len();

    send_progress(update_tx, Stage::Merge, 2, STEPS, "Merging index and content");
    match merge_and_write(index, content, &output_path).await {
        Ok(total_pages) => {
            send_progress(update_tx, Stage::Merge, STEPS, STEPS, "Done");
            let _ = update_tx.send(HandoutUpdate::IndexedComplete {
                path: output_path,
                index_pages,
                total_pages,
            });
        }
        Err(e) => send_error(update_tx, Stage::Merge, e.to_string()),
    }
}
