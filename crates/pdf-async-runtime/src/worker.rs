use crate::{HandoutCommand, HandoutUpdate, handlers};
use tokio::sync::mpsc;

/// Start the worker on the current runtime, returning the command sender
/// and update receiver.
pub fn spawn_worker() -> (
    mpsc::UnboundedSender<HandoutCommand>,
    mpsc::UnboundedReceiver<HandoutUpdate>,
    tokio::task::JoinHandle<()>,
) {
    let (command_tx, command_rx) = mpsc::unbounded_channel();
    let (update_tx, update_rx) = mpsc::unbounded_channel();
    let handle = tokio::spawn(worker_task(command_rx, update_tx));
    (command_tx, update_rx, handle)
}

/// Async worker task that processes handout commands one at a time and
/// sends updates. Returns once every command sender has been dropped.
pub async fn worker_task(
    mut command_rx: mpsc::UnboundedReceiver<HandoutCommand>,
    update_tx: mpsc::UnboundedSender<HandoutUpdate>,
) {
    while let Some(cmd) = command_rx.recv().await {
        process_command(cmd, &mut command_rx, &update_tx).await;
    }
    log::debug!("Command channel closed, worker exiting");
}

async fn process_command(
    cmd: HandoutCommand,
    command_rx: &mut mpsc::UnboundedReceiver<HandoutCommand>,
    update_tx: &mpsc::UnboundedSender<HandoutUpdate>,
) {
    match cmd {
        HandoutCommand::LoadSlides { dir } => {
            handlers::handle_load_slides(dir, update_tx).await;
        }
        HandoutCommand::LoadConfig { path } => {
            handlers::handle_load_config(path, update_tx).await;
        }
        HandoutCommand::CalculateLayout {
            mut item_count,
            mut aspect_ratio,
            mut config,
        } => {
            // Drain any queued layout requests, keeping only the most recent
            while let Ok(next_cmd) = command_rx.try_recv() {
                if let HandoutCommand::CalculateLayout {
                    item_count: new_count,
                    aspect_ratio: new_ratio,
                    config: new_config,
                } = next_cmd
                {
                    log::debug!("Discarding queued layout calculation, using newer request");
                    item_count = new_count;
                    aspect_ratio = new_ratio;
                    config = new_config;
                } else {
                    // Non-layout command found; it cannot be put back, so
                    // run it before the layout
                    Box::pin(process_command(next_cmd, command_rx, update_tx)).await;
                }
            }

            handlers::handle_calculate_layout(item_count, aspect_ratio, &config, update_tx);
        }
        HandoutCommand::Render {
            slides,
            config,
            output_path,
        } => {
            handlers::handle_render(slides, config, output_path, update_tx).await;
        }
        HandoutCommand::IndexPrompt {
            item_count,
            aspect_ratio,
            config,
        } => {
            handlers::handle_index_prompt(item_count, aspect_ratio, &config, update_tx);
        }
        HandoutCommand::BuildIndexed {
            markup,
            content_path,
            output_path,
            font_path,
        } => {
            handlers::handle_build_indexed(markup, content_path, output_path, font_path, update_tx)
                .await;
        }
    }
}
