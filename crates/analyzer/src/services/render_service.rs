use tokio::sync::watch;
use tracing::info;
use workflow::{SessionSnapshot, Stage};

/// Console display layer: prints the session every time it visibly changes.
pub struct RenderService {
    rx: watch::Receiver<SessionSnapshot>,
}

impl RenderService {
    pub fn new(rx: watch::Receiver<SessionSnapshot>) -> Self {
        Self { rx }
    }

    pub async fn start(mut self) {
        let mut last = String::new();

        loop {
            let frame = render_snapshot(&self.rx.borrow_and_update());
            if frame != last {
                println!("{}\n", frame);
                last = frame;
            }

            if self.rx.changed().await.is_err() {
                info!("Session closed. Stopping renderer.");
                break;
            }
        }
    }
}

pub fn render_snapshot(snap: &SessionSnapshot) -> String {
    let mut lines = Vec::new();

    match &snap.selected_name {
        Some(name) => lines.push(format!("Selected: {}", name)),
        None => lines.push("📁 Choose a chart image".to_string()),
    }

    if snap.upload_in_flight {
        lines.push("Uploading… ⏳".to_string());
    }

    if let Some(status) = &snap.status {
        let mark = if status.is_failure() { "❌" } else { "✅" };
        lines.push(format!("{} {}", mark, status));
    }

    if snap.stage == Stage::Analyzing {
        lines.push("Analyzing… ⏳".to_string());
    }

    if let Some(result) = &snap.result {
        lines.push("📈 MTM Trading Signal".to_string());
        lines.push(format!("  Signal:     {}", result.signal));
        lines.push(format!("  Entry:      {}", result.entry));
        lines.push(format!("  Stop Loss:  {}", result.stop_loss));
        lines.push(format!("  Target:     {}", result.target));
        lines.push(format!("  Confidence: {}", result.confidence));
    }

    lines.join("\n")
}
