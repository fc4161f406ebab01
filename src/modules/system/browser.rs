use std::process::Command;
use std::time::Duration;

// Give the listener a moment before the browser hits it.
const OPEN_DELAY: Duration = Duration::from_millis(1500);

// Desktop launcher for the current platform, or None where there is none.
fn launcher_command(url: &str) -> Option<Command> {
    let mut command = if cfg!(target_os = "windows") {
        let mut cmd = Command::new("cmd");
        cmd.args(["/C", "start", ""]);
        cmd
    } else if cfg!(target_os = "macos") {
        Command::new("open")
    } else if cfg!(target_os = "linux") {
        Command::new("xdg-open")
    } else {
        return None;
    };
    command.arg(url);
    Some(command)
}

fn open_chat_page(url: &str) -> Result<(), String> {
    let mut command = launcher_command(url)
        .ok_or_else(|| "no browser launcher for this platform".to_string())?;
    command
        .spawn()
        .map(|_| ())
        .map_err(|e| format!("launcher failed to start: {}", e))
}

pub fn schedule_open(url: String) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        tokio::time::sleep(OPEN_DELAY).await;
        match open_chat_page(&url) {
            Ok(()) => tracing::info!("Opened chat page in browser: {}", url),
            Err(e) => tracing::warn!("Could not open browser for {}: {}", url, e),
        }
    })
}
