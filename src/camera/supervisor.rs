use std::path::Path;
use std::process::Stdio;

use tokio::process::{Child, Command};
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::config::AppConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeState {
    Absent,
    Running,
    Dead,
}

pub struct DecodeSupervisor {
    program: String,
    args: Vec<String>,
    child: Mutex<Option<Child>>,
}

impl DecodeSupervisor {
    pub fn new(config: &AppConfig, output_path: &Path) -> Self {
        let args = vec![
            "-nostdin".to_owned(),
            "-y".to_owned(),
            "-re".to_owned(),
            "-rtsp_transport".to_owned(),
            config.rtsp_transport.clone(),
            "-i".to_owned(),
            config.source.clone(),
            "-vf".to_owned(),
            "fps=1".to_owned(),
            "-update".to_owned(),
            "1".to_owned(),
            output_path.display().to_string(),
        ];
        Self::from_command("ffmpeg", args)
    }

    pub(crate) fn from_command(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            child: Mutex::new(None),
        }
    }

    pub async fn ensure_running(&self) {
        let mut slot = self.child.lock().await;
        if let Some(child) = slot.as_mut() {
            match child.try_wait() {
                Ok(None) => return,
                Ok(Some(status)) => info!("decode process exited with {status}, respawning"),
                Err(err) => warn!("failed to poll decode process: {err}"),
            }
        }
        *slot = None;

        info!(
            "spawning stream for snapshots: {} {}",
            self.program,
            self.args.join(" ")
        );
        let spawned = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn();
        match spawned {
            Ok(child) => *slot = Some(child),
            // The next call retries; a failed spawn shows up as a stale image.
            Err(err) => warn!("failed to spawn decode process: {err}"),
        }
    }

    pub async fn terminate(&self) {
        let mut slot = self.child.lock().await;
        if let Some(mut child) = slot.take() {
            info!("terminating decode process");
            if let Err(err) = child.start_kill() {
                warn!("failed to kill decode process: {err}");
            }
        }
    }

    pub async fn state(&self) -> DecodeState {
        let mut slot = self.child.lock().await;
        match slot.as_mut() {
            None => DecodeState::Absent,
            Some(child) => match child.try_wait() {
                Ok(None) => DecodeState::Running,
                Ok(Some(_)) | Err(_) => DecodeState::Dead,
            },
        }
    }

    pub async fn pid(&self) -> Option<u32> {
        let slot = self.child.lock().await;
        slot.as_ref().and_then(|child| child.id())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::{DecodeState, DecodeSupervisor};

    fn sleeper() -> DecodeSupervisor {
        DecodeSupervisor::from_command("sleep", vec!["30".to_owned()])
    }

    #[tokio::test]
    async fn ensure_running_keeps_a_single_process_alive() {
        let supervisor = sleeper();
        supervisor.ensure_running().await;
        let first = supervisor.pid().await.expect("process should be tracked");

        supervisor.ensure_running().await;
        let second = supervisor.pid().await.expect("process should still be tracked");

        assert_eq!(first, second, "a live process must not be respawned");
        assert_eq!(supervisor.state().await, DecodeState::Running);
        supervisor.terminate().await;
    }

    #[tokio::test]
    async fn ensure_running_respawns_after_exit() {
        let supervisor = DecodeSupervisor::from_command("true", Vec::new());
        supervisor.ensure_running().await;

        // `true` exits immediately; wait for polling to observe it.
        for _ in 0..100 {
            if supervisor.state().await == DecodeState::Dead {
                break;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        assert_eq!(supervisor.state().await, DecodeState::Dead);

        supervisor.ensure_running().await;
        assert!(supervisor.pid().await.is_some());
        supervisor.terminate().await;
    }

    #[tokio::test]
    async fn terminate_is_safe_without_a_process() {
        let supervisor = sleeper();
        supervisor.terminate().await;
        supervisor.terminate().await;
        assert_eq!(supervisor.state().await, DecodeState::Absent);
    }

    #[tokio::test]
    async fn terminate_drops_the_tracked_process() {
        let supervisor = sleeper();
        supervisor.ensure_running().await;
        supervisor.terminate().await;
        assert_eq!(supervisor.state().await, DecodeState::Absent);
    }
}
