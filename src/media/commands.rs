use std::path::Path;

use tokio::process::Command;
use tracing::debug;

use crate::error::{Result, SubfillError};

/// Abstract media processing command representation
#[derive(Debug, Clone)]
pub struct MediaCommand {
    pub binary_path: String,
    pub args: Vec<String>,
    pub description: String,
}

impl MediaCommand {
    /// Create a new media processing command
    pub fn new<S1: Into<String>, S2: Into<String>>(binary_path: S1, description: S2) -> Self {
        Self {
            binary_path: binary_path.into(),
            args: Vec::new(),
            description: description.into(),
        }
    }

    /// Add an argument
    pub fn arg<S: Into<String>>(mut self, arg: S) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Add input file
    pub fn input<P: AsRef<Path>>(self, path: P) -> Self {
        self.arg("-i").arg(path.as_ref().to_string_lossy().to_string())
    }

    /// Add output file
    pub fn output<P: AsRef<Path>>(self, path: P) -> Self {
        self.arg(path.as_ref().to_string_lossy().to_string())
    }

    /// Disable video
    pub fn no_video(self) -> Self {
        self.arg("-vn")
    }

    /// Set audio codec
    pub fn audio_codec<S: Into<String>>(self, codec: S) -> Self {
        self.arg("-acodec").arg(codec)
    }

    /// Refuse to overwrite an existing output file
    pub fn no_overwrite(self) -> Self {
        self.arg("-n")
    }

    /// Execute the command
    pub async fn execute(&self) -> Result<()> {
        debug!(
            "Executing media processing command: {} {:?}",
            self.binary_path, self.args
        );
        debug!("Description: {}", self.description);

        let output = Command::new(&self.binary_path)
            .args(&self.args)
            .output()
            .await
            .map_err(|e| {
                SubfillError::Extraction(format!("Failed to execute media processor: {}", e))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SubfillError::Extraction(format!(
                "{} failed: {}",
                self.description, stderr
            )));
        }

        Ok(())
    }
}

/// Builder for commands against a specific binary
#[derive(Debug, Clone)]
pub struct MediaCommandBuilder {
    binary_path: String,
}

impl MediaCommandBuilder {
    pub fn new<S: Into<String>>(binary_path: S) -> Self {
        Self {
            binary_path: binary_path.into(),
        }
    }

    /// Create a command that extracts the audio track from a video file
    pub fn extract_audio<P: AsRef<Path>>(
        &self,
        video_path: P,
        audio_path: P,
        codec: &str,
    ) -> MediaCommand {
        MediaCommand::new(&self.binary_path, "Extract audio")
            .input(video_path)
            .no_video()
            .audio_codec(codec)
            .no_overwrite()
            .output(audio_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_audio_command_shape() {
        let command =
            MediaCommandBuilder::new("ffmpeg").extract_audio("in.mkv", "out.mp3", "mp3");

        assert_eq!(command.binary_path, "ffmpeg");
        assert_eq!(
            command.args,
            vec!["-i", "in.mkv", "-vn", "-acodec", "mp3", "-n", "out.mp3"]
        );
    }
}
