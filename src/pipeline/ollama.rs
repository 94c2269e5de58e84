use std::io::Write;
use std::process::{Command, Stdio};

use crate::config::OllamaConfig;
use crate::error::EvalError;
use crate::pipeline::traits::Classifier;

/// Classifier backed by a locally installed `ollama` binary.
///
/// Each call runs `<binary> run <model>`, feeds the prompt on stdin and takes
/// the trimmed stdout as the response. No session state is kept between calls.
pub struct OllamaClassifier {
    binary: String,
    model: String,
}

impl OllamaClassifier {
    pub fn new(config: OllamaConfig) -> Self {
        Self {
            binary: config.binary,
            model: config.model,
        }
    }
}

impl Classifier for OllamaClassifier {
    fn classify(&self, prompt: &str) -> Result<String, EvalError> {
        tracing::debug!(
            binary = %self.binary,
            model = %self.model,
            prompt_bytes = prompt.len(),
            "invoking inference tool"
        );

        let mut child = Command::new(&self.binary)
            .arg("run")
            .arg(&self.model)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| EvalError::classifier("spawning inference tool", e))?;

        // Feed stdin from its own thread while `wait_with_output` drains
        // stdout, so neither pipe can stall the other. The handle drops when
        // the thread finishes; the tool then sees EOF.
        let stdin_writer = child.stdin.take().map(|mut stdin| {
            let prompt = prompt.as_bytes().to_vec();
            std::thread::spawn(move || stdin.write_all(&prompt))
        });

        let output = child
            .wait_with_output()
            .map_err(|e| EvalError::classifier("waiting for inference tool", e))?;

        if let Some(writer) = stdin_writer {
            // A broken pipe means the tool quit before reading the whole
            // prompt; its exit status below carries the real diagnostic.
            if let Ok(Err(e)) = writer.join() {
                if e.kind() != std::io::ErrorKind::BrokenPipe {
                    return Err(EvalError::classifier("writing prompt to inference tool", e));
                }
            }
        }

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stderr = stderr.trim();
            let detail = if stderr.is_empty() {
                format!("'{} run {}' exited with {}", self.binary, self.model, output.status)
            } else {
                format!(
                    "'{} run {}' exited with {}: {stderr}",
                    self.binary, self.model, output.status
                )
            };
            return Err(EvalError::classifier("running inference tool", detail));
        }

        let response = String::from_utf8_lossy(&output.stdout).trim().to_string();
        tracing::debug!(response_bytes = response.len(), "inference tool replied");
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    fn write_fake_tool(name: &str, script: &str) -> std::path::PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = std::env::temp_dir().join(name);
        std::fs::write(&path, script).expect("write fake tool");
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
            .expect("mark fake tool executable");
        path
    }

    fn classifier_for(binary: &std::path::Path) -> OllamaClassifier {
        OllamaClassifier::new(OllamaConfig {
            binary: binary.to_string_lossy().to_string(),
            model: "mistral".to_string(),
        })
    }

    #[test]
    fn missing_binary_is_a_classifier_error() {
        let classifier = classifier_for(std::path::Path::new("/nonexistent/ollama"));
        let err = classifier.classify("prompt").unwrap_err();
        assert!(matches!(err, EvalError::Classifier { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn trimmed_stdout_is_the_response() {
        let tool = write_fake_tool(
            "prosody_eval_fake_ollama_ok.sh",
            "#!/bin/sh\ncat >/dev/null\nprintf 'Reasoning: rising tail.\\nAnswer: Interrogative\\n'\n",
        );
        let response = classifier_for(&tool).classify("prompt").expect("classify");
        assert_eq!(response, "Reasoning: rising tail.\nAnswer: Interrogative");
        let _ = std::fs::remove_file(&tool);
    }

    #[cfg(unix)]
    #[test]
    fn nonzero_exit_surfaces_stderr() {
        let tool = write_fake_tool(
            "prosody_eval_fake_ollama_fail.sh",
            "#!/bin/sh\ncat >/dev/null\necho 'model not found' >&2\nexit 3\n",
        );
        let err = classifier_for(&tool).classify("prompt").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("model not found"), "message was: {message}");
        let _ = std::fs::remove_file(&tool);
    }

    #[cfg(unix)]
    #[test]
    fn early_exit_reports_status_not_broken_pipe() {
        let tool = write_fake_tool(
            "prosody_eval_fake_ollama_early_exit.sh",
            "#!/bin/sh\necho 'unknown model' >&2\nexit 1\n",
        );
        // Large enough to overrun the pipe buffer after the tool quits.
        let prompt = "x".repeat(1 << 20);
        let err = classifier_for(&tool).classify(&prompt).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("unknown model"), "message was: {message}");
        let _ = std::fs::remove_file(&tool);
    }

    #[cfg(unix)]
    #[test]
    fn large_prompts_do_not_deadlock() {
        let tool = write_fake_tool(
            "prosody_eval_fake_ollama_big.sh",
            "#!/bin/sh\ncat >/dev/null\necho 'Answer: Declarative'\n",
        );
        let prompt = "0.010\t110.50\n".repeat(20_000);
        let response = classifier_for(&tool).classify(&prompt).expect("classify");
        assert_eq!(response, "Answer: Declarative");
        let _ = std::fs::remove_file(&tool);
    }

    #[cfg(unix)]
    #[test]
    fn interleaved_output_does_not_deadlock() {
        // Emits more than a pipe buffer of output before touching stdin, so
        // both pipes are full at once.
        let tool = write_fake_tool(
            "prosody_eval_fake_ollama_interleaved.sh",
            "#!/bin/sh\nhead -c 262144 /dev/zero | tr '\\0' 'y'\ncat >/dev/null\necho 'Answer: Interrogative'\n",
        );
        let prompt = "0.010\t110.50\n".repeat(20_000);
        let response = classifier_for(&tool).classify(&prompt).expect("classify");
        assert!(response.ends_with("Answer: Interrogative"));
        let _ = std::fs::remove_file(&tool);
    }
}
