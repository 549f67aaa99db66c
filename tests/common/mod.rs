use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;
use valuta::{CurrencyCode, Mode, Recognizer};

/// Recognizer over the built-in vocabulary
#[allow(dead_code)]
pub fn recognizer() -> Recognizer {
    Recognizer::with_defaults().expect("built-in vocabulary must compile")
}

/// `(amount, currency)` pairs, which compare more readably than `Price`s
#[allow(dead_code)]
pub fn pairs(text: &str, mode: Mode) -> Vec<(f64, CurrencyCode)> {
    recognizer()
        .recognize(text, mode)
        .iter()
        .map(|p| (p.amount(), p.currency()))
        .collect()
}

#[allow(dead_code)]
pub fn lenient(text: &str) -> Vec<(f64, CurrencyCode)> {
    pairs(text, Mode::Lenient)
}

#[allow(dead_code)]
pub fn strict(text: &str) -> Vec<(f64, CurrencyCode)> {
    pairs(text, Mode::Strict)
}

/// Runs the `valuta` binary with its config isolated in a temp dir
#[allow(dead_code)]
pub struct CliContext {
    pub temp_dir: TempDir,
}

#[allow(dead_code)]
impl CliContext {
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        CliContext { temp_dir }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.temp_dir.path().join(name)
    }

    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.path(name);
        std::fs::write(&path, content).expect("Failed to write test file");
        path
    }

    pub fn run(&self, args: &[&str]) -> Output {
        let bin_path = env!("CARGO_BIN_EXE_valuta");
        Command::new(bin_path)
            .args(args)
            .env("VALUTA_CONFIG", self.path("config.json"))
            .output()
            .expect("Failed to run valuta")
    }

    pub fn stdout(&self, args: &[&str]) -> String {
        let output = self.run(args);
        assert!(
            output.status.success(),
            "valuta failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8_lossy(&output.stdout).into_owned()
    }
}
