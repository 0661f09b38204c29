use std::{
    env,
    path::{
        Path,
        PathBuf,
    },
    process::{
        Child,
        Command,
        Stdio,
    },
};

use super::SpeechEngine;
use crate::core::FlashcardError;

/// Words per minute at rate 1.0 for espeak and `say`.
const BASE_WORDS_PER_MINUTE: f32 = 175.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flavor {
    Espeak,
    SpdSay,
    Say,
    /// Receives the text as its only argument.
    Plain,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Program {
    path: PathBuf,
    flavor: Flavor,
}

/// Speaks through a text-to-speech program found on `PATH`, one child
/// process per utterance.
pub struct CommandSpeech {
    program: Option<Program>,
    child: Option<Child>,
}

impl CommandSpeech {
    /// Uses `command` when given, otherwise the first of espeak-ng, espeak,
    /// spd-say or say that is installed.
    pub fn detect(command: Option<&str>) -> Self {
        let program = match command.map(str::trim).filter(|c| !c.is_empty()) {
            Some(command) => resolve(command).map(|path| {
                let flavor = flavor_for(&path);
                Program { path, flavor }
            }),
            None => ["espeak-ng", "espeak", "spd-say", "say"].iter().find_map(|name| {
                find_in_path(name).map(|path| Program { path, flavor: flavor_for(Path::new(name)) })
            }),
        };

        match &program {
            Some(program) => log::info!("Using speech program {}", program.path.display()),
            None => log::warn!("No text-to-speech program found"),
        }

        Self { program, child: None }
    }

    pub fn program_path(&self) -> Option<&Path> {
        self.program.as_ref().map(|p| p.path.as_path())
    }
}

impl SpeechEngine for CommandSpeech {
    fn is_available(&self) -> bool {
        self.program.is_some()
    }

    fn speak(&mut self, text: &str, rate: f32) -> Result<(), FlashcardError> {
        let program = self
            .program
            .as_ref()
            .ok_or_else(|| FlashcardError::Speech("no text-to-speech program".to_string()))?;

        let mut command = Command::new(&program.path);
        command.args(speak_args(program.flavor, rate, text));
        command.stdin(Stdio::null()).stdout(Stdio::null()).stderr(Stdio::null());

        let child = command.spawn().map_err(|e| {
            FlashcardError::Speech(format!("Failed to start {}: {}", program.path.display(), e))
        })?;

        self.child = Some(child);
        Ok(())
    }

    fn cancel(&mut self) {
        let Some(mut child) = self.child.take() else {
            return;
        };
        let _ = child.kill();
        let _ = child.wait();

        // speech-dispatcher keeps playing a queued message after its client exits
        if let Some(program) = self.program.as_ref() {
            if let Some(args) = cancel_args(program.flavor) {
                let status = Command::new(&program.path)
                    .args(args)
                    .stdin(Stdio::null())
                    .stdout(Stdio::null())
                    .stderr(Stdio::null())
                    .status();
                if let Err(e) = status {
                    log::warn!("Failed to cancel {}: {}", program.path.display(), e);
                }
            }
        }
    }

    fn is_speaking(&mut self) -> bool {
        let Some(child) = self.child.as_mut() else {
            return false;
        };

        match child.try_wait() {
            Ok(None) => true,
            Ok(Some(_)) => {
                self.child = None;
                false
            }
            Err(e) => {
                log::warn!("Lost track of speech process: {}", e);
                self.child = None;
                false
            }
        }
    }
}

impl Drop for CommandSpeech {
    fn drop(&mut self) {
        self.cancel();
    }
}

fn rate_args(flavor: Flavor, rate: f32) -> Vec<String> {
    let words_per_minute = (BASE_WORDS_PER_MINUTE * rate).round() as i32;
    match flavor {
        Flavor::Espeak => vec!["-s".to_string(), words_per_minute.to_string()],
        Flavor::Say => vec!["-r".to_string(), words_per_minute.to_string()],
        // spd-say takes -100..=100 around the default speed
        Flavor::SpdSay => {
            let relative = ((rate - 1.0) * 100.0).round().clamp(-100.0, 100.0) as i32;
            vec!["--wait".to_string(), "-r".to_string(), relative.to_string()]
        }
        Flavor::Plain => Vec::new(),
    }
}

/// Full argument list for one utterance. Option parsing ends before the text
/// so terms such as "-ful" are spoken, not parsed.
fn speak_args(flavor: Flavor, rate: f32, text: &str) -> Vec<String> {
    let mut args = rate_args(flavor, rate);
    if flavor != Flavor::Plain {
        args.push("--".to_string());
    }
    args.push(text.to_string());
    args
}

const SPD_SAY_CANCEL: &[&str] = &["-C"];

fn cancel_args(flavor: Flavor) -> Option<&'static [&'static str]> {
    match flavor {
        Flavor::SpdSay => Some(SPD_SAY_CANCEL),
        _ => None,
    }
}

fn flavor_for(path: &Path) -> Flavor {
    let name = path.file_stem().and_then(|n| n.to_str()).unwrap_or_default();
    match name {
        "espeak" | "espeak-ng" => Flavor::Espeak,
        "spd-say" => Flavor::SpdSay,
        "say" => Flavor::Say,
        _ => Flavor::Plain,
    }
}

fn resolve(command: &str) -> Option<PathBuf> {
    let path = Path::new(command);
    if path.components().count() > 1 {
        return path.is_file().then(|| path.to_path_buf());
    }
    find_in_path(command)
}

fn find_in_path(name: &str) -> Option<PathBuf> {
    let paths = env::var_os("PATH")?;
    env::split_paths(&paths).find_map(|dir| {
        let candidate = dir.join(name);
        if candidate.is_file() {
            return Some(candidate);
        }
        let exe = candidate.with_extension(env::consts::EXE_EXTENSION);
        (!env::consts::EXE_EXTENSION.is_empty() && exe.is_file()).then_some(exe)
    })
}
