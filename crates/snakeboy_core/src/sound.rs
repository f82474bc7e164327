use std::collections::HashMap;
use std::fs;
use std::io::{BufReader, Cursor};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use log::{error, warn};
use rodio::{Decoder, OutputStream, Sink};

/// Logical identifiers for the game's effect clips.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum SoundType {
    /// Reward clip, played when the apple is eaten.
    Ding,
    /// Failure clip, played on a terminal collision.
    Crash,
}

/// Message sent from the game thread to the audio thread.
pub enum Message {
    Effect(SoundType),
    PauseMusic,
    ResumeMusic,
}

/// Mapping between logical sounds and their clip files.
pub struct SoundInfo {
    pub sound_type: SoundType,
    pub path: &'static str,
}

impl SoundInfo {
    const fn new(sound_type: SoundType, path: &'static str) -> Self {
        Self { sound_type, path }
    }
}

/// All effect clip definitions.
///
/// Paths are relative to the repository root; we expect to be run from the
/// workspace root so that these assets can be found.
pub const ALL_SOUNDS: &[SoundInfo] = &[
    SoundInfo::new(SoundType::Ding, "assets/sounds/snake/ding.mp3"),
    SoundInfo::new(SoundType::Crash, "assets/sounds/snake/crash.mp3"),
];

/// Background music track, looped for the lifetime of the process and
/// paused while the game-over screen is up.
pub const MUSIC_PATH: &str = "assets/sounds/snake/bg_music.mp3";

struct SoundThread {
    receiver: Receiver<Message>,
    sound_files: HashMap<SoundType, Vec<u8>>,
    music: Option<Vec<u8>>,
}

impl SoundThread {
    fn new(receiver: Receiver<Message>) -> Option<Self> {
        let mut sound_files = HashMap::new();

        for info in ALL_SOUNDS.iter() {
            match fs::read(info.path) {
                Ok(bytes) => {
                    sound_files.insert(info.sound_type, bytes);
                }
                Err(e) => {
                    warn!(
                        "Failed to load sound {:?} from {}: {e}",
                        info.sound_type, info.path
                    );
                }
            }
        }

        let music = match fs::read(MUSIC_PATH) {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                warn!("Failed to load music from {MUSIC_PATH}: {e}");
                None
            }
        };

        if sound_files.is_empty() && music.is_none() {
            warn!("No snake sound files could be loaded, disabling audio");
            return None;
        }

        Some(Self {
            receiver,
            sound_files,
            music,
        })
    }

    fn run(self) {
        // Keep the stream alive as long as the audio thread runs.
        let Ok((stream, stream_handle)) = OutputStream::try_default() else {
            error!("Failed to open default audio output stream, disabling audio");
            return;
        };
        let _stream = stream;

        let Ok(effects) = Sink::try_new(&stream_handle) else {
            error!("Failed to create effects sink, disabling audio");
            return;
        };
        let Ok(music_sink) = Sink::try_new(&stream_handle) else {
            error!("Failed to create music sink, disabling audio");
            return;
        };

        if let Some(bytes) = &self.music {
            let reader = BufReader::new(Cursor::new(bytes.clone()));
            match Decoder::new_looped(reader) {
                Ok(source) => music_sink.append(source),
                Err(e) => error!("Failed to decode music: {e}"),
            }
        }

        // Effects are appended without waiting for them to finish so that
        // music control messages are serviced promptly.
        loop {
            match self.receiver.recv() {
                Ok(Message::Effect(sound_type)) => {
                    if let Some(bytes) = self.sound_files.get(&sound_type) {
                        let reader = BufReader::new(Cursor::new(bytes.clone()));
                        match Decoder::new(reader) {
                            Ok(source) => effects.append(source),
                            Err(e) => {
                                error!("Failed to decode sound {:?}: {e}", sound_type);
                            }
                        }
                    } else {
                        warn!("No audio data for sound {:?}", sound_type);
                    }
                }
                Ok(Message::PauseMusic) => music_sink.pause(),
                Ok(Message::ResumeMusic) => music_sink.play(),
                Err(e) => {
                    warn!("Audio channel closed: {e}");
                    break;
                }
            }
        }
    }
}

/// Handle living on the game thread that forwards playback requests to
/// the audio thread.
pub struct SoundManager {
    sender: Sender<Message>,
}

impl SoundManager {
    /// Try to start the audio thread and create a new manager.
    ///
    /// If audio initialization fails (e.g. no output device), this returns
    /// `None` and the game will run silently. The background music starts
    /// playing as soon as the thread is up.
    pub fn new() -> Option<Self> {
        let (sender, receiver) = mpsc::channel::<Message>();

        let Some(sound_thread) = SoundThread::new(receiver) else {
            return None;
        };

        if let Err(e) = thread::Builder::new()
            .name("snake_sound".into())
            .spawn(move || sound_thread.run())
        {
            error!("Failed to spawn snake audio thread: {e}");
            return None;
        }

        Some(Self { sender })
    }

    /// Queue an effect clip.
    ///
    /// Ignore send errors; if the audio thread has gone away we simply
    /// stop playing new sounds.
    pub fn play(&self, sound_type: SoundType) {
        let _ = self.sender.send(Message::Effect(sound_type));
    }

    pub fn pause_music(&self) {
        let _ = self.sender.send(Message::PauseMusic);
    }

    pub fn resume_music(&self) {
        let _ = self.sender.send(Message::ResumeMusic);
    }
}
