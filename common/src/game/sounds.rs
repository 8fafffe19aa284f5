#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SoundEffect {
    Eat,
    Crash,
    PowerUp,
}

/// Audio collaborator seam. The session triggers effects by name only;
/// loading and playback belong to the shell, and a missing backend keeps
/// the game running silently.
pub trait SoundPlayer {
    fn play(&mut self, effect: SoundEffect);
}

pub struct NullSoundPlayer;

impl SoundPlayer for NullSoundPlayer {
    fn play(&mut self, _effect: SoundEffect) {}
}
