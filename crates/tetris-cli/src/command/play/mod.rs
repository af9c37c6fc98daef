use ratatui_runtime::Runtime;
use tetris_engine::{GameConfig, GameSession, MAX_STARTING_LEVEL};

use crate::audio::{AudioSink, RodioMixer, Speaker, TerminalBell};

use self::app::PlayApp;

mod app;
mod input;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Starting level (each level counts as three completed lines)
    #[clap(value_parser = clap::value_parser!(u8).range(0..=i64::from(MAX_STARTING_LEVEL)))]
    level: Option<u8>,
}

impl PlayArg {
    pub(crate) fn level(&self) -> usize {
        self.level.map_or(0, usize::from)
    }
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let config = GameConfig::default();
    let session = GameSession::new(config, arg.level());
    match RodioMixer::open() {
        Ok(mixer) => play(session, Speaker::new(mixer)),
        // No output device; the terminal bell stands in for the cues.
        Err(_) => play(session, TerminalBell::new()),
    }
}

fn play<A>(session: GameSession, audio: A) -> anyhow::Result<()>
where
    A: AudioSink,
{
    let mut app = PlayApp::new(session, audio);
    Runtime::new().run(&mut app)?;
    Ok(())
}
