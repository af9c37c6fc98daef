use clap::Parser;

use self::play::PlayArg;

mod play;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    #[clap(flatten)]
    play: PlayArg,
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    play::run(&args.play)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_defaults_to_zero() {
        let args = CommandArgs::try_parse_from(["tetris"]).unwrap();
        assert_eq!(args.play.level(), 0);
    }

    #[test]
    fn test_level_range_is_validated() {
        let args = CommandArgs::try_parse_from(["tetris", "15"]).unwrap();
        assert_eq!(args.play.level(), 15);
        assert!(CommandArgs::try_parse_from(["tetris", "16"]).is_err());
        assert!(CommandArgs::try_parse_from(["tetris", "-1"]).is_err());
        assert!(CommandArgs::try_parse_from(["tetris", "fast"]).is_err());
    }
}
