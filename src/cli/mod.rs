//! CLI argument parsing and the interactive shell grammar.

mod args;
mod shell;

pub use args::{Args, Command, OutputArgs};
pub use shell::{SHELL_HELP, ShellCommand, ShellParseError};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Mode;
    use clap::Parser;
    use std::path::PathBuf;

    // ===========================================
    // ShellCommand::parse tests
    // ===========================================

    #[test]
    fn test_parse_text_keeps_inner_whitespace() {
        let command = ShellCommand::parse("text   Hello,  world!  ").unwrap();
        assert_eq!(command, ShellCommand::Text("Hello,  world!".to_string()));
    }

    #[test]
    fn test_parse_text_requires_argument() {
        assert_eq!(
            ShellCommand::parse("text").unwrap_err(),
            ShellParseError::MissingArgument("text")
        );
    }

    #[test]
    fn test_parse_mode() {
        assert_eq!(
            ShellCommand::parse("mode clone").unwrap(),
            ShellCommand::Mode(Mode::Clone)
        );
        assert_eq!(
            ShellCommand::parse("MODE Preset").unwrap(),
            ShellCommand::Mode(Mode::Preset)
        );
        assert!(matches!(
            ShellCommand::parse("mode karaoke").unwrap_err(),
            ShellParseError::InvalidMode(_)
        ));
    }

    #[test]
    fn test_parse_voice_selection() {
        assert_eq!(
            ShellCommand::parse("voice Liam").unwrap(),
            ShellCommand::Voice("Liam".to_string())
        );
        assert_eq!(ShellCommand::parse("refresh").unwrap(), ShellCommand::Voices);
    }

    #[test]
    fn test_parse_file_with_and_without_path() {
        assert_eq!(
            ShellCommand::parse("file samples/me.wav").unwrap(),
            ShellCommand::File(Some(PathBuf::from("samples/me.wav")))
        );
        assert_eq!(ShellCommand::parse("file").unwrap(), ShellCommand::File(None));
    }

    #[test]
    fn test_parse_short_aliases() {
        assert_eq!(ShellCommand::parse("g").unwrap(), ShellCommand::Generate);
        assert_eq!(ShellCommand::parse("p").unwrap(), ShellCommand::Play);
        assert_eq!(ShellCommand::parse("exit").unwrap(), ShellCommand::Quit);
    }

    #[test]
    fn test_parse_blank_and_unknown() {
        assert_eq!(ShellCommand::parse("   ").unwrap(), ShellCommand::Empty);
        assert_eq!(
            ShellCommand::parse("dance now").unwrap_err(),
            ShellParseError::UnknownCommand("dance".to_string())
        );
    }

    // ===========================================
    // Args tests
    // ===========================================

    #[test]
    fn test_args_default_to_shell() {
        let args = Args::try_parse_from(["chatterbox"]).unwrap();
        assert_eq!(args.command(), Command::Shell);
        assert!(!args.verbose);
    }

    #[test]
    fn test_args_generate() {
        let args = Args::try_parse_from([
            "chatterbox",
            "generate",
            "--voice",
            "Liam",
            "-t",
            "Hi",
            "-o",
            "hi.wav",
        ])
        .unwrap();

        assert_eq!(
            args.command(),
            Command::Generate {
                voice: Some("Liam".to_string()),
                output: OutputArgs {
                    text: Some("Hi".to_string()),
                    output: Some(PathBuf::from("hi.wav")),
                    play: false,
                },
            }
        );
    }

    #[test]
    fn test_args_clone_requires_reference() {
        assert!(Args::try_parse_from(["chatterbox", "clone"]).is_err());

        let args =
            Args::try_parse_from(["chatterbox", "clone", "-r", "me.wav", "--play"]).unwrap();
        match args.command() {
            Command::Clone { reference, output } => {
                assert_eq!(reference, PathBuf::from("me.wav"));
                assert!(output.play);
                assert_eq!(output.text, None);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_args_global_flags_after_subcommand() {
        let args = Args::try_parse_from([
            "chatterbox",
            "voices",
            "--api-url",
            "http://gpu-box:8000",
            "-v",
        ])
        .unwrap();

        assert_eq!(args.api_url.as_deref(), Some("http://gpu-box:8000"));
        assert!(args.verbose);
        assert_eq!(args.command(), Command::Voices);
    }
}
