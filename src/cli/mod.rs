use clap::Parser;

/// Gazette takes no options: running it opens the reader.
#[derive(Parser, Debug)]
#[command(name = "gazette")]
#[command(version, about = "Read the Hacker News front page in your terminal", long_about = None)]
pub struct Cli {}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_arguments_accepted() {
        assert!(Cli::try_parse_from(["gazette"]).is_ok());
        assert!(Cli::try_parse_from(["gazette", "--workers", "4"]).is_err());
        assert!(Cli::try_parse_from(["gazette", "tui"]).is_err());
    }
}
