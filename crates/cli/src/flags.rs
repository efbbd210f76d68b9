use clap::ValueEnum;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// The weight alone
    #[default]
    Plain,
    /// `<weight> <elapsed_ms>`
    Timing,
    /// Full JSON report
    Json,
}

impl OutputFormat {
    pub const fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Plain => "plain",
            OutputFormat::Timing => "timing",
            OutputFormat::Json => "json",
        }
    }
}
