//! Command-line argument parsing for the textmask binary
//!
//! Supports:
//! - Formatting raw text with a mask (`format`)
//! - Extracting the value behind formatted text (`unmask`)
//! - Printing a mask's placeholder (`placeholder`)
//! - Validating a pattern (`check`)
//!
//! Masks come either from `--mask <PATTERN>` or from a named field in
//! `masks.yaml` via `--field <NAME>`.

use clap::{ArgAction, Args, Parser, Subcommand};

/// Masked text input formatter
#[derive(Parser, Debug)]
#[command(name = "textmask", version, about = "Apply input masks to text")]
pub struct CliArgs {
    /// Log more to stderr (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Format raw text and print the displayed value
    Format {
        #[command(flatten)]
        source: MaskSource,

        /// Raw text to format
        text: String,

        /// Do not append the literal run after the last character
        #[arg(long)]
        no_autocomplete: bool,

        /// Fill the mask from its last slot backwards
        #[arg(long)]
        right_to_left: bool,

        /// Print the full result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the extracted value of some text
    Unmask {
        #[command(flatten)]
        source: MaskSource,

        /// Formatted or raw text
        text: String,
    },
    /// Print the mask's placeholder
    Placeholder {
        #[command(flatten)]
        source: MaskSource,
    },
    /// Check that a pattern compiles
    Check {
        /// Mask pattern
        pattern: String,
    },
}

/// Where the mask comes from
#[derive(Args, Debug, Clone)]
#[group(required = true, multiple = false)]
pub struct MaskSource {
    /// Mask pattern, e.g. "+1 ([000]) [000]-[0000]"
    #[arg(short, long, value_name = "PATTERN")]
    pub mask: Option<String>,

    /// Named field from masks.yaml
    #[arg(short, long, value_name = "NAME")]
    pub field: Option<String>,
}

/// Resolved mask selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MaskSelector {
    Pattern(String),
    Field(String),
}

impl MaskSource {
    /// Convert the parsed flag pair into a selector
    pub fn into_selector(self) -> Result<MaskSelector, String> {
        match (self.mask, self.field) {
            (Some(pattern), None) => Ok(MaskSelector::Pattern(pattern)),
            (None, Some(name)) => Ok(MaskSelector::Field(name)),
            (Some(_), Some(_)) => Err("Use either --mask or --field, not both".to_string()),
            (None, None) => Err("A mask is required (--mask or --field)".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_format_with_mask() {
        let args = CliArgs::try_parse_from([
            "textmask",
            "format",
            "--mask",
            "[00]-[00]",
            "1234",
            "--json",
        ])
        .unwrap();
        match args.command {
            Command::Format {
                source, text, json, ..
            } => {
                assert_eq!(
                    source.into_selector().unwrap(),
                    MaskSelector::Pattern("[00]-[00]".to_string())
                );
                assert_eq!(text, "1234");
                assert!(json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_unmask_with_field() {
        let args = CliArgs::try_parse_from(["textmask", "unmask", "-f", "phone", "+1 (555)"]).unwrap();
        match args.command {
            Command::Unmask { source, .. } => {
                assert_eq!(
                    source.into_selector().unwrap(),
                    MaskSelector::Field("phone".to_string())
                );
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_mask_and_field_conflict() {
        let result = CliArgs::try_parse_from([
            "textmask",
            "placeholder",
            "--mask",
            "[0]",
            "--field",
            "zip",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_verbose_counts() {
        let args = CliArgs::try_parse_from(["textmask", "-vv", "check", "[0]"]).unwrap();
        assert_eq!(args.verbose, 2);
        let args = CliArgs::try_parse_from(["textmask", "check", "[0]"]).unwrap();
        assert_eq!(args.verbose, 0);
    }

    #[test]
    fn test_mask_source_required() {
        assert!(CliArgs::try_parse_from(["textmask", "placeholder"]).is_err());
    }

    #[test]
    fn test_into_selector_rejects_empty() {
        let source = MaskSource {
            mask: None,
            field: None,
        };
        assert!(source.into_selector().is_err());
    }

    #[test]
    fn test_parse_right_to_left_flag() {
        let args = CliArgs::try_parse_from([
            "textmask",
            "format",
            "-m",
            "[000] [000]",
            "1234",
            "--right-to-left",
        ])
        .unwrap();
        match args.command {
            Command::Format { right_to_left, .. } => assert!(right_to_left),
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
