use anyhow::{anyhow, Context, Result};
use clap::Parser;

use textmask::cli::{CliArgs, Command, MaskSelector, MaskSource};
use textmask::config::{CompiledField, FieldConfig, MaskConfig};
use textmask::Mask;

fn main() -> Result<()> {
    let args = CliArgs::parse();
    textmask::tracing::init(args.verbose);

    run(args.command)
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Format {
            source,
            text,
            no_autocomplete,
            right_to_left,
            json,
        } => {
            let mut config = field_config(source)?;
            if right_to_left {
                config.right_to_left = true;
            }
            let field = compile_field(config)?;
            let mut mask = field.pick(&text).clone();
            if no_autocomplete {
                mask = mask.with_autocomplete(false);
            }
            let result = mask.format(&text);
            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!("{}", result.formatted_text());
            }
        }
        Command::Unmask { source, text } => {
            let field = resolve_field(source)?;
            println!("{}", field.pick(&text).unmask(&text));
        }
        Command::Placeholder { source } => {
            let field = resolve_field(source)?;
            println!("{}", field.primary.placeholder());
        }
        Command::Check { pattern } => {
            let mask = Mask::compile(&pattern)
                .with_context(|| format!("Invalid mask pattern {:?}", pattern))?;
            println!(
                "ok: {} slots, value length {}..={}",
                mask.total_text_length(),
                mask.acceptable_value_length(),
                mask.total_value_length()
            );
        }
    }
    Ok(())
}

fn resolve_field(source: MaskSource) -> Result<CompiledField> {
    compile_field(field_config(source)?)
}

fn field_config(source: MaskSource) -> Result<FieldConfig> {
    match source.into_selector().map_err(|e| anyhow!(e))? {
        MaskSelector::Pattern(pattern) => Ok(FieldConfig::new(pattern)),
        MaskSelector::Field(name) => MaskConfig::load()
            .field(&name)
            .cloned()
            .ok_or_else(|| anyhow!("No field named {:?} in masks.yaml", name)),
    }
}

fn compile_field(config: FieldConfig) -> Result<CompiledField> {
    config
        .compile()
        .with_context(|| format!("Invalid mask pattern {:?}", config.mask))
}
