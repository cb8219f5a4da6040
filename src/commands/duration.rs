use crate::OutputFormat;
use crate::duration::{DurationConverter, format_secs};
use anyhow::Result;
use serde::Serialize;

#[derive(Serialize)]
struct Conversion<'a> {
    input: &'a str,
    seconds: Option<u32>,
    formatted: String,
}

fn print(output: OutputFormat, conversion: &Conversion, text: &str) -> Result<()> {
    match output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(conversion)?),
        OutputFormat::Text => println!("{}", text),
    }
    Ok(())
}

pub fn parse(converter: &DurationConverter, input: &str, output: OutputFormat) -> Result<()> {
    let seconds = converter.parse(Some(input));
    let conversion = Conversion {
        input,
        seconds: Some(seconds),
        formatted: format_secs(seconds),
    };
    print(output, &conversion, &seconds.to_string())
}

pub fn format(converter: &DurationConverter, seconds: f64, output: OutputFormat) -> Result<()> {
    let formatted = converter.format(Some(seconds));
    let input = seconds.to_string();
    let conversion = Conversion {
        input: &input,
        seconds: None,
        formatted: formatted.clone(),
    };
    print(output, &conversion, &formatted)
}

pub fn iso(converter: &DurationConverter, iso: &str, output: OutputFormat) -> Result<()> {
    let seconds = converter.parse(Some(iso));
    let formatted = format_secs(seconds);
    let conversion = Conversion {
        input: iso,
        seconds: Some(seconds),
        formatted: formatted.clone(),
    };
    print(output, &conversion, &formatted)
}
