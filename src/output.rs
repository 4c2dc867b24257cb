use anyhow::Result;
use serde::Serialize;

pub fn output_data<T: Serialize>(data: &T, format: &str) -> Result<()> {
    match format {
        "yaml" => {
            println!("{}", serde_yaml::to_string(data)?);
        }
        _ => {
            // "json" and "pretty" both render pretty-printed JSON
            println!("{}", serde_json::to_string_pretty(data)?);
        }
    }
    Ok(())
}

pub fn print_error(message: &str) {
    eprintln!("\x1b[31mError: {}\x1b[0m", message);
}
