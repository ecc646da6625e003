use anyhow::{Context, Result};
use std::{
    env,
    fs::File,
    io::Write,
    path::Path,
};

fn main() -> Result<()> {
    // Usage:
    //   societe_generale <releve.csv> [output.json]
    //
    // Prints {"transactions": [...]} to stdout when no output path is
    // given; the same payload the HTTP endpoint returns.
    let args: Vec<String> = env::args().collect();

    let input = args.get(1).map(|s| s.as_str()).unwrap_or("releve.csv");

    let file = File::open(input).with_context(|| format!("Cannot open {}", input))?;

    let source_file = Path::new(input)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| input.to_string());

    let transactions = societe_generale::parse_statement_reader(file, &source_file)?;

    let payload = serde_json::json!({ "transactions": transactions });
    let rendered = serde_json::to_string_pretty(&payload)?;

    match args.get(2) {
        Some(output) => {
            let mut out =
                File::create(output).with_context(|| format!("Cannot write {}", output))?;
            out.write_all(rendered.as_bytes())?;
            println!("Wrote {} transaction(s) to {}", transactions.len(), output);
        }
        None => println!("{}", rendered),
    }

    Ok(())
}
